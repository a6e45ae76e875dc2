//! Validation of multipart event submissions.
//!
//! The shell collects the raw multipart parts into an [`EventForm`]; this
//! module turns that into a typed [`ValidatedEventForm`] or an
//! [`EventError`] without touching the network.

use std::collections::BTreeMap;

use super::error::EventError;
use super::types::{EventDraft, ImageFile};

/// Name of the multipart file part carrying the event image.
pub const IMAGE_FIELD: &str = "image";
/// Name of the JSON-encoded tags field.
pub const TAGS_FIELD: &str = "tags";
/// Name of the JSON-encoded agenda field.
pub const AGENDA_FIELD: &str = "agenda";

/// Raw fields of an event submission.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    fields: BTreeMap<String, String>,
    image: Option<ImageFile>,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a text field. A repeated name overwrites the earlier value.
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Records the image file part.
    pub fn set_image(&mut self, image: ImageFile) {
        self.image = Some(image);
    }

    /// Builder form of [`EventForm::insert_field`].
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    /// Builder form of [`EventForm::set_image`].
    pub fn with_image(mut self, image: ImageFile) -> Self {
        self.set_image(image);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A submission that passed validation: the event draft plus the file to upload.
#[derive(Debug, Clone)]
pub struct ValidatedEventForm {
    pub draft: EventDraft,
    pub image: ImageFile,
}

/// Validates an event submission.
///
/// The image is checked first (an empty file part counts as missing), then
/// the `tags` and `agenda` fields are decoded as JSON arrays of strings. A
/// missing `tags` or `agenda` field decodes to an empty list.
pub fn parse_event_form(form: EventForm) -> Result<ValidatedEventForm, EventError> {
    let EventForm { mut fields, image } = form;

    let image = image
        .filter(|image| !image.is_empty())
        .ok_or(EventError::MissingImage)?;

    let tags = parse_string_list(TAGS_FIELD, fields.remove(TAGS_FIELD).as_deref())?;
    let agenda = parse_string_list(AGENDA_FIELD, fields.remove(AGENDA_FIELD).as_deref())?;

    Ok(ValidatedEventForm {
        draft: EventDraft {
            attributes: fields,
            tags,
            agenda,
        },
        image,
    })
}

/// Decodes a JSON array of strings from a form field value.
pub fn parse_string_list(field: &'static str, raw: Option<&str>) -> Result<Vec<String>, EventError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    serde_json::from_str::<Vec<String>>(raw).map_err(|e| EventError::InvalidJson {
        field,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageFile {
        ImageFile::new("cover.png", vec![1, 2, 3]).with_content_type("image/png")
    }

    #[test]
    fn test_missing_image_is_rejected() {
        let form = EventForm::new()
            .with_field("title", "RustConf")
            .with_field("tags", r#"["a"]"#);

        assert_eq!(
            parse_event_form(form).unwrap_err(),
            EventError::MissingImage
        );
    }

    #[test]
    fn test_missing_image_wins_over_bad_json() {
        let form = EventForm::new().with_field("tags", "not json");
        assert_eq!(
            parse_event_form(form).unwrap_err(),
            EventError::MissingImage
        );
    }

    #[test]
    fn test_empty_image_counts_as_missing() {
        let form = EventForm::new().with_image(ImageFile::new("", Vec::new()));
        assert_eq!(
            parse_event_form(form).unwrap_err(),
            EventError::MissingImage
        );
    }

    #[test]
    fn test_malformed_tags_are_rejected() {
        let form = EventForm::new()
            .with_image(image())
            .with_field("tags", "not json")
            .with_field("agenda", r#"["x"]"#);

        let err = parse_event_form(form).unwrap_err();
        assert!(matches!(err, EventError::InvalidJson { field: "tags", .. }));
        assert_eq!(err.to_string(), "Invalid JSON data format");
    }

    #[test]
    fn test_malformed_agenda_is_rejected() {
        let form = EventForm::new()
            .with_image(image())
            .with_field("tags", r#"["a"]"#)
            .with_field("agenda", r#"{"x": 1}"#);

        let err = parse_event_form(form).unwrap_err();
        assert!(matches!(err, EventError::InvalidJson { field: "agenda", .. }));
    }

    #[test]
    fn test_non_string_items_are_rejected() {
        let err = parse_string_list("tags", Some("[1, 2]")).unwrap_err();
        assert!(matches!(err, EventError::InvalidJson { field: "tags", .. }));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let validated = parse_event_form(EventForm::new().with_image(image())).unwrap();
        assert!(validated.draft.tags.is_empty());
        assert!(validated.draft.agenda.is_empty());
    }

    #[test]
    fn test_valid_form_splits_lists_from_attributes() {
        let form = EventForm::new()
            .with_image(image())
            .with_field("title", "RustConf")
            .with_field("venue", "Hall A")
            .with_field("tags", r#"["a","b"]"#)
            .with_field("agenda", r#"["x"]"#);

        let validated = parse_event_form(form).unwrap();

        assert_eq!(validated.draft.tags, vec!["a", "b"]);
        assert_eq!(validated.draft.agenda, vec!["x"]);
        assert_eq!(validated.draft.attributes.len(), 2);
        assert_eq!(
            validated.draft.attributes.get("venue").map(String::as_str),
            Some("Hall A")
        );
        assert_eq!(validated.image.file_name, "cover.png");
    }

    #[test]
    fn test_repeated_field_keeps_last_value() {
        let mut form = EventForm::new();
        form.insert_field("title", "first");
        form.insert_field("title", "second");
        assert_eq!(form.field("title"), Some("second"));
    }
}
