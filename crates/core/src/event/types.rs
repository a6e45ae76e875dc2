use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attribute names owned by the typed fields of [`Event`].
///
/// Free-form form fields with one of these names are never copied into
/// [`Event::attributes`].
pub const RESERVED_ATTRIBUTES: &[&str] = &[
    "id",
    "_id",
    "image",
    "tags",
    "agenda",
    "created_at",
    "updated_at",
];

/// Returns true if `name` is one of the [`RESERVED_ATTRIBUTES`].
pub fn is_reserved_attribute(name: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&name)
}

/// A persisted event record.
///
/// Timestamps are kept at millisecond precision, the resolution of the
/// document store, so a freshly created event equals its stored form.
///
/// Apart from the typed fields, an event carries whatever string attributes
/// were submitted with its form (title, venue, date, ...). They are
/// flattened into the JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// Public URL of the hosted image.
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub agenda: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl Event {
    /// Creates a new event with the given image URL, stamped with the current time.
    pub fn new(image: impl Into<String>) -> Self {
        let now = Utc::now().trunc_subsecs(3);
        Self {
            id: Uuid::new_v4(),
            image: image.into(),
            tags: Vec::new(),
            agenda: Vec::new(),
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the tags for this event.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the agenda for this event.
    pub fn with_agenda<I, S>(mut self, agenda: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.agenda = agenda.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a free-form attribute. Reserved names are ignored.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !is_reserved_attribute(&name) {
            self.attributes.insert(name, value.into());
        }
        self
    }

    /// Sets both timestamps (useful for testing and for rebuilding stored records).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        let created_at = created_at.trunc_subsecs(3);
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Looks up a free-form attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A validated event submission that is still waiting for its image URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub attributes: BTreeMap<String, String>,
    pub tags: Vec<String>,
    pub agenda: Vec<String>,
}

impl EventDraft {
    /// Completes the draft with the hosted image URL.
    pub fn into_event(self, image: impl Into<String>) -> Event {
        let mut event = Event::new(image);
        event.tags = self.tags;
        event.agenda = self.agenda;
        event.attributes = self
            .attributes
            .into_iter()
            .filter(|(name, _)| !is_reserved_attribute(name))
            .collect();
        event
    }
}

/// An uploaded file taken from a multipart submission.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image payloads can be megabytes; keep them out of debug logs.
impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_new_sets_matching_timestamps() {
        let event = Event::new("https://img.example.com/a.png");
        assert_eq!(event.created_at, event.updated_at);
        assert_eq!(event.image, "https://img.example.com/a.png");
        assert!(event.tags.is_empty());
        assert!(event.agenda.is_empty());
    }

    #[test]
    fn test_timestamps_have_millisecond_precision() {
        let event = Event::new("url");
        assert_eq!(event.created_at.timestamp_subsec_nanos() % 1_000_000, 0);

        let precise = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let event = event.with_created_at(precise);
        assert_eq!(event.created_at.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(event.updated_at, event.created_at);
    }

    #[test]
    fn test_with_attribute_ignores_reserved_names() {
        let event = Event::new("url")
            .with_attribute("title", "RustConf")
            .with_attribute("image", "https://evil.example.com/x.png")
            .with_attribute("_id", "spoofed");

        assert_eq!(event.attribute("title"), Some("RustConf"));
        assert_eq!(event.image, "url");
        assert_eq!(event.attributes.len(), 1);
    }

    #[test]
    fn test_event_json_flattens_attributes() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let event = Event::new("https://img.example.com/a.png")
            .with_id(Uuid::nil())
            .with_tags(["a", "b"])
            .with_agenda(["x"])
            .with_attribute("venue", "Hall A")
            .with_created_at(created);

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["venue"], "Hall A");
        assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(json["agenda"], serde_json::json!(["x"]));
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");

        let parsed: Event = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_draft_into_event_drops_reserved_attributes() {
        let mut attributes = BTreeMap::new();
        attributes.insert("title".to_string(), "Meetup".to_string());
        attributes.insert("created_at".to_string(), "yesterday".to_string());

        let draft = EventDraft {
            attributes,
            tags: vec!["rust".to_string()],
            agenda: vec![],
        };

        let event = draft.into_event("https://img.example.com/m.png");

        assert_eq!(event.attribute("title"), Some("Meetup"));
        assert_eq!(event.attribute("created_at"), None);
        assert_eq!(event.tags, vec!["rust".to_string()]);
        assert_eq!(event.image, "https://img.example.com/m.png");
    }

    #[test]
    fn test_image_file_debug_hides_bytes() {
        let file = ImageFile::new("cover.png", vec![0u8; 4096]).with_content_type("image/png");
        let rendered = format!("{file:?}");
        assert!(rendered.contains("cover.png"));
        assert!(rendered.contains("4096"));
        assert!(!rendered.contains("[0, 0"));
    }
}
