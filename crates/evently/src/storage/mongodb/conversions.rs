//! Conversions between `Event` and BSON documents.
//!
//! Free-form attributes are stored as top-level string fields next to the
//! typed ones, so documents stay readable in the database shell.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document};
use uuid::Uuid;

use evently_core::event::{is_reserved_attribute, Event};
use evently_core::storage::{RepositoryError, Result};

/// Converts an event into the document stored in the events collection.
pub fn event_to_document(event: &Event) -> Document {
    let mut doc = Document::new();

    // Typed fields are written after the attributes so they always win.
    for (name, value) in &event.attributes {
        if !is_reserved_attribute(name) {
            doc.insert(name.as_str(), value.as_str());
        }
    }

    doc.insert("_id", event.id.to_string());
    doc.insert("image", event.image.as_str());
    doc.insert("tags", event.tags.clone());
    doc.insert("agenda", event.agenda.clone());
    doc.insert("created_at", to_bson_datetime(event.created_at));
    doc.insert("updated_at", to_bson_datetime(event.updated_at));

    doc
}

/// Rebuilds an event from a stored document.
pub fn document_to_event(doc: Document) -> Result<Event> {
    let raw_id = get_str(&doc, "_id")?;
    let id = Uuid::parse_str(raw_id)
        .map_err(|e| RepositoryError::Serialization(format!("Invalid event id {raw_id}: {e}")))?;

    let image = get_str(&doc, "image")?.to_string();
    let tags = get_string_list(&doc, "tags")?;
    let agenda = get_string_list(&doc, "agenda")?;
    let created_at = get_datetime(&doc, "created_at")?;
    let updated_at = match doc.get("updated_at") {
        Some(_) => get_datetime(&doc, "updated_at")?,
        None => created_at,
    };

    let attributes: BTreeMap<String, String> = doc
        .into_iter()
        .filter(|(name, _)| !is_reserved_attribute(name))
        .filter_map(|(name, value)| match value {
            Bson::String(value) => Some((name, value)),
            _ => None,
        })
        .collect();

    Ok(Event {
        id,
        image,
        tags,
        agenda,
        created_at,
        updated_at,
        attributes,
    })
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn get_str<'a>(doc: &'a Document, key: &str) -> Result<&'a str> {
    doc.get_str(key)
        .map_err(|e| RepositoryError::Serialization(format!("Field {key}: {e}")))
}

fn get_datetime(doc: &Document, key: &str) -> Result<DateTime<Utc>> {
    let value = doc
        .get_datetime(key)
        .map_err(|e| RepositoryError::Serialization(format!("Field {key}: {e}")))?;

    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        RepositoryError::Serialization(format!("Field {key}: timestamp out of range"))
    })
}

fn get_string_list(doc: &Document, key: &str) -> Result<Vec<String>> {
    let Some(value) = doc.get(key) else {
        return Ok(Vec::new());
    };

    let Bson::Array(items) = value else {
        return Err(RepositoryError::Serialization(format!(
            "Field {key}: expected an array"
        )));
    };

    items
        .iter()
        .map(|item| match item {
            Bson::String(s) => Ok(s.clone()),
            other => Err(RepositoryError::Serialization(format!(
                "Field {key}: expected strings, found {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::doc;

    fn sample_event() -> Event {
        Event::new("https://res.cloudinary.com/demo/image/upload/v1/DevEvent/cover.png")
            .with_id(Uuid::parse_str("6f1c3d5e-8a9b-4c2d-9e0f-112233445566").unwrap())
            .with_tags(["rust", "async"])
            .with_agenda(["Keynote", "Workshops"])
            .with_attribute("title", "RustConf")
            .with_attribute("venue", "Hall A")
            .with_created_at(Utc.with_ymd_and_hms(2025, 9, 2, 17, 30, 0).unwrap())
    }

    #[test]
    fn test_event_round_trips_through_document() {
        let event = sample_event();
        let doc = event_to_document(&event);

        assert_eq!(doc.get_str("_id").unwrap(), event.id.to_string());
        assert_eq!(doc.get_str("title").unwrap(), "RustConf");

        let restored = document_to_event(doc).unwrap();
        assert_eq!(restored, event);
    }

    #[test]
    fn test_fresh_event_matches_stored_form() {
        let event = Event::new("https://res.cloudinary.com/demo/image/upload/v1/x.png")
            .with_attribute("title", "RustConf");

        let restored = document_to_event(event_to_document(&event)).unwrap();

        assert_eq!(restored.created_at, event.created_at);
        assert_eq!(restored, event);
    }

    #[test]
    fn test_non_string_extra_fields_are_skipped() {
        let mut doc = event_to_document(&sample_event());
        doc.insert("__v", 0_i32);

        let restored = document_to_event(doc).unwrap();
        assert_eq!(restored.attribute("__v"), None);
        assert_eq!(restored.attribute("venue"), Some("Hall A"));
    }

    #[test]
    fn test_missing_image_is_a_serialization_error() {
        let doc = doc! {
            "_id": "6f1c3d5e-8a9b-4c2d-9e0f-112233445566",
            "created_at": bson::DateTime::from_millis(0),
        };

        let err = document_to_event(doc).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn test_non_string_tags_are_rejected() {
        let mut doc = event_to_document(&sample_event());
        doc.insert("tags", vec![Bson::Int32(1)]);

        let err = document_to_event(doc).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
