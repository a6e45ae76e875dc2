mod error;
mod form;
mod sorting;
mod types;

pub use error::EventError;
pub use form::{
    parse_event_form, parse_string_list, EventForm, ValidatedEventForm, AGENDA_FIELD,
    IMAGE_FIELD, TAGS_FIELD,
};
pub use sorting::{is_newest_first, sort_events_newest_first};
pub use types::{is_reserved_attribute, Event, EventDraft, ImageFile, RESERVED_ATTRIBUTES};
