use thiserror::Error;

/// Client-correctable problems with an event submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Image file is required")]
    MissingImage,
    /// A JSON-encoded form field did not hold an array of strings.
    #[error("Invalid JSON data format")]
    InvalidJson { field: &'static str, reason: String },
}
