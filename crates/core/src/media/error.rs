use thiserror::Error;

/// Errors that can occur while uploading media.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Media service is not configured: {0}")]
    NotConfigured(String),
    #[error("Upload request failed: {0}")]
    Request(String),
    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}

/// Result type for media operations.
pub type Result<T> = std::result::Result<T, MediaError>;
