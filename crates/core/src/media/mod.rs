//! Media hosting abstractions.
//!
//! The server hands image bytes to a [`MediaUploader`] and stores the
//! durable URL it gets back.

mod error;
mod traits;
mod types;

pub use error::{MediaError, Result};
pub use traits::MediaUploader;
pub use types::{ResourceType, UploadRequest, UploadedMedia, EVENT_IMAGE_FOLDER};
