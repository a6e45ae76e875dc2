//! Application state shared by all request handlers.
//!
//! The state owns the single connection cache for the process and the media
//! uploader. Cloning the state clones `Arc`s, so every handler sees the same
//! cached connection.

use std::sync::Arc;

use evently_core::media::MediaUploader;
use evently_core::storage::{Connector, EventStore};

use crate::config::Config;
use crate::storage::ConnectionCache;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Lazily connected event store.
    pub db: Arc<ConnectionCache<EventStore>>,
    /// Hosted media service for event images.
    pub media: Arc<dyn MediaUploader>,
    /// Request body limit for event creation.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates an AppState from a connector and an uploader.
    ///
    /// Nothing is connected here; the first handler that needs the store
    /// triggers the connection.
    pub fn build(
        connector: Arc<dyn Connector<Handle = EventStore>>,
        media: Arc<dyn MediaUploader>,
        config: &Config,
    ) -> Self {
        Self {
            db: Arc::new(ConnectionCache::new(connector, config.mongodb_uri.clone())),
            media,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

// ============================================================================
// Factory functions for the selected storage backend
// ============================================================================

#[cfg(feature = "mongodb")]
mod mongodb_backend {
    use super::*;
    use crate::media::CloudinaryUploader;
    use crate::storage::MongoConnector;

    impl AppState {
        /// Creates AppState backed by MongoDB and Cloudinary.
        pub fn new(config: &Config) -> Self {
            let connector = Arc::new(MongoConnector::from_config(config));
            let media = Arc::new(CloudinaryUploader::from_config(config));
            Self::build(connector, media, config)
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::media::CloudinaryUploader;
    use crate::storage::{InMemoryConnector, InMemoryRepository};

    impl AppState {
        /// Creates AppState with process-local storage and Cloudinary.
        pub fn new(config: &Config) -> Self {
            let connector = Arc::new(InMemoryConnector::new(InMemoryRepository::new()));
            let media = Arc::new(CloudinaryUploader::from_config(config));
            Self::build(connector, media, config)
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
