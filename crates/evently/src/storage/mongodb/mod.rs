//! MongoDB storage backend implementation.
//!
//! This module provides a MongoDB-based implementation of the repository
//! traits using the official `mongodb` driver, plus the connector used by the
//! connection cache.

mod connector;
mod conversions;
mod error;
mod repository;

pub use connector::MongoConnector;

/// Collection that holds event documents.
pub const EVENTS_COLLECTION: &str = "events";
