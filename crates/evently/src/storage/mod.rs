//! Storage backend implementations.
//!
//! This module provides the connection cache plus concrete implementations
//! of `evently_core::storage::EventRepository`. The backend is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `mongodb` (default): MongoDB backend using the official `mongodb` driver
//! - `inmemory`: process-local storage for running without a database
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with MongoDB (default):
//! ```bash
//! cargo build -p evently
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p evently --no-default-features --features inmemory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "mongodb", feature = "inmemory"))]
compile_error!(
    "Features 'mongodb' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "mongodb", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'mongodb' or 'inmemory' feature. \
    Example: cargo build -p evently --features mongodb"
);

mod connection;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use connection::ConnectionCache;

#[cfg(feature = "mongodb")]
pub use mongodb::MongoConnector;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::{InMemoryConnector, InMemoryRepository};
