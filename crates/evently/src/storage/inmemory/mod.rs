//! In-memory storage backend.
//!
//! Events live only as long as the process. Used for local development
//! without a database and by the handler tests.

mod repository;

pub use repository::{InMemoryConnector, InMemoryRepository};
