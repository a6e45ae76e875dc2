use std::sync::Arc;

use async_trait::async_trait;

use crate::event::Event;

use super::Result;

/// Repository for event records.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts a new event.
    async fn create_event(&self, event: &Event) -> Result<()>;

    /// Returns every event, newest first.
    async fn list_events(&self) -> Result<Vec<Event>>;
}

/// Shared handle to a connected event repository.
pub type EventStore = Arc<dyn EventRepository>;

/// Establishes a connection to a store addressed by a URI.
///
/// Implementations must fail instead of queueing work when the server is
/// unreachable.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Clone + Send + Sync;

    /// Connects to `uri` and returns a ready-to-use handle.
    async fn connect(&self, uri: &str) -> Result<Self::Handle>;
}
