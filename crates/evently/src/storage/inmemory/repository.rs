//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use evently_core::event::{sort_events_newest_first, Event};
use evently_core::storage::{Connector, EventRepository, EventStore, RepositoryError, Result};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub async fn count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn create_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Event",
                id: event.id.to_string(),
            });
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        let mut all: Vec<Event> = events.values().cloned().collect();
        sort_events_newest_first(&mut all);
        Ok(all)
    }
}

/// Connector that always hands out the same in-memory repository.
///
/// The URI is only checked for presence by the connection cache; its value
/// is ignored here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    repository: InMemoryRepository,
}

impl InMemoryConnector {
    pub fn new(repository: InMemoryRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Connector for InMemoryConnector {
    type Handle = EventStore;

    async fn connect(&self, _uri: &str) -> Result<EventStore> {
        tracing::debug!("Using in-memory event store");
        Ok(Arc::new(self.repository.clone()))
    }
}
