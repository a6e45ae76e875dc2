//! MongoDB repository implementation.
//!
//! Implements `EventRepository` from `evently_core::storage` using MongoDB.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database, IndexModel};

use evently_core::event::Event;
use evently_core::storage::{EventRepository, Result};

use super::conversions::{document_to_event, event_to_document};
use super::error::map_mongo_error;
use super::EVENTS_COLLECTION;

/// MongoDB-based event repository.
#[derive(Debug, Clone)]
pub struct MongoEventRepository {
    collection: Collection<Document>,
}

impl MongoEventRepository {
    /// Creates a repository over the events collection of `database`.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(EVENTS_COLLECTION),
        }
    }

    /// Creates the index backing the newest-first listing.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| map_mongo_error(e, "Event", "created_at index"))?;

        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    async fn create_event(&self, event: &Event) -> Result<()> {
        self.collection
            .insert_one(event_to_document(event))
            .await
            .map_err(|e| map_mongo_error(e, "Event", event.id.to_string()))?;

        Ok(())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| map_mongo_error(e, "Event", "*"))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| map_mongo_error(e, "Event", "*"))?;

        documents.into_iter().map(document_to_event).collect()
    }
}
