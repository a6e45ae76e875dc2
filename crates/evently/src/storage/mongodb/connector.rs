//! Fail-fast MongoDB connector.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use evently_core::storage::{Connector, EventStore, Result};

use super::error::map_connection_error;
use super::repository::MongoEventRepository;
use crate::config::{Config, DEFAULT_DATABASE_NAME};

/// Connects to MongoDB and hands out an [`EventStore`].
///
/// The driver never buffers operations for an unreachable server, but it
/// does wait for server selection. The connector bounds that wait and pings
/// the server before returning, so a dead database surfaces as a connection
/// error on the first request instead of a hung one.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    database_name: Option<String>,
    server_selection_timeout: Duration,
}

impl MongoConnector {
    pub fn new(database_name: Option<String>, server_selection_timeout: Duration) -> Self {
        Self {
            database_name,
            server_selection_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.mongodb_database.clone(),
            config.server_selection_timeout(),
        )
    }

    fn select_database(&self, client: &Client) -> Database {
        match &self.database_name {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
        }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = EventStore;

    async fn connect(&self, uri: &str) -> Result<EventStore> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(map_connection_error)?;
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.app_name = Some("evently".to_string());

        let client = Client::with_options(options).map_err(map_connection_error)?;
        let database = self.select_database(&client);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_connection_error)?;

        tracing::debug!(database = %database.name(), "MongoDB ping succeeded");

        let repository = MongoEventRepository::new(&database);
        ensure_indexes_best_effort(repository.ensure_indexes()).await;

        Ok(Arc::new(repository))
    }
}

/// Runs index creation, logging a failure instead of returning it.
///
/// Returns true if the indexes are in place.
async fn ensure_indexes_best_effort<F>(ensure: F) -> bool
where
    F: Future<Output = Result<()>>,
{
    match ensure.await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Could not create event indexes; listing will run unindexed");
            false
        }
    }
}
