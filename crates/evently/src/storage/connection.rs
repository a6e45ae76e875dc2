//! Process-wide connection cache.
//!
//! The first caller of [`ConnectionCache::acquire`] validates the configured
//! URI and runs the connector; every later caller gets the cached handle
//! without I/O. Concurrent callers that arrive while a connection attempt is
//! in flight wait for that attempt instead of starting their own. A failed
//! attempt is not cached, so the next call retries.

use std::sync::Arc;

use tokio::sync::OnceCell;

use evently_core::storage::{Connector, RepositoryError, Result};

/// Lazily connected, memoized handle to a store.
pub struct ConnectionCache<H> {
    connector: Arc<dyn Connector<Handle = H>>,
    uri: Option<String>,
    handle: OnceCell<H>,
}

impl<H> ConnectionCache<H>
where
    H: Clone + Send + Sync,
{
    /// Creates an empty cache. Nothing is validated or connected until the
    /// first [`acquire`](Self::acquire).
    pub fn new(connector: Arc<dyn Connector<Handle = H>>, uri: Option<String>) -> Self {
        Self {
            connector,
            uri,
            handle: OnceCell::new(),
        }
    }

    /// Returns the cached handle, connecting first if needed.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Configuration` if no URI is configured. The
    ///   connector is not called.
    /// - Whatever the connector returns if the connection attempt fails.
    pub async fn acquire(&self) -> Result<H> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle.clone());
        }

        let handle = self.handle.get_or_try_init(|| self.connect()).await?;

        Ok(handle.clone())
    }

    async fn connect(&self) -> Result<H> {
        let uri = self.uri.as_deref().ok_or_else(|| {
            RepositoryError::Configuration(
                "Please define the MONGODB_URI environment variable".to_string(),
            )
        })?;

        tracing::info!("Connecting to database");
        match self.connector.connect(uri).await {
            Ok(handle) => {
                tracing::info!("Database connection established");
                Ok(handle)
            }
            Err(err) => {
                tracing::error!(error = %err, "Database connection failed");
                Err(err)
            }
        }
    }

    /// Returns true once a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }
}
