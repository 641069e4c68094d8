//! Persistent key-value storage
//!
//! The cache manager only needs three operations over string keys and string
//! values. [`KeyValueStore`] captures that capability; the backend is chosen
//! once, when the store is constructed:
//!
//! - [`FileStore`]: one file per key in the platform data directory
//! - [`MemoryStore`]: process-local map, for hosts without a writable data directory
//!
//! Stores do not retry and offer no transactions.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend is not usable in this environment
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value; `Ok(None)` if the key does not exist
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes a value; removing a missing key succeeds
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Picks the backend for the current host
///
/// Uses a [`FileStore`] under the XDG data directory when one can be resolved,
/// otherwise an in-memory store that lasts for the life of the process.
pub fn select_store() -> Arc<dyn KeyValueStore> {
    match FileStore::new() {
        Some(store) => {
            debug!(dir = %store.dir().display(), "Using file store");
            Arc::new(store)
        }
        None => {
            debug!("No data directory available, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}
