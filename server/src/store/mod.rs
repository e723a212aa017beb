//! Key-value persistence for the single-user workspace.
//!
//! Every piece of client state (society drafts, preference counters, interest
//! toggles, the demo login) lives under one of the [`keys`] as a JSON value.
//! Writes are last-write-wins and broadcast to subscribers.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{error, warn};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgKeyValueStore;

pub mod keys {
    pub const MANAGED_EVENTS: &str = "manage-events:v1";
    pub const PREFERENCES: &str = "event-preferences:v1";
    pub const AUTH_ROLE: &str = "auth:role";
    pub const AUTH_TOKEN: &str = "authToken";
    pub const INTERESTED_EVENTS: &str = "interested-events:v1";
}

/// Capacity of the change broadcast; slow subscribers skip older changes.
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error")]
    Backend(#[from] sqlx::Error),

    #[error("Failed to encode value for key '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Set(String),
    Removed(String),
}

impl StoreChange {
    pub fn key(&self) -> &str {
        match self {
            StoreChange::Set(key) | StoreChange::Removed(key) => key,
        }
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}

/// Reads a JSON value, returning `None` when the key is absent.
///
/// Backend failures and undecodable values are logged and treated as absent.
pub async fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            error!(error = ?e, key, "Failed to read from storage");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, key, "Discarding unreadable stored value");
            None
        }
    }
}

/// Like [`read_json`], falling back to `T::default()`.
pub async fn read_json_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    read_json(store, key).await.unwrap_or_default()
}

pub async fn write_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}
