use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use super::{KeyValueStore, StoreChange, StoreError, CHANGE_CHANNEL_CAPACITY};

/// Process-local store; contents are lost on restart.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    changes: broadcast::Sender<StoreChange>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(HashMap::new()),
            changes,
        }
    }

    fn notify(&self, change: StoreChange) {
        // No receivers is fine.
        let _ = self.changes.send(change);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.notify(StoreChange::Set(key.to_string()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.entries.write().await.remove(key);
        if removed.is_some() {
            self.notify(StoreChange::Removed(key.to_string()));
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
