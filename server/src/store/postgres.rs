use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::broadcast;

use super::{KeyValueStore, StoreChange, StoreError, CHANGE_CHANNEL_CAPACITY};

/// Store backed by the `kv_entries` table.
///
/// Change notifications only cover writes made through this instance.
pub struct PgKeyValueStore {
    pool: PgPool,
    changes: broadcast::Sender<StoreChange>,
}

impl PgKeyValueStore {
    pub fn new(pool: PgPool) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, changes }
    }
}

#[async_trait]
impl KeyValueStore for PgKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        let _ = self.changes.send(StoreChange::Set(key.to_string()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM kv_entries WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            let _ = self.changes.send(StoreChange::Removed(key.to_string()));
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
