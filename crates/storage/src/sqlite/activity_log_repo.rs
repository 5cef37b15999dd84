use async_trait::async_trait;
use chrono::Utc;
use quiz_core::model::{ActivityLog, ActivityRecord};

use super::{
    SqliteRepository,
    mapping::{RECENT_ACTIVITY_KEY, decode_activity, encode_activity},
};
use crate::repository::{ActivityLogStore, StorageError};

#[async_trait]
impl ActivityLogStore for SqliteRepository {
    async fn append(&self, record: ActivityRecord) -> Result<(), StorageError> {
        // Read-modify-write of a single row; the lock keeps concurrent appends
        // from interleaving between the SELECT and the UPSERT. BEGIN IMMEDIATE
        // takes SQLite's reserved lock before the read, so other connections to
        // the same file wait on busy_timeout instead of failing the commit.
        let _guard = self.write_lock.lock().await;

        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT value FROM client_state WHERE key = ?1")
                .bind(RECENT_ACTIVITY_KEY)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut log = decode_activity(current.as_deref())?;
        let evicted = log.push(record);
        let value = encode_activity(&log)?;

        sqlx::query(
            r"
            INSERT INTO client_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(RECENT_ACTIVITY_KEY)
        .bind(value)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::debug!(len = log.len(), evicted, "activity record appended");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ActivityRecord>, StorageError> {
        let current: Option<String> =
            sqlx::query_scalar("SELECT value FROM client_state WHERE key = ?1")
                .bind(RECENT_ACTIVITY_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(decode_activity(current.as_deref())?.into_records())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let value = encode_activity(&ActivityLog::new())?;

        sqlx::query(
            r"
            INSERT INTO client_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(RECENT_ACTIVITY_KEY)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
