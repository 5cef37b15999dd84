use async_trait::async_trait;
use quiz_core::model::{ActivityLog, ActivityRecord, recent_first};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable, capacity-bounded answer history.
///
/// Implementations keep at most `ACTIVITY_LOG_CAPACITY` records and evict the
/// oldest first. Readers get a snapshot; they re-read when they want fresh data.
#[async_trait]
pub trait ActivityLogStore: Send + Sync {
    /// Append a record, evicting from the front past capacity.
    ///
    /// The record is committed before this returns, and concurrent appends
    /// from the same process never lose each other's writes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append(&self, record: ActivityRecord) -> Result<(), StorageError>;

    /// All stored records in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read or decoded.
    async fn read_all(&self) -> Result<Vec<ActivityRecord>, StorageError>;

    /// Remove every stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;

    /// The last `n` records, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read.
    async fn recent(&self, n: usize) -> Result<Vec<ActivityRecord>, StorageError> {
        let records = self.read_all().await?;
        Ok(recent_first(&records, n))
    }
}

/// Simple in-memory activity log for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryActivityLog {
    log: Arc<Mutex<ActivityLog>>,
}

impl InMemoryActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the log with existing records (trimmed to capacity).
    #[must_use]
    pub fn with_records(records: Vec<ActivityRecord>) -> Self {
        Self {
            log: Arc::new(Mutex::new(ActivityLog::from_records(records))),
        }
    }
}

#[async_trait]
impl ActivityLogStore for InMemoryActivityLog {
    async fn append(&self, record: ActivityRecord) -> Result<(), StorageError> {
        let mut guard = self
            .log
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record);
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ActivityRecord>, StorageError> {
        let guard = self
            .log
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.records().to_vec())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .log
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = ActivityLog::new();
        Ok(())
    }
}

/// Aggregates storage ports behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub activity: Arc<dyn ActivityLogStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let activity: Arc<dyn ActivityLogStore> = Arc::new(InMemoryActivityLog::new());
        Self { activity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::ACTIVITY_LOG_CAPACITY;

    fn record(n: usize) -> ActivityRecord {
        ActivityRecord::new(format!("Q{n}"), n % 3, "A", n % 2 == 0, "t")
    }

    #[tokio::test]
    async fn append_is_bounded_and_fifo() {
        let repo = InMemoryActivityLog::new();
        for n in 0..25 {
            repo.append(record(n)).await.unwrap();
        }
        let all = repo.read_all().await.unwrap();
        assert_eq!(all.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(all[0].question_text, "Q5");
        assert_eq!(all.last().unwrap().question_text, "Q24");
    }

    #[tokio::test]
    async fn recent_reads_newest_first_without_mutation() {
        let repo = InMemoryActivityLog::with_records((0..4).map(record).collect());
        let recent = repo.recent(2).await.unwrap();
        assert_eq!(recent[0].question_text, "Q3");
        assert_eq!(recent[1].question_text, "Q2");
        assert_eq!(repo.read_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let repo = InMemoryActivityLog::new();
        let mut handles = Vec::new();
        for n in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.append(record(n)).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(repo.read_all().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let storage = Storage::in_memory();
        storage.activity.append(record(1)).await.unwrap();
        storage.activity.clear().await.unwrap();
        assert!(storage.activity.read_all().await.unwrap().is_empty());
    }
}
