#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{ActivityLogStore, InMemoryActivityLog, Storage, StorageError};
pub use sqlite::{SqliteInitError, SqliteRepository};
