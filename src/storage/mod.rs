/// Storage layer for persisting habit data
///
/// Habits are persisted as one JSON snapshot under a fixed key of a durable
/// key-value store. This module defines that key-value interface, its
/// SQLite and in-memory implementations, and the snapshot repository that
/// encodes the collection.

pub mod sqlite;
pub mod memory;
pub mod migrations;
pub mod snapshot;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;
pub use snapshot::*;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Key under which the habit snapshot is stored
pub const HABITS_KEY: &str = "@streakpath_habits";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable string key-value storage
///
/// This trait allows us to swap SQLite for another backend (or an
/// in-memory map in tests) while keeping the same interface.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
