/// Snapshot encoding of the habit collection
///
/// The whole collection is one JSON array stored under [`HABITS_KEY`].
/// Callers only see `read` and `write`, so a staging step could be added
/// here later without touching the store.

use crate::domain::Habit;
use crate::storage::{KeyValueStore, StorageError, HABITS_KEY};

pub struct SnapshotRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, HABITS_KEY)
    }

    /// Use a custom key (e.g. one snapshot per profile)
    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    /// Read the stored snapshot
    ///
    /// `Ok(None)` means the key has never been written, which is different
    /// from a stored empty array.
    pub async fn read(&self) -> Result<Option<Vec<Habit>>, StorageError> {
        match self.storage.get(&self.key).await? {
            Some(json) => {
                let habits: Vec<Habit> = serde_json::from_str(&json)?;
                Ok(Some(habits))
            }
            None => Ok(None),
        }
    }

    /// Replace the stored snapshot
    pub async fn write(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let json = serde_json::to_string(habits)?;
        self.storage.set(&self.key, &json).await
    }

    /// Copy the raw stored value to `<key>.corrupt`
    ///
    /// Returns false when there is nothing stored under the key.
    pub async fn backup_raw(&self) -> Result<bool, StorageError> {
        match self.storage.get(&self.key).await? {
            Some(raw) => {
                self.storage.set(&self.backup_key(), &raw).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }
}
