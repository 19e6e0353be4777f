/// Public library interface for the StreakPath habit tracker core
///
/// This module exports the habit model, the collection store and its
/// storage and sync collaborators, plus a small facade that wires them
/// together over a SQLite database.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod identity;
mod projection;
mod store;
mod sync;

// Re-export public modules and types
pub use domain::*;
pub use storage::{
    KeyValueStore, MemoryKvStore, SnapshotRepository, SqliteKvStore, StorageError, HABITS_KEY,
};
pub use analytics::{AnalyticsEngine, AnalyticsEvent};
pub use identity::{Identity, IdentitySource, SessionIdentity};
pub use projection::{group_choices, group_index, group_sections, matches_query, HabitSection};
pub use store::HabitStore;
pub use sync::{DriveSync, RemoteSync, SyncError};

/// Errors that can occur while opening or driving the app
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),
}

/// Habit tracker backed by a SQLite database file
///
/// Opening runs migrations and loads the habit snapshot, so the store is
/// ready to use as soon as this returns.
pub struct StreakPath {
    store: HabitStore<SqliteKvStore>,
}

impl StreakPath {
    pub async fn open(
        db_path: PathBuf,
        identity: Arc<dyn IdentitySource>,
    ) -> Result<Self, AppError> {
        tracing::info!("Opening StreakPath with database: {:?}", db_path);

        let storage = SqliteKvStore::new(db_path)?;
        let store = HabitStore::new(storage)
            .with_identity(identity)
            .with_remote_sync(Arc::new(DriveSync::new()));

        let habits = store.load().await;
        tracing::info!("Ready, found {} habits", habits.len());

        Ok(Self { store })
    }

    pub fn store(&self) -> &HabitStore<SqliteKvStore> {
        &self.store
    }
}
