/// Drive app-data sync
///
/// Placeholder backend: the Drive REST integration does not exist yet, so
/// pushes are dropped and pulls find nothing. Both log a warning.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Habit;
use crate::sync::{RemoteSync, SyncError};

#[derive(Debug, Default)]
pub struct DriveSync {
    pushes: AtomicUsize,
}

impl DriveSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots handed to this backend so far
    pub fn push_count(&self) -> usize {
        self.pushes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RemoteSync for DriveSync {
    async fn push_snapshot(&self, habits: &[Habit]) -> Result<(), SyncError> {
        self.pushes.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            "Drive sync: push_snapshot not implemented, {} habits stay local",
            habits.len()
        );
        Ok(())
    }

    async fn pull_snapshot(&self) -> Result<Option<Vec<Habit>>, SyncError> {
        tracing::warn!("Drive sync: pull_snapshot not implemented");
        Ok(None)
    }
}
