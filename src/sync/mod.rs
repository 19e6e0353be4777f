/// Remote snapshot sync
///
/// Signed-in users mirror their habit snapshot to a remote backend. The
/// store treats every sync failure as non-fatal: it is logged and the local
/// operation carries on.

pub mod drive;

pub use drive::DriveSync;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Habit;

/// Errors that can occur while talking to a remote backend
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Remote transport error: {0}")]
    Transport(String),
}

/// Capability to push and pull whole habit snapshots
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// Upload the full collection, replacing the remote copy
    async fn push_snapshot(&self, habits: &[Habit]) -> Result<(), SyncError>;

    /// Download the remote collection, `None` if nothing is stored remotely
    async fn pull_snapshot(&self) -> Result<Option<Vec<Habit>>, SyncError>;
}
