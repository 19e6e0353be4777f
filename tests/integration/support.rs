/// Test doubles for the store's collaborators
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use streakpath::*;

/// Key-value store whose reads and writes can be made to fail
#[derive(Default)]
pub struct FlakyKvStore {
    inner: MemoryKvStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub writes: AtomicUsize,
}

impl FlakyKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_reads() -> Self {
        let store = Self::default();
        store.fail_reads.store(true, Ordering::SeqCst);
        store
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FlakyKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated read failure".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated write failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}

/// Remote sync that remembers every pushed snapshot
#[derive(Default)]
pub struct RecordingSync {
    pub pushed: Mutex<Vec<Vec<Habit>>>,
    pub fail: AtomicBool,
}

impl RecordingSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let sync = Self::default();
        sync.fail.store(true, Ordering::SeqCst);
        sync
    }

    pub fn push_count(&self) -> usize {
        self.pushed.lock().unwrap().len()
    }

    pub fn last_push(&self) -> Option<Vec<Habit>> {
        self.pushed.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RemoteSync for RecordingSync {
    async fn push_snapshot(&self, habits: &[Habit]) -> Result<(), SyncError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SyncError::Transport("simulated outage".to_string()));
        }
        self.pushed.lock().unwrap().push(habits.to_vec());
        Ok(())
    }

    async fn pull_snapshot(&self) -> Result<Option<Vec<Habit>>, SyncError> {
        Ok(self.last_push())
    }
}
