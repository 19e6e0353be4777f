/// Habit collection store
///
/// Owns the in-memory snapshot of every habit and is the only writer of the
/// durable and remote copies. Each mutation updates memory first, then
/// writes the full snapshot through; storage and sync failures are logged
/// and never undo the in-memory change.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::analytics::{AnalyticsEngine, AnalyticsEvent};
use crate::domain::{resolve_group, CompletionStatus, Habit, HabitId};
use crate::identity::{Identity, IdentitySource};
use crate::projection::{self, HabitSection};
use crate::storage::{KeyValueStore, SnapshotRepository};
use crate::sync::{DriveSync, RemoteSync};

/// In-memory state guarded by the store's lock
#[derive(Default)]
struct Snapshot {
    habits: Vec<Habit>,
    /// The durable snapshot has been read at least once
    loaded: bool,
    /// The last read failed; the stored value is backed up before it is overwritten
    unreadable: bool,
}

pub struct HabitStore<S> {
    repository: SnapshotRepository<S>,
    remote: Arc<dyn RemoteSync>,
    identity: Arc<dyn IdentitySource>,
    analytics: AnalyticsEngine,
    /// Held for the whole of each operation, so mutations never interleave
    state: Mutex<Snapshot>,
}

impl<S: KeyValueStore> HabitStore<S> {
    /// Create a store over `storage` for a guest session
    ///
    /// Nothing is read until the first operation, which loads the durable
    /// snapshot if [`HabitStore::load`] has not been called yet.
    pub fn new(storage: S) -> Self {
        Self {
            repository: SnapshotRepository::new(storage),
            remote: Arc::new(DriveSync::new()),
            identity: Arc::new(Identity::guest()),
            analytics: AnalyticsEngine::new(),
            state: Mutex::new(Snapshot::default()),
        }
    }

    pub fn with_remote_sync(mut self, remote: Arc<dyn RemoteSync>) -> Self {
        self.remote = remote;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentitySource>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_analytics(mut self, analytics: AnalyticsEngine) -> Self {
        self.analytics = analytics;
        self
    }

    /// Load the durable snapshot into memory
    ///
    /// On first run (the snapshot key has never been written) a sample
    /// habit is seeded and persisted. A stored empty collection stays empty.
    /// Read failures leave the store usable with an empty collection.
    pub async fn load(&self) -> Vec<Habit> {
        let mut state = self.state.lock().await;
        self.load_into(&mut state).await;
        state.habits.clone()
    }

    /// Create a habit and append it to the collection
    ///
    /// A name that is blank after trimming is refused: nothing changes and
    /// `None` is returned.
    pub async fn create(
        &self,
        name: &str,
        icon: &str,
        color: &str,
        group: Option<&str>,
    ) -> Option<Habit> {
        let mut habit = match Habit::new(name, icon, color, group) {
            Ok(habit) => habit,
            Err(e) => {
                debug!("Refusing to create habit: {}", e);
                return None;
            }
        };

        let mut state = self.lock_loaded().await;
        while state.habits.iter().any(|existing| existing.id == habit.id) {
            habit.id = HabitId::new();
        }

        state.habits.push(habit.clone());
        self.persist(&mut state).await;
        self.push_remote(&state.habits).await;

        info!("Created habit: {} ({})", habit.name, habit.id);
        self.analytics.record(AnalyticsEvent::HabitCreated {
            group: habit.group_name().to_string(),
        });
        Some(habit)
    }

    /// Replace the habit with the same id
    ///
    /// Returns false (and writes nothing) when the id is unknown. The stored
    /// creation time is kept and a blank group becomes "General". Updates
    /// are not pushed to remote sync.
    pub async fn update(&self, habit: Habit) -> bool {
        let mut state = self.lock_loaded().await;
        if !Self::replace(&mut state.habits, habit) {
            return false;
        }

        self.persist(&mut state).await;
        true
    }

    /// Advance one day of a habit through the completion cycle
    ///
    /// Returns the updated habit, or `None` if the id is unknown.
    pub async fn toggle_completion(&self, habit_id: &HabitId, date: NaiveDate) -> Option<Habit> {
        let mut state = self.lock_loaded().await;

        let toggled = state.habits.iter().find(|h| &h.id == habit_id)?.toggled(date);
        let status = toggled.status_on(date);
        Self::replace(&mut state.habits, toggled.clone());
        self.persist(&mut state).await;

        debug!(
            "Toggled {} on {}: {}",
            habit_id,
            date,
            status.map_or("unmarked", |s| s.as_str())
        );
        if status == Some(CompletionStatus::Done) {
            self.analytics.record(AnalyticsEvent::HabitCompleted {
                habit_id: habit_id.clone(),
            });
        }
        Some(toggled)
    }

    /// Remove a habit permanently
    ///
    /// Returns false (and writes nothing) when the id is unknown.
    pub async fn delete(&self, habit_id: &HabitId) -> bool {
        let mut state = self.lock_loaded().await;

        let before = state.habits.len();
        state.habits.retain(|h| &h.id != habit_id);
        if state.habits.len() == before {
            return false;
        }

        self.persist(&mut state).await;
        self.push_remote(&state.habits).await;

        info!("Deleted habit {}", habit_id);
        self.analytics.record(AnalyticsEvent::HabitDeleted {
            habit_id: habit_id.clone(),
        });
        true
    }

    /// Current snapshot
    pub async fn habits(&self) -> Vec<Habit> {
        self.lock_loaded().await.habits.clone()
    }

    pub async fn habit(&self, habit_id: &HabitId) -> Option<Habit> {
        self.lock_loaded()
            .await
            .habits
            .iter()
            .find(|h| &h.id == habit_id)
            .cloned()
    }

    /// Distinct group names in use, sorted
    pub async fn groups(&self) -> Vec<String> {
        projection::group_index(&self.lock_loaded().await.habits)
    }

    /// Groups to offer when creating a habit, always including "General"
    pub async fn group_choices(&self) -> Vec<String> {
        projection::group_choices(&self.lock_loaded().await.habits)
    }

    /// Habits matching `query`, bucketed by group
    pub async fn sections(&self, query: &str) -> Vec<HabitSection> {
        if !query.is_empty() {
            self.analytics.record(AnalyticsEvent::SearchUsed {
                query_length: query.chars().count(),
            });
        }
        projection::group_sections(&self.lock_loaded().await.habits, query)
    }

    pub fn repository(&self) -> &SnapshotRepository<S> {
        &self.repository
    }

    /// Lock the state, loading the durable snapshot first if nothing has
    /// been read yet
    async fn lock_loaded(&self) -> MutexGuard<'_, Snapshot> {
        let mut state = self.state.lock().await;
        if !state.loaded {
            self.load_into(&mut state).await;
        }
        state
    }

    async fn load_into(&self, state: &mut Snapshot) {
        state.loaded = true;
        match self.repository.read().await {
            Ok(Some(stored)) => {
                info!("Loaded {} habits", stored.len());
                state.habits = stored;
                state.unreadable = false;
            }
            Ok(None) => {
                info!("No stored habits, seeding sample habit");
                state.habits = vec![Habit::sample()];
                state.unreadable = false;
                self.persist(state).await;
            }
            Err(e) => {
                error!("Error reading habits, starting empty: {}", e);
                state.habits = Vec::new();
                state.unreadable = true;
            }
        }
    }

    fn replace(habits: &mut [Habit], mut habit: Habit) -> bool {
        match habits.iter_mut().find(|h| h.id == habit.id) {
            Some(slot) => {
                habit.created_at = slot.created_at;
                habit.group = Some(resolve_group(habit.group.as_deref()));
                *slot = habit;
                true
            }
            None => false,
        }
    }

    /// Write the snapshot through
    ///
    /// After a failed read the unreadable value is copied aside first; if
    /// that copy fails the write is skipped so the old value survives.
    async fn persist(&self, state: &mut Snapshot) {
        if state.unreadable {
            match self.repository.backup_raw().await {
                Ok(backed_up) => {
                    if backed_up {
                        warn!(
                            "Unreadable habits copied to {}",
                            self.repository.backup_key()
                        );
                    }
                    state.unreadable = false;
                }
                Err(e) => {
                    error!("Could not back up unreadable habits, not saving: {}", e);
                    return;
                }
            }
        }

        if let Err(e) = self.repository.write(&state.habits).await {
            error!("Error saving habits: {}", e);
        }
    }

    async fn push_remote(&self, habits: &[Habit]) {
        if !self.identity.current().syncs_remotely() {
            return;
        }
        if let Err(e) = self.remote.push_snapshot(habits).await {
            warn!("Remote sync failed, keeping local copy: {}", e);
        }
    }
}
