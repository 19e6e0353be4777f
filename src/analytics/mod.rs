/// Usage analytics
///
/// Events are named and carry a small JSON parameter bag. There is no
/// analytics backend; events are emitted through `tracing` under the
/// `streakpath::analytics` target so any subscriber can pick them up.

use serde_json::{json, Value};

use crate::domain::{HabitId, DEFAULT_GROUP};

/// Something worth counting that happened in the store
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    HabitCreated { group: String },
    HabitCompleted { habit_id: HabitId },
    HabitDeleted { habit_id: HabitId },
    SearchUsed { query_length: usize },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::HabitCreated { .. } => "habit_created",
            AnalyticsEvent::HabitCompleted { .. } => "habit_completed",
            AnalyticsEvent::HabitDeleted { .. } => "habit_deleted",
            AnalyticsEvent::SearchUsed { .. } => "search_used",
        }
    }

    pub fn params(&self) -> Value {
        match self {
            AnalyticsEvent::HabitCreated { group } => json!({
                "group": group,
                "has_group": !group.is_empty() && group != DEFAULT_GROUP,
            }),
            AnalyticsEvent::HabitCompleted { habit_id } => json!({ "habit_id": habit_id }),
            AnalyticsEvent::HabitDeleted { habit_id } => json!({ "habit_id": habit_id }),
            AnalyticsEvent::SearchUsed { query_length } => json!({ "query_length": query_length }),
        }
    }
}

/// Analytics recorder
pub struct AnalyticsEngine {
    enabled: bool,
}

impl AnalyticsEngine {
    /// Create a new analytics recorder
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// A recorder that drops every event
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record(&self, event: AnalyticsEvent) {
        if !self.enabled {
            return;
        }
        tracing::debug!(
            target: "streakpath::analytics",
            event = event.name(),
            params = %event.params(),
            "analytics event"
        );
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
