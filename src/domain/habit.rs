/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with its per-day completion map.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{next_status, CompletionStatus, DomainError, Frequency, HabitIcon, HabitId, DEFAULT_GROUP};

/// Identifier of the habit seeded on first run
pub const SAMPLE_HABIT_ID: &str = "sample-1";

/// A habit represents something the user wants to do regularly
///
/// The serialized form uses camelCase field names and stores `createdAt` as
/// milliseconds since the epoch, so the persisted snapshot matches what
/// the mobile client writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    /// Icon name; not validated, see [`HabitIcon::resolve`]
    pub icon: String,
    /// Hex color, not validated
    pub color: String,
    /// When this habit was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub frequency: Frequency,
    /// Status per calendar day; a missing day is unmarked
    #[serde(default)]
    pub completions: BTreeMap<NaiveDate, CompletionStatus>,
    /// Display group; `None` only for habits written by older clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The name is trimmed and must not be empty. A blank or missing group
    /// becomes "General".
    pub fn new(
        name: &str,
        icon: &str,
        color: &str,
        group: Option<&str>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: Utc::now().trunc_subsecs(3),
            frequency: Frequency::Daily,
            completions: BTreeMap::new(),
            group: Some(resolve_group(group)),
        })
    }

    /// The habit seeded into an empty collection on first run
    pub fn sample() -> Self {
        Self {
            id: HabitId::from_string(SAMPLE_HABIT_ID),
            name: "Daily Meditation".to_string(),
            icon: HabitIcon::Activity.name().to_string(),
            color: "#6366f1".to_string(),
            created_at: Utc::now().trunc_subsecs(3),
            frequency: Frequency::Daily,
            completions: BTreeMap::new(),
            group: Some("Wellness".to_string()),
        }
    }

    /// Group used for display and bucketing
    pub fn group_name(&self) -> &str {
        match self.group.as_deref() {
            Some(group) if !group.is_empty() => group,
            _ => DEFAULT_GROUP,
        }
    }

    pub fn icon_glyph(&self) -> HabitIcon {
        HabitIcon::resolve(&self.icon)
    }

    /// Status recorded for a day, `None` when unmarked
    pub fn status_on(&self, date: NaiveDate) -> Option<CompletionStatus> {
        self.completions.get(&date).copied()
    }

    /// Copy of this habit with one day's status set or cleared
    pub fn with_status(&self, date: NaiveDate, status: Option<CompletionStatus>) -> Self {
        let mut completions = self.completions.clone();
        match status {
            Some(status) => {
                completions.insert(date, status);
            }
            None => {
                completions.remove(&date);
            }
        }

        Self {
            completions,
            ..self.clone()
        }
    }

    /// Copy of this habit with one day advanced through the completion cycle
    pub fn toggled(&self, date: NaiveDate) -> Self {
        self.with_status(date, next_status(self.status_on(date)))
    }

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trim a requested group, defaulting blank or missing values to "General"
pub fn resolve_group(group: Option<&str>) -> String {
    match group.map(str::trim) {
        Some(group) if !group.is_empty() => group.to_string(),
        _ => DEFAULT_GROUP.to_string(),
    }
}

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_day(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s)))
}

/// Today's calendar day in UTC
pub fn today() -> NaiveDate {
    Utc::now().naive_utc().date()
}

/// Reject days after `today`; future days cannot be marked
pub fn validate_markable_day(date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    if date > today {
        return Err(DomainError::InvalidDate(
            "Cannot mark habits for future dates".to_string(),
        ));
    }
    Ok(())
}
