/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like HabitId, Frequency and
/// CompletionStatus that are used by Habit and the collection store.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Group assigned to habits created without one
pub const DEFAULT_GROUP: &str = "General";

/// Colors offered when creating a habit
pub const COLOR_PALETTE: [&str; 8] = [
    "#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#6366f1", "#8b5cf6", "#ec4899", "#94a3b8",
];

/// Unique identifier for a habit
///
/// New habits get a random UUID, but any string is accepted when loading so
/// that snapshots written by older clients (e.g. "sample-1") stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier
    pub fn from_string(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How often a habit should be performed
///
/// Only `Daily` is produced at creation time; `Weekly` exists so that
/// snapshots carrying it still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

/// Status recorded for a habit on one calendar day
///
/// "Unmarked" is not a variant: it is represented by the absence of an
/// entry, so a stored status can never be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Done,
    Fail,
    Skip,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Done => "done",
            CompletionStatus::Fail => "fail",
            CompletionStatus::Skip => "skip",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glyphs a habit can be drawn with
///
/// Habits store their icon as a free-form name. Lookups go through
/// [`HabitIcon::resolve`], which never fails: unknown names map to `Circle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HabitIcon {
    Activity,
    Apple,
    Moon,
    Book,
    Coffee,
    Heart,
    Smile,
    Sun,
    /// Fallback for names outside the known set
    Circle,
}

impl HabitIcon {
    /// Icons offered when creating a habit, in picker order
    pub const CHOICES: [HabitIcon; 8] = [
        HabitIcon::Activity,
        HabitIcon::Apple,
        HabitIcon::Moon,
        HabitIcon::Book,
        HabitIcon::Coffee,
        HabitIcon::Heart,
        HabitIcon::Smile,
        HabitIcon::Sun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HabitIcon::Activity => "Activity",
            HabitIcon::Apple => "Apple",
            HabitIcon::Moon => "Moon",
            HabitIcon::Book => "Book",
            HabitIcon::Coffee => "Coffee",
            HabitIcon::Heart => "Heart",
            HabitIcon::Smile => "Smile",
            HabitIcon::Sun => "Sun",
            HabitIcon::Circle => "Circle",
        }
    }

    /// Look up a stored icon name, falling back to `Circle`
    pub fn resolve(name: &str) -> Self {
        Self::CHOICES
            .iter()
            .copied()
            .find(|icon| icon.name() == name)
            .unwrap_or(HabitIcon::Circle)
    }
}
