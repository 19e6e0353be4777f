/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, Streak) and their
/// validation rules, plus the completion cycle that drives day toggling.

pub mod habit;
pub mod cycle;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use cycle::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),
}
