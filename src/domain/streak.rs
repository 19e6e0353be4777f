/// Streak calculation and monthly progress figures
///
/// This module derives progress statistics from a habit's completion map:
/// the current and longest run of done days, a completion rate, and the
/// per-month counts shown next to the calendar.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionStatus, DomainError, Habit, HabitId};

/// Calculated streak information for a habit
///
/// A `done` day extends a run, a `skip` day is neutral, and a `fail` or
/// unmarked day ends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Current run of done days, ending today or yesterday
    pub current_streak: u32,
    /// Best run ever recorded
    pub longest_streak: u32,
    /// Most recent done day (None if never completed)
    pub last_completed: Option<NaiveDate>,
    /// Total number of done days
    pub total_completions: u32,
    /// Done days over tracked days (0.0 to 1.0)
    pub completion_rate: f64,
}

impl Streak {
    /// Create a new streak record with zero values
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
            total_completions: 0,
            completion_rate: 0.0,
        }
    }

    /// Calculate streak information from a habit's completions as of `today`
    ///
    /// Days after `today` are ignored.
    pub fn calculate(habit: &Habit, today: NaiveDate) -> Self {
        let done_days: Vec<NaiveDate> = habit
            .completions
            .iter()
            .filter(|(date, status)| **date <= today && **status == CompletionStatus::Done)
            .map(|(date, _)| *date)
            .collect();

        if done_days.is_empty() {
            return Self::new(habit.id.clone());
        }

        let current_streak = Self::calculate_current_streak(habit, today);
        let longest_streak = Self::calculate_longest_streak(habit, today);

        Self {
            habit_id: habit.id.clone(),
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_completed: done_days.last().copied(),
            total_completions: done_days.len() as u32,
            completion_rate: Self::calculate_completion_rate(habit, done_days.len(), today),
        }
    }

    /// Walk backwards from today (or yesterday if today is still unmarked)
    fn calculate_current_streak(habit: &Habit, today: NaiveDate) -> u32 {
        let mut checking_date = today;
        if habit.status_on(today).is_none() {
            checking_date = today - Duration::days(1);
        }

        let first_tracked = match habit.completions.keys().next() {
            Some(first) => *first,
            None => return 0,
        };

        let mut current_streak = 0;
        while checking_date >= first_tracked {
            match habit.status_on(checking_date) {
                Some(CompletionStatus::Done) => current_streak += 1,
                Some(CompletionStatus::Skip) => {}
                Some(CompletionStatus::Fail) | None => break,
            }
            checking_date = checking_date - Duration::days(1);
        }

        current_streak
    }

    fn calculate_longest_streak(habit: &Habit, today: NaiveDate) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;

        // completions iterate in date order
        for (date, status) in habit.completions.iter().filter(|(date, _)| **date <= today) {
            let contiguous = previous.map_or(true, |prev| *date - prev == Duration::days(1));
            if !contiguous {
                run = 0;
            }

            match status {
                CompletionStatus::Done => {
                    run += 1;
                    longest = longest.max(run);
                }
                CompletionStatus::Skip => {}
                CompletionStatus::Fail => run = 0,
            }
            previous = Some(*date);
        }

        longest
    }

    /// Done days over every day from the first tracked day to today
    fn calculate_completion_rate(habit: &Habit, done: usize, today: NaiveDate) -> f64 {
        let created = habit.created_at.naive_utc().date();
        let first_mark = habit.completions.keys().next().copied().unwrap_or(created);
        let start = created.min(first_mark);

        let tracked_days = (today - start).num_days() + 1;
        if tracked_days <= 0 {
            return 0.0;
        }

        (done as f64 / tracked_days as f64).clamp(0.0, 1.0)
    }
}

/// Counts of marked days in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Month in `YYYY-MM` form
    pub month: String,
    pub done: u32,
    pub fail: u32,
    pub skip: u32,
    /// Number of marked days in the month
    pub total: u32,
}

impl MonthSummary {
    pub fn for_month(habit: &Habit, year: i32, month: u32) -> Self {
        let mut summary = Self {
            month: format!("{:04}-{:02}", year, month),
            done: 0,
            fail: 0,
            skip: 0,
            total: 0,
        };

        for (_, status) in habit
            .completions
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
        {
            match status {
                CompletionStatus::Done => summary.done += 1,
                CompletionStatus::Fail => summary.fail += 1,
                CompletionStatus::Skip => summary.skip += 1,
            }
            summary.total += 1;
        }

        summary
    }
}

/// Parse a `YYYY-MM` month into (year, month)
pub fn parse_month(s: &str) -> Result<(i32, u32), DomainError> {
    let invalid = || DomainError::InvalidMonth(format!("'{}' is not a YYYY-MM month", s));

    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok((year, month))
}
