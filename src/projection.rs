/// Grouped and filtered views of the habit collection
///
/// Everything here is recomputed from the current snapshot on each call.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{Habit, DEFAULT_GROUP};

/// One titled bucket of habits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitSection {
    pub title: String,
    pub habits: Vec<Habit>,
}

/// Whether a habit matches a search query
///
/// Case-insensitive substring match on the name or the stored group. An
/// empty query matches everything.
pub fn matches_query(habit: &Habit, query: &str) -> bool {
    let query = query.to_lowercase();
    habit.name.to_lowercase().contains(&query)
        || habit
            .group
            .as_deref()
            .map_or(false, |group| group.to_lowercase().contains(&query))
}

/// Filter habits by `query` and bucket them by group
///
/// Sections are ordered by group name (ordinal string order); habits keep
/// their order from `habits`. No matches yields no sections.
pub fn group_sections(habits: &[Habit], query: &str) -> Vec<HabitSection> {
    let mut buckets: BTreeMap<&str, Vec<Habit>> = BTreeMap::new();

    for habit in habits.iter().filter(|habit| matches_query(habit, query)) {
        buckets
            .entry(habit.group_name())
            .or_default()
            .push(habit.clone());
    }

    buckets
        .into_iter()
        .map(|(title, habits)| HabitSection {
            title: title.to_string(),
            habits,
        })
        .collect()
}

/// Distinct non-empty group names across the whole collection, sorted
pub fn group_index(habits: &[Habit]) -> Vec<String> {
    habits
        .iter()
        .filter_map(|habit| habit.group.as_deref())
        .filter(|group| !group.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Groups offered when creating a habit: the index plus "General"
pub fn group_choices(habits: &[Habit]) -> Vec<String> {
    let mut choices: BTreeSet<String> = group_index(habits).into_iter().collect();
    choices.insert(DEFAULT_GROUP.to_string());
    choices.into_iter().collect()
}
