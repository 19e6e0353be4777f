/// Completion cycling for a single (habit, day) cell
///
/// Each tap on a day advances its status one step around a fixed cycle:
/// unmarked -> done -> fail -> skip -> unmarked.

use crate::domain::CompletionStatus;

/// Compute the status a day moves to when it is toggled
///
/// `None` means unmarked. A `None` result tells the caller to remove the
/// entry rather than store an empty status.
pub fn next_status(current: Option<CompletionStatus>) -> Option<CompletionStatus> {
    match current {
        None => Some(CompletionStatus::Done),
        Some(CompletionStatus::Done) => Some(CompletionStatus::Fail),
        Some(CompletionStatus::Fail) => Some(CompletionStatus::Skip),
        Some(CompletionStatus::Skip) => None,
    }
}
