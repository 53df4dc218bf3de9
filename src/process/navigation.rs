//! Index navigation over a process schedule.
//!
//! A maximal run of contiguous concurrent timer steps is presented and
//! completed as a single logical step, so navigating from inside a run lands
//! on the first step outside it while the underlying schedule stays flat.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::step::ProcessStep;

/// Navigation direction through a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Prev => write!(f, "prev"),
        }
    }
}

/// Compute the schedule index a user should land on next.
///
/// The reference index is `batch_step_index` (the batch's persisted current
/// step) when `on_complete` is true, since completion always advances from
/// the authoritative position rather than the preview position; otherwise it
/// is `current_index`. If the referenced step is concurrent, the scan returns the
/// first step in `direction` that is not concurrent; otherwise the adjacent
/// index. Returns `None` at either boundary.
pub fn next_index(
    schedule: &[ProcessStep],
    current_index: usize,
    batch_step_index: usize,
    on_complete: bool,
    direction: Direction,
) -> Option<usize> {
    let reference = if on_complete {
        batch_step_index
    } else {
        current_index
    };
    let step = schedule.get(reference)?;

    if step.concurrent {
        match direction {
            Direction::Next => schedule
                .iter()
                .enumerate()
                .skip(reference + 1)
                .find(|(_, s)| !s.concurrent)
                .map(|(i, _)| i),
            Direction::Prev => schedule[..reference]
                .iter()
                .enumerate()
                .rev()
                .find(|(_, s)| !s.concurrent)
                .map(|(i, _)| i),
        }
    } else {
        match direction {
            Direction::Next => {
                let next = reference + 1;
                (next < schedule.len()).then_some(next)
            }
            Direction::Prev => reference.checked_sub(1),
        }
    }
}
