//! # Countdown Runtime Units
//!
//! Runtime state for timer steps: the [`CountdownUnit`] created per timer
//! step at batch start, its lifecycle [`CountdownState`], and the grouping
//! scan that assigns contiguous concurrent steps a shared group id. Units
//! mutate an owned copy of their step, never the schedule itself.

pub mod grouping;
pub mod state;
pub mod unit;

pub use grouping::group_schedule;
pub use state::CountdownState;
pub use unit::{CountdownSnapshot, CountdownUnit, TickOutcome};
