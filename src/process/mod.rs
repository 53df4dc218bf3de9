//! # Process Schedule Definitions
//!
//! Immutable brewing-process schedule types and index navigation over them.
//! A schedule is an ordered list of [`ProcessStep`]s owned by a batch; the
//! countdown runtime consumes it read-only.

pub mod navigation;
pub mod step;

pub use navigation::{next_index, Direction};
pub use step::{ProcessStep, StepKind};
