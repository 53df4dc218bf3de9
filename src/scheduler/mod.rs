//! # Tick Scheduling
//!
//! The shared-clock engine: [`TickScheduler`] applies one-second passes and
//! per-unit operations over the registry, and [`TickDriver`] owns the
//! periodic loop that invokes it. Splitting the engine from the loop keeps
//! tick semantics synchronous and directly testable.

pub mod core;
pub mod driver;

pub use self::core::{SchedulerStats, TickScheduler};
pub use driver::TickDriver;
