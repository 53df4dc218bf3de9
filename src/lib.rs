#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Brew Timer Core
//!
//! High-performance Rust core for brew-day process timing: countdown
//! scheduling, concurrent step grouping, and display-state derivation.
//!
//! ## Overview
//!
//! A brewing companion turns a recipe into a linear process schedule: heat
//! strike water, mash for an hour, boil with a series of hop additions,
//! then hand the batch over to the fermentation calendar. This crate is the
//! runtime beneath that flow. It converts the schedule's timer steps into
//! countdown units, groups contiguous concurrent steps (hop additions
//! running inside the boil) so they present as one logical step, advances
//! every running countdown on a shared once-per-second clock, and derives
//! the display state a renderer consumes.
//!
//! ## Architecture
//!
//! The crate is deliberately free of I/O: all state lives in an in-memory
//! registry, mutation funnels through the scheduler, and observers learn of
//! changes through channels.
//!
//! - [`process`] - Immutable schedule definitions and index navigation
//! - [`countdown`] - Runtime units, their states, and the grouping scan
//! - [`registry`] - Concurrent batch registry with per-unit observers
//! - [`scheduler`] - Tick engine, per-unit operations, and the 1 Hz driver
//! - [`events`] - Expiry/interval signal fan-out
//! - [`display`] - Progress-ring geometry and duration formatting
//! - [`notifications`] - Running-count summary for backgrounded hosts
//! - [`config`] - Display and tick configuration with env overrides
//! - [`error`] - Structured error handling
//! - [`logging`] - Environment-aware structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use brewtimer_core::config::BrewTimerConfig;
//! use brewtimer_core::process::ProcessStep;
//! use brewtimer_core::registry::CountdownRegistry;
//! use brewtimer_core::scheduler::TickScheduler;
//!
//! let config = BrewTimerConfig::default();
//! let registry = Arc::new(CountdownRegistry::new());
//! let scheduler = TickScheduler::new(&config, Arc::clone(&registry));
//!
//! let schedule = vec![
//!     ProcessStep::manual("strike", "Heat strike water"),
//!     ProcessStep::timer("mash", "Mash rest", 60, false, 1),
//!     ProcessStep::timer("boil", "Boil", 90, false, 1),
//!     ProcessStep::timer("hop1", "First hop addition", 60, true, 1),
//! ];
//! scheduler.start_batch("pale-ale-7", &schedule);
//!
//! let units = registry.find_by_batch("pale-ale-7").unwrap().units;
//! scheduler.start("pale-ale-7", &units[0].id).unwrap();
//! scheduler.tick();
//! assert_eq!(
//!     registry.find_unit("pale-ale-7", &units[0].id).unwrap().remaining_seconds,
//!     60 * 60 - 1,
//! );
//! ```
//!
//! In production the tick comes from a [`scheduler::TickDriver`] running on
//! the tokio runtime rather than manual calls.

pub mod config;
pub mod countdown;
pub mod display;
pub mod error;
pub mod events;
pub mod logging;
pub mod notifications;
pub mod process;
pub mod registry;
pub mod scheduler;

pub use config::{BrewTimerConfig, DisplayConfig, TickConfig};
pub use countdown::{group_schedule, CountdownSnapshot, CountdownState, CountdownUnit};
pub use display::{format_duration, format_minutes_verbose, GeometryContext, ProgressGeometry};
pub use error::{Result, TimerError};
pub use events::{SignalKind, SignalPublisher, TimerSignal};
pub use notifications::{summarize, NotificationSummary};
pub use process::{next_index, Direction, ProcessStep, StepKind};
pub use registry::{BatchSummary, CountdownRegistry};
pub use scheduler::{SchedulerStats, TickDriver, TickScheduler};
