//! # Timer Signal Publishing
//!
//! Broadcast fan-out of expiry and interval signals raised by tick passes.
//! Publishing never blocks and tolerates having no subscribers; consumers
//! that care (notification frontends, loggers) subscribe and filter.

pub mod publisher;

pub use publisher::{SignalKind, SignalPublisher, TimerSignal};
