//! # Countdown Registry
//!
//! Concurrent in-memory registry of live countdown units, keyed by batch id.
//! Each batch owns an ordered list of unit slots; a slot couples the unit
//! with the watch channel its observers subscribe to. All mutation funnels
//! through the registry so every change publishes a fresh snapshot.

pub mod batch_registry;

pub use batch_registry::{BatchSummary, CountdownRegistry};
