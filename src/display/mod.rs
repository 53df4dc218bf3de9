//! # Display-State Derivation
//!
//! Pure derivation of the visual fields a renderer consumes: progress-ring
//! arc geometry, font-size tiers, and formatted duration text. Nothing in
//! this module holds state; everything is a function of remaining and total
//! seconds plus the display configuration injected once at construction.

pub mod format;
pub mod geometry;

pub use format::{format_duration, format_minutes_verbose};
pub use geometry::{GeometryContext, ProgressGeometry};
