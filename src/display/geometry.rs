//! Progress-ring geometry and font sizing.

use serde::{Deserialize, Serialize};

use super::format::format_duration;
use crate::config::DisplayConfig;

/// Precomputed display constants shared by every countdown unit.
///
/// Built once from [`DisplayConfig`] at scheduler construction; the
/// circumference never changes afterwards, so per-tick geometry is two
/// multiplications and a format call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryContext {
    circumference: f64,
    display_width: f64,
}

/// Visual fields a renderer consumes for one countdown unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressGeometry {
    /// SVG dash offset for the progress ring. Zero means a full ring,
    /// the full circumference means an empty one.
    pub stroke_dash_offset: f64,

    /// CSS font-size string, e.g. `"30px"`.
    pub font_size: String,

    /// Compact countdown text, e.g. `"1:01:01"`.
    pub display_text: String,
}

impl GeometryContext {
    /// Derive the ring circumference and text sizing base from display
    /// configuration.
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            circumference: 2.0 * std::f64::consts::PI * display.circle_radius,
            display_width: display.display_width,
        }
    }

    /// Full ring circumference in pixels.
    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    /// Compute the renderer-facing fields for a unit at `remaining_seconds`
    /// out of `total_seconds`.
    ///
    /// The dash offset is proportional to elapsed time: a freshly started
    /// unit offsets by zero (full ring) and a finished one by the whole
    /// circumference. `total_seconds` of zero yields a non-finite offset;
    /// schedules are validated upstream so that case never reaches here.
    pub fn compute(&self, remaining_seconds: u32, total_seconds: u32) -> ProgressGeometry {
        let fraction = f64::from(remaining_seconds) / f64::from(total_seconds);
        ProgressGeometry {
            stroke_dash_offset: self.circumference - fraction * self.circumference,
            font_size: self.font_size_for(remaining_seconds),
            display_text: format_duration(remaining_seconds),
        }
    }

    /// Pick the font-size tier for the current remaining time.
    ///
    /// Longer texts get smaller type: above an hour the text carries three
    /// fields, above a minute two, otherwise one.
    fn font_size_for(&self, remaining_seconds: u32) -> String {
        let divisor = if remaining_seconds > 3600 {
            5.0
        } else if remaining_seconds > 60 {
            4.0
        } else {
            3.0
        };
        format!("{}px", self.display_width / divisor)
    }
}
