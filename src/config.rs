//! Configuration for the timer core.
//!
//! All values are fixed at scheduler construction and shared by every
//! countdown unit; nothing here is re-configurable per unit. Environment
//! overrides use the `BREWTIMER_` prefix and fail loudly on malformed
//! values instead of silently falling back.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimerError};

/// Root configuration for the timer core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewTimerConfig {
    /// Progress-ring geometry and typography shared by all units.
    pub display: DisplayConfig,

    /// Tick cadence and signal channel sizing.
    pub tick: TickConfig,
}

/// Display parameters injected once and shared by all units' geometry
/// computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Radius of the progress ring, in pixels.
    pub circle_radius: f64,

    /// Stroke width of the progress ring, in pixels.
    pub stroke_width: f64,

    /// Width of the countdown display area, in pixels. Font-size tiers are
    /// derived from this.
    pub display_width: f64,

    /// Font family used for the countdown text.
    pub font_family: String,

    /// Countdown text color.
    pub font_color: String,

    /// Accent color forwarded to platform notifications.
    pub color_tag: String,
}

/// Tick driver parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Milliseconds between tick passes. The countdown model assumes one
    /// second; this is exposed so tests can drive the loop faster.
    pub interval_ms: u64,

    /// Capacity of the expiry/interval signal broadcast channel.
    pub signal_capacity: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            circle_radius: 45.0,
            stroke_width: 10.0,
            display_width: 150.0,
            font_family: "Helvetica Neue".to_string(),
            font_color: "#f4f4f4".to_string(),
            color_tag: "#e8b23c".to_string(),
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            signal_capacity: 1000,
        }
    }
}

impl Default for BrewTimerConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            tick: TickConfig::default(),
        }
    }
}

impl BrewTimerConfig {
    /// Build configuration from defaults plus `BREWTIMER_`-prefixed
    /// environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(radius) = std::env::var("BREWTIMER_CIRCLE_RADIUS") {
            config.display.circle_radius = radius.parse().map_err(|e| {
                TimerError::Configuration(format!("Invalid circle_radius: {e}"))
            })?;
        }

        if let Ok(width) = std::env::var("BREWTIMER_DISPLAY_WIDTH") {
            config.display.display_width = width.parse().map_err(|e| {
                TimerError::Configuration(format!("Invalid display_width: {e}"))
            })?;
        }

        if let Ok(interval) = std::env::var("BREWTIMER_TICK_INTERVAL_MS") {
            config.tick.interval_ms = interval.parse().map_err(|e| {
                TimerError::Configuration(format!("Invalid tick interval_ms: {e}"))
            })?;
        }

        if let Ok(capacity) = std::env::var("BREWTIMER_SIGNAL_CAPACITY") {
            config.tick.signal_capacity = capacity.parse().map_err(|e| {
                TimerError::Configuration(format!("Invalid signal_capacity: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate invariants the geometry and driver code rely on.
    pub fn validate(&self) -> Result<()> {
        if self.display.circle_radius <= 0.0 {
            return Err(TimerError::Configuration(
                "circle_radius must be positive".to_string(),
            ));
        }
        if self.display.display_width <= 0.0 {
            return Err(TimerError::Configuration(
                "display_width must be positive".to_string(),
            ));
        }
        if self.tick.interval_ms == 0 {
            return Err(TimerError::Configuration(
                "tick interval_ms must be positive".to_string(),
            ));
        }
        if self.tick.signal_capacity == 0 {
            return Err(TimerError::Configuration(
                "signal_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BrewTimerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick.interval_ms, 1000);
        assert!(config.display.circle_radius > 0.0);
    }

    #[test]
    fn test_validation_rejects_zero_radius() {
        let mut config = BrewTimerConfig::default();
        config.display.circle_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(TimerError::Configuration(_))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let mut config = BrewTimerConfig::default();
        config.tick.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = BrewTimerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BrewTimerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
