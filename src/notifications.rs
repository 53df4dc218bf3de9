//! Running-count notification summary.
//!
//! Built on demand when the hosting application backgrounds, never per
//! tick. The summary aggregates across every registered batch.

use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::registry::CountdownRegistry;

/// Payload a platform notification frontend renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSummary {
    pub title: String,
    pub text: String,
    /// True when the notification should not chime; the per-unit expiry
    /// signals carry the audible alerts.
    pub silent: bool,
    pub color_tag: String,
}

/// Count running units across all batches and build the summary text.
pub fn summarize(registry: &CountdownRegistry, display: &DisplayConfig) -> NotificationSummary {
    let count = registry.running_unit_count();
    NotificationSummary {
        title: "Brew Timer".to_string(),
        text: format!("{count} timers running"),
        silent: true,
        color_tag: display.color_tag.clone(),
    }
}
