//! Structured error handling for the timer core.
//!
//! Registry lookup failures are surfaced as typed errors, never panics;
//! callers in the presentation layer decide user feedback. Duplicate batch
//! registration and removal of an absent batch are defined no-ops and do not
//! appear here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// No batch is registered under the given identifier.
    #[error("batch not found: {batch_id}")]
    BatchNotFound { batch_id: String },

    /// The batch exists but holds no countdown unit with the given id.
    #[error("countdown unit not found: {unit_id} (batch {batch_id})")]
    UnitNotFound { batch_id: String, unit_id: String },

    /// An operation was attempted against a component in the wrong lifecycle
    /// state (e.g. starting a tick driver twice).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A graceful shutdown did not complete within its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TimerError {
    /// Convenience constructor for batch lookup failures.
    pub fn batch_not_found(batch_id: impl Into<String>) -> Self {
        Self::BatchNotFound {
            batch_id: batch_id.into(),
        }
    }

    /// Convenience constructor for unit lookup failures.
    pub fn unit_not_found(batch_id: impl Into<String>, unit_id: impl Into<String>) -> Self {
        Self::UnitNotFound {
            batch_id: batch_id.into(),
            unit_id: unit_id.into(),
        }
    }

    /// Check whether this error represents a registry lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BatchNotFound { .. } | Self::UnitNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, TimerError>;
