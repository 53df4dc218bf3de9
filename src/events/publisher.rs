use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::countdown::CountdownUnit;

/// Kind of signal a tick pass can raise for a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// The unit's countdown reached its end
    Expiry,
    /// The unit crossed a sub-interval boundary while still running
    Interval,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expiry => write!(f, "expiry"),
            Self::Interval => write!(f, "interval"),
        }
    }
}

/// Signal raised when a unit expires or crosses an interval boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSignal {
    pub batch_id: String,
    pub unit_id: String,
    pub group_id: String,
    pub kind: SignalKind,
    pub remaining_seconds: u32,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl TimerSignal {
    /// Build a signal for a unit in the given batch, stamped now.
    pub fn for_unit(batch_id: impl Into<String>, unit: &CountdownUnit, kind: SignalKind) -> Self {
        Self {
            batch_id: batch_id.into(),
            unit_id: unit.id.clone(),
            group_id: unit.group_id.clone(),
            kind,
            remaining_seconds: unit.remaining_seconds,
            published_at: chrono::Utc::now(),
        }
    }
}

/// Fan-out publisher for expiry and interval signals
#[derive(Debug, Clone)]
pub struct SignalPublisher {
    sender: broadcast::Sender<TimerSignal>,
}

impl SignalPublisher {
    /// Create a new publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a signal to all current subscribers.
    ///
    /// Signals are fire-and-forget: a send with zero subscribers is not an
    /// error, the signal is simply dropped.
    pub fn publish(&self, signal: TimerSignal) {
        let _ = self.sender.send(signal);
    }

    /// Subscribe to signals published from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<TimerSignal> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SignalPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}
