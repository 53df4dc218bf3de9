use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime state of a countdown unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownState {
    /// Not counting; remaining seconds hold their last value
    #[default]
    Idle,
    /// Decrementing once per tick
    Running,
    /// Reached zero and signalled; only a reset leaves this state
    Expired,
}

impl CountdownState {
    /// Check if this unit participates in tick passes
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check if this unit has finished its countdown
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for CountdownState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "running" => Ok(Self::Running),
            "expired" => Ok(Self::Expired),
            _ => Err(format!("Invalid countdown state: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_classification() {
        assert!(CountdownState::Running.is_active());
        assert!(!CountdownState::Idle.is_active());
        assert!(!CountdownState::Expired.is_active());

        assert!(CountdownState::Expired.is_terminal());
        assert!(!CountdownState::Running.is_terminal());
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(CountdownState::default(), CountdownState::Idle);
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(CountdownState::Running.to_string(), "running");
        assert_eq!(
            "expired".parse::<CountdownState>().unwrap(),
            CountdownState::Expired
        );
        assert!("paused".parse::<CountdownState>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&CountdownState::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
    }
}
