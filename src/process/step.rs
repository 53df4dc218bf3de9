use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a process step within a brewing schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Manual instruction the brewer confirms by hand
    Manual,
    /// Fixed-duration countdown step
    Timer,
    /// Long-horizon step tracked on a calendar (days/weeks)
    Calendar,
}

impl StepKind {
    /// Check if this kind carries a duration
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Timer | Self::Calendar)
    }

    /// Check if this kind produces a runtime countdown unit
    pub fn is_timer(&self) -> bool {
        matches!(self, Self::Timer)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Timer => write!(f, "timer"),
            Self::Calendar => write!(f, "calendar"),
        }
    }
}

impl std::str::FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "timer" => Ok(Self::Timer),
            "calendar" => Ok(Self::Calendar),
            _ => Err(format!("Invalid step kind: {s}")),
        }
    }
}

/// One item of a brewing procedure, immutable once the schedule is built.
///
/// `duration_minutes` is meaningful for timed kinds only; `concurrent` and
/// `split_interval` apply to [`StepKind::Timer`] steps only. Schedules with
/// zero-duration timed steps are an input-validation concern of the
/// collaborator that builds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Stable identity within the schedule
    pub id: String,
    pub kind: StepKind,
    pub name: String,
    pub description: String,
    /// Nominal duration for Timer/Calendar kinds
    pub duration_minutes: u32,
    /// True if this Timer step runs in parallel with its schedule-adjacent
    /// siblings
    pub concurrent: bool,
    /// Number of equal sub-intervals that each raise an interval signal;
    /// 1 means none
    pub split_interval: u32,
}

impl ProcessStep {
    /// Create a manual instruction step
    pub fn manual(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: StepKind::Manual,
            name: name.into(),
            description: String::new(),
            duration_minutes: 0,
            concurrent: false,
            split_interval: 1,
        }
    }

    /// Create a fixed-duration timer step
    pub fn timer(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_minutes: u32,
        concurrent: bool,
        split_interval: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind: StepKind::Timer,
            name: name.into(),
            description: String::new(),
            duration_minutes,
            concurrent,
            split_interval,
        }
    }

    /// Create a long-horizon calendar step
    pub fn calendar(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind: StepKind::Calendar,
            name: name.into(),
            description: String::new(),
            duration_minutes,
            concurrent: false,
            split_interval: 1,
        }
    }

    /// Attach a description (e.g. text derived from the chemistry library)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Nominal duration in seconds
    pub fn duration_seconds(&self) -> u32 {
        self.duration_minutes * 60
    }
}
