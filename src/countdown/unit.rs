//! Runtime countdown units and their observable snapshots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::CountdownState;
use crate::display::{GeometryContext, ProgressGeometry};
use crate::process::ProcessStep;

/// What a single tick did to a running unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Remaining seconds went down by one; the unit keeps running.
    Decremented,
    /// Remaining was already zero; the unit transitioned to expired.
    Expired,
}

/// One live countdown, created from a timer step at batch start.
///
/// The unit owns a copy of its step so runtime mutation (added minutes,
/// resets) never touches the schedule the batch was built from. The `id` is
/// a fresh UUID distinct from the step id; `group_id` names the concurrent
/// run the unit belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownUnit {
    pub id: String,
    pub group_id: String,
    pub step: ProcessStep,
    pub remaining_seconds: u32,
    pub state: CountdownState,
    /// UI expand/collapse flag, orthogonal to `state`.
    pub visible: bool,
    pub geometry: ProgressGeometry,
}

/// Value published to a unit's observers on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub unit_id: String,
    pub group_id: String,
    pub state: CountdownState,
    pub remaining_seconds: u32,
    pub geometry: ProgressGeometry,
}

impl CountdownUnit {
    /// Build an idle unit from a timer step, full duration remaining.
    pub fn from_step(step: &ProcessStep, group_id: impl Into<String>, ctx: &GeometryContext) -> Self {
        let remaining = step.duration_seconds();
        Self {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.into(),
            step: step.clone(),
            remaining_seconds: remaining,
            state: CountdownState::Idle,
            visible: true,
            geometry: ctx.compute(remaining, remaining),
        }
    }

    /// Nominal duration of the unit's owned step, in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.step.duration_seconds()
    }

    /// Current observable value for this unit.
    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            unit_id: self.id.clone(),
            group_id: self.group_id.clone(),
            state: self.state,
            remaining_seconds: self.remaining_seconds,
            geometry: self.geometry.clone(),
        }
    }

    fn refresh_geometry(&mut self, ctx: &GeometryContext) {
        self.geometry = ctx.compute(self.remaining_seconds, self.total_seconds());
    }

    /// Begin counting down from the current remaining value.
    pub fn start(&mut self, ctx: &GeometryContext) {
        self.state = CountdownState::Running;
        self.refresh_geometry(ctx);
    }

    /// Pause the countdown; remaining seconds are untouched.
    pub fn stop(&mut self, ctx: &GeometryContext) {
        self.state = CountdownState::Idle;
        self.refresh_geometry(ctx);
    }

    /// Extend both the nominal duration and the remaining time by one
    /// minute, in any state.
    pub fn add_minute(&mut self, ctx: &GeometryContext) {
        self.step.duration_minutes += 1;
        self.remaining_seconds += 60;
        self.refresh_geometry(ctx);
    }

    /// Return to idle with a new full duration.
    pub fn reset(&mut self, ctx: &GeometryContext, new_duration_minutes: u32) {
        self.state = CountdownState::Idle;
        self.step.duration_minutes = new_duration_minutes;
        self.remaining_seconds = new_duration_minutes * 60;
        self.refresh_geometry(ctx);
    }

    /// Flip the expand/collapse flag.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Apply one tick to a running unit.
    ///
    /// A positive remaining value decrements by exactly one regardless of
    /// how late the tick arrives; a zero remaining value transitions the
    /// unit to expired. Callers skip units that are not running.
    pub fn advance(&mut self, ctx: &GeometryContext) -> TickOutcome {
        let outcome = if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            TickOutcome::Decremented
        } else {
            self.state = CountdownState::Expired;
            TickOutcome::Expired
        };
        self.refresh_geometry(ctx);
        outcome
    }

    /// Check whether the current remaining value sits on a sub-interval
    /// boundary of the unit's split configuration.
    pub fn on_interval_boundary(&self) -> bool {
        if self.step.split_interval <= 1 {
            return false;
        }
        let interval = self.total_seconds() / self.step.split_interval;
        interval > 0 && self.remaining_seconds % interval == 0
    }
}
