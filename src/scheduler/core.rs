//! Tick engine and per-unit countdown operations.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::config::BrewTimerConfig;
use crate::countdown::{group_schedule, CountdownSnapshot, TickOutcome};
use crate::display::GeometryContext;
use crate::error::Result;
use crate::events::{SignalKind, SignalPublisher, TimerSignal};
use crate::process::ProcessStep;
use crate::registry::CountdownRegistry;

/// Counters accumulated across the scheduler's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub ticks_processed: u64,
    pub units_advanced: u64,
    pub expiry_signals: u64,
    pub interval_signals: u64,
}

/// Advances every running countdown on a shared clock and applies per-unit
/// operations.
///
/// The scheduler owns no clock of its own; a driver calls [`tick`] once per
/// second. Every mutation republishes the affected unit's snapshot, and
/// expiry/interval conditions raise signals on the shared publisher.
///
/// [`tick`]: TickScheduler::tick
#[derive(Debug)]
pub struct TickScheduler {
    registry: Arc<CountdownRegistry>,
    publisher: SignalPublisher,
    geometry: GeometryContext,
    stats: RwLock<SchedulerStats>,
}

impl TickScheduler {
    /// Build a scheduler over the given registry, with geometry and signal
    /// capacity fixed from configuration.
    pub fn new(config: &BrewTimerConfig, registry: Arc<CountdownRegistry>) -> Self {
        Self {
            registry,
            publisher: SignalPublisher::new(config.tick.signal_capacity),
            geometry: GeometryContext::new(&config.display),
            stats: RwLock::new(SchedulerStats::default()),
        }
    }

    /// The registry this scheduler advances.
    pub fn registry(&self) -> &Arc<CountdownRegistry> {
        &self.registry
    }

    /// Subscribe to expiry and interval signals.
    pub fn subscribe_signals(&self) -> broadcast::Receiver<TimerSignal> {
        self.publisher.subscribe()
    }

    /// Convert a schedule into countdown units and register them under the
    /// batch id. A batch that is already registered keeps its units.
    pub fn start_batch(&self, batch_id: impl Into<String>, schedule: &[ProcessStep]) {
        let batch_id = batch_id.into();
        let units = group_schedule(schedule, &self.geometry);
        info!(
            batch_id = %batch_id,
            unit_count = units.len(),
            "Starting batch"
        );
        self.registry.add_batch(batch_id, units);
    }

    /// Drop a batch and all of its units; their observers see channels
    /// close. Ending an unknown batch is a no-op.
    pub fn end_batch(&self, batch_id: &str) {
        info!(batch_id = %batch_id, "Ending batch");
        self.registry.remove_batch(batch_id);
    }

    /// One tick pass over every running unit in every batch.
    ///
    /// A unit with remaining time decrements by exactly one second; a unit
    /// already at zero transitions to expired and raises an expiry signal.
    /// A decremented unit whose new remaining value sits on a sub-interval
    /// boundary raises an interval signal. Units that are not running are
    /// untouched, as is the rest of the registry.
    pub fn tick(&self) {
        let mut advanced = 0u64;
        let mut expiries = 0u64;
        let mut intervals = 0u64;

        self.registry.for_each_running(|batch_id, unit| {
            advanced += 1;
            match unit.advance(&self.geometry) {
                TickOutcome::Expired => {
                    expiries += 1;
                    debug!(batch_id = %batch_id, unit_id = %unit.id, "Unit expired");
                    self.publisher
                        .publish(TimerSignal::for_unit(batch_id, unit, SignalKind::Expiry));
                }
                TickOutcome::Decremented => {
                    if unit.on_interval_boundary() {
                        intervals += 1;
                        debug!(
                            batch_id = %batch_id,
                            unit_id = %unit.id,
                            remaining = unit.remaining_seconds,
                            "Unit crossed interval boundary"
                        );
                        self.publisher
                            .publish(TimerSignal::for_unit(batch_id, unit, SignalKind::Interval));
                    }
                }
            }
        });

        let mut stats = self.stats.write();
        stats.ticks_processed += 1;
        stats.units_advanced += advanced;
        stats.expiry_signals += expiries;
        stats.interval_signals += intervals;
    }

    /// Begin counting a unit down from its current remaining value.
    pub fn start(&self, batch_id: &str, unit_id: &str) -> Result<CountdownSnapshot> {
        self.registry
            .with_unit_mut(batch_id, unit_id, |unit| unit.start(&self.geometry))
    }

    /// Pause a unit; remaining seconds are untouched.
    pub fn stop(&self, batch_id: &str, unit_id: &str) -> Result<CountdownSnapshot> {
        self.registry
            .with_unit_mut(batch_id, unit_id, |unit| unit.stop(&self.geometry))
    }

    /// Extend a unit's duration and remaining time by one minute.
    pub fn add_minute(&self, batch_id: &str, unit_id: &str) -> Result<CountdownSnapshot> {
        self.registry
            .with_unit_mut(batch_id, unit_id, |unit| unit.add_minute(&self.geometry))
    }

    /// Return a unit to idle with a new full duration.
    pub fn reset(
        &self,
        batch_id: &str,
        unit_id: &str,
        new_duration_minutes: u32,
    ) -> Result<CountdownSnapshot> {
        self.registry.with_unit_mut(batch_id, unit_id, |unit| {
            unit.reset(&self.geometry, new_duration_minutes)
        })
    }

    /// Flip a unit's expand/collapse flag.
    pub fn toggle_visibility(&self, batch_id: &str, unit_id: &str) -> Result<CountdownSnapshot> {
        self.registry
            .with_unit_mut(batch_id, unit_id, |unit| unit.toggle_visibility())
    }

    /// Current counter values.
    pub fn stats(&self) -> SchedulerStats {
        *self.stats.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::CountdownState;
    use crate::events::SignalKind;

    fn scheduler() -> TickScheduler {
        TickScheduler::new(
            &BrewTimerConfig::default(),
            Arc::new(CountdownRegistry::new()),
        )
    }

    fn hop_schedule() -> Vec<ProcessStep> {
        vec![
            ProcessStep::timer("boil", "Boil", 90, false, 1),
            ProcessStep::timer("hop1", "First hops", 5, true, 1),
            ProcessStep::timer("hop2", "Second hops", 10, true, 2),
        ]
    }

    fn unit_id(scheduler: &TickScheduler, batch_id: &str, step_id: &str) -> String {
        scheduler
            .registry()
            .find_by_batch(batch_id)
            .unwrap()
            .units
            .iter()
            .find(|u| u.step.id == step_id)
            .unwrap()
            .id
            .clone()
    }

    #[test]
    fn test_start_batch_registers_grouped_units() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());

        let summary = scheduler.registry().find_by_batch("batch-1").unwrap();
        assert_eq!(summary.units.len(), 3);
        assert_eq!(summary.units[1].group_id, "hop1");
        assert_eq!(summary.units[2].group_id, "hop1");
    }

    #[test]
    fn test_tick_advances_only_running_units() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let boil = unit_id(&scheduler, "batch-1", "boil");
        let hop1 = unit_id(&scheduler, "batch-1", "hop1");

        scheduler.start("batch-1", &boil).unwrap();
        scheduler.tick();

        let running = scheduler.registry().find_unit("batch-1", &boil).unwrap();
        assert_eq!(running.remaining_seconds, 90 * 60 - 1);

        let idle = scheduler.registry().find_unit("batch-1", &hop1).unwrap();
        assert_eq!(idle.remaining_seconds, 5 * 60);
        assert_eq!(idle.state, CountdownState::Idle);
    }

    #[test]
    fn test_unit_expires_one_tick_after_reaching_zero() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let hop1 = unit_id(&scheduler, "batch-1", "hop1");
        scheduler.start("batch-1", &hop1).unwrap();

        for _ in 0..300 {
            scheduler.tick();
        }
        let at_zero = scheduler.registry().find_unit("batch-1", &hop1).unwrap();
        assert_eq!(at_zero.remaining_seconds, 0);
        assert_eq!(at_zero.state, CountdownState::Running);

        scheduler.tick();
        let expired = scheduler.registry().find_unit("batch-1", &hop1).unwrap();
        assert_eq!(expired.state, CountdownState::Expired);
        assert_eq!(expired.remaining_seconds, 0);

        // Further ticks leave the expired unit alone.
        scheduler.tick();
        let still = scheduler.registry().find_unit("batch-1", &hop1).unwrap();
        assert_eq!(still, expired);
    }

    #[tokio::test]
    async fn test_expiry_signal_emitted_once() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let hop1 = unit_id(&scheduler, "batch-1", "hop1");
        let mut signals = scheduler.subscribe_signals();

        scheduler.start("batch-1", &hop1).unwrap();
        for _ in 0..302 {
            scheduler.tick();
        }

        let signal = signals.recv().await.unwrap();
        assert_eq!(signal.kind, SignalKind::Expiry);
        assert_eq!(signal.unit_id, hop1);
        assert_eq!(signal.remaining_seconds, 0);
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_interval_signals_at_split_boundaries() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let hop2 = unit_id(&scheduler, "batch-1", "hop2");
        let mut signals = scheduler.subscribe_signals();

        // 600 s split in two: interval signals at remaining 300 and 0.
        scheduler.start("batch-1", &hop2).unwrap();
        for _ in 0..600 {
            scheduler.tick();
        }

        let first = signals.recv().await.unwrap();
        assert_eq!(first.kind, SignalKind::Interval);
        assert_eq!(first.remaining_seconds, 300);

        let second = signals.recv().await.unwrap();
        assert_eq!(second.kind, SignalKind::Interval);
        assert_eq!(second.remaining_seconds, 0);

        assert!(signals.try_recv().is_err());
    }

    #[test]
    fn test_operations_report_not_found() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());

        assert!(scheduler.start("batch-2", "u").unwrap_err().is_not_found());
        assert!(scheduler
            .add_minute("batch-1", "no-such-unit")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_reset_and_add_minute_through_scheduler() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let hop1 = unit_id(&scheduler, "batch-1", "hop1");

        let snap = scheduler.add_minute("batch-1", &hop1).unwrap();
        assert_eq!(snap.remaining_seconds, 6 * 60);

        let snap = scheduler.reset("batch-1", &hop1, 3).unwrap();
        assert_eq!(snap.remaining_seconds, 180);
        assert_eq!(snap.state, CountdownState::Idle);
    }

    #[test]
    fn test_toggle_visibility_republishes() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let hop1 = unit_id(&scheduler, "batch-1", "hop1");

        scheduler.toggle_visibility("batch-1", &hop1).unwrap();
        let unit = scheduler.registry().find_unit("batch-1", &hop1).unwrap();
        assert!(!unit.visible);
    }

    #[test]
    fn test_stats_accumulate() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        let hop1 = unit_id(&scheduler, "batch-1", "hop1");
        scheduler.start("batch-1", &hop1).unwrap();

        for _ in 0..301 {
            scheduler.tick();
        }

        let stats = scheduler.stats();
        assert_eq!(stats.ticks_processed, 301);
        assert_eq!(stats.units_advanced, 301);
        assert_eq!(stats.expiry_signals, 1);
        assert_eq!(stats.interval_signals, 0);
    }

    #[test]
    fn test_end_batch_removes_units() {
        let scheduler = scheduler();
        scheduler.start_batch("batch-1", &hop_schedule());
        scheduler.end_batch("batch-1");
        assert!(scheduler.registry().find_by_batch("batch-1").is_none());
        // Ending again is harmless.
        scheduler.end_batch("batch-1");
    }
}
