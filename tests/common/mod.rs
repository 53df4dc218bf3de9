//! Shared fixtures for integration tests.

use std::sync::Arc;

use brewtimer_core::config::BrewTimerConfig;
use brewtimer_core::process::ProcessStep;
use brewtimer_core::registry::CountdownRegistry;
use brewtimer_core::scheduler::TickScheduler;

/// A representative brew-day schedule: manual prep, a mash rest, then a
/// boil with a run of concurrent hop additions, closed by manual and
/// calendar steps.
pub fn brew_day_schedule() -> Vec<ProcessStep> {
    vec![
        ProcessStep::manual("strike", "Heat strike water"),
        ProcessStep::timer("mash", "Mash rest", 60, false, 1),
        ProcessStep::timer("boil", "Boil", 90, false, 1),
        ProcessStep::timer("hop1", "First hop addition", 5, true, 1),
        ProcessStep::timer("hop2", "Second hop addition", 10, true, 2),
        ProcessStep::timer("whirlfloc", "Whirlfloc tablet", 15, true, 1),
        ProcessStep::manual("flameout", "Flameout and chill"),
        ProcessStep::calendar("ferment", "Primary fermentation", 14 * 24 * 60),
    ]
}

/// Scheduler plus its registry with default configuration.
pub fn scheduler_fixture() -> (Arc<CountdownRegistry>, TickScheduler) {
    let registry = Arc::new(CountdownRegistry::new());
    let scheduler = TickScheduler::new(&BrewTimerConfig::default(), Arc::clone(&registry));
    (registry, scheduler)
}

/// Resolve the runtime unit id created for a schedule step.
pub fn unit_id_for(registry: &CountdownRegistry, batch_id: &str, step_id: &str) -> String {
    registry
        .find_by_batch(batch_id)
        .expect("batch should be registered")
        .units
        .iter()
        .find(|unit| unit.step.id == step_id)
        .expect("step should have a unit")
        .id
        .clone()
}
