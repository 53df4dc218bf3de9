//! Conversion of a schedule into runtime units with concurrent grouping.

use super::unit::CountdownUnit;
use crate::display::GeometryContext;
use crate::process::ProcessStep;

/// Convert a schedule's timer steps into idle countdown units, assigning
/// group ids to maximal contiguous runs of concurrent steps.
///
/// Single forward scan. A timer step joins the open run only when both it
/// and the run are concurrent; a non-concurrent timer step, a non-timer
/// step, or the end of the schedule closes the run. Each run's group id is
/// the step id of its first member, so a lone concurrent step forms a
/// singleton group under its own id and non-concurrent steps group with
/// themselves.
pub fn group_schedule(schedule: &[ProcessStep], ctx: &GeometryContext) -> Vec<CountdownUnit> {
    let mut units = Vec::new();
    let mut open_run: Option<String> = None;

    for step in schedule {
        if !step.kind.is_timer() {
            open_run = None;
            continue;
        }

        let group_id = if step.concurrent {
            open_run.get_or_insert_with(|| step.id.clone()).clone()
        } else {
            open_run = None;
            step.id.clone()
        };

        units.push(CountdownUnit::from_step(step, group_id, ctx));
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::countdown::CountdownState;

    fn ctx() -> GeometryContext {
        GeometryContext::new(&DisplayConfig::default())
    }

    #[test]
    fn test_empty_schedule_yields_no_units() {
        assert!(group_schedule(&[], &ctx()).is_empty());
    }

    #[test]
    fn test_non_timer_steps_are_skipped() {
        let schedule = vec![
            ProcessStep::manual("prep", "Sanitize"),
            ProcessStep::calendar("ferment", "Primary fermentation", 20160),
        ];
        assert!(group_schedule(&schedule, &ctx()).is_empty());
    }

    #[test]
    fn test_sequential_timers_group_alone() {
        let schedule = vec![
            ProcessStep::timer("mash", "Mash rest", 60, false, 1),
            ProcessStep::timer("boil", "Boil", 90, false, 1),
        ];
        let units = group_schedule(&schedule, &ctx());
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].group_id, "mash");
        assert_eq!(units[1].group_id, "boil");
    }

    #[test]
    fn test_concurrent_run_shares_first_step_id() {
        let schedule = vec![
            ProcessStep::timer("boil", "Boil", 90, false, 1),
            ProcessStep::timer("hop1", "First hops", 60, true, 1),
            ProcessStep::timer("hop2", "Second hops", 30, true, 1),
            ProcessStep::timer("whirlfloc", "Whirlfloc", 15, true, 1),
        ];
        let units = group_schedule(&schedule, &ctx());
        assert_eq!(units.len(), 4);
        assert_eq!(units[0].group_id, "boil");
        assert_eq!(units[1].group_id, "hop1");
        assert_eq!(units[2].group_id, "hop1");
        assert_eq!(units[3].group_id, "hop1");
    }

    #[test]
    fn test_non_timer_step_closes_a_run() {
        let schedule = vec![
            ProcessStep::timer("hop1", "First hops", 60, true, 1),
            ProcessStep::manual("check", "Check gravity"),
            ProcessStep::timer("hop2", "Second hops", 30, true, 1),
        ];
        let units = group_schedule(&schedule, &ctx());
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].group_id, "hop1");
        assert_eq!(units[1].group_id, "hop2");
    }

    #[test]
    fn test_lone_concurrent_step_is_singleton_group() {
        let schedule = vec![ProcessStep::timer("dryhop", "Dry hop", 10, true, 1)];
        let units = group_schedule(&schedule, &ctx());
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].group_id, "dryhop");
    }

    #[test]
    fn test_units_start_idle_with_full_duration() {
        let schedule = vec![ProcessStep::timer("boil", "Boil", 90, false, 1)];
        let units = group_schedule(&schedule, &ctx());
        assert_eq!(units[0].state, CountdownState::Idle);
        assert_eq!(units[0].remaining_seconds, 90 * 60);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_schedule() -> impl Strategy<Value = Vec<ProcessStep>> {
            prop::collection::vec((0..3u8, any::<bool>(), 1..180u32), 0..12).prop_map(|specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (kind, concurrent, duration))| {
                        let id = format!("s{i}");
                        match kind {
                            0 => ProcessStep::manual(id, "step"),
                            1 => ProcessStep::timer(id, "step", duration, concurrent, 1),
                            _ => ProcessStep::calendar(id, "step", duration),
                        }
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn unit_count_matches_timer_steps(schedule in arb_schedule()) {
                let units = group_schedule(&schedule, &ctx());
                let timers = schedule.iter().filter(|s| s.kind.is_timer()).count();
                prop_assert_eq!(units.len(), timers);
            }

            #[test]
            fn group_ids_form_contiguous_runs(schedule in arb_schedule()) {
                let units = group_schedule(&schedule, &ctx());
                // Once a group id is left, it never reappears later.
                let mut seen: Vec<&str> = Vec::new();
                for unit in &units {
                    let gid = unit.group_id.as_str();
                    match seen.last() {
                        Some(&last) if last == gid => {}
                        _ => {
                            prop_assert!(!seen.contains(&gid));
                            seen.push(gid);
                        }
                    }
                }
            }

            #[test]
            fn group_id_is_first_member_step_id(schedule in arb_schedule()) {
                let units = group_schedule(&schedule, &ctx());
                let mut prev_gid: Option<&str> = None;
                for unit in &units {
                    let gid = unit.group_id.as_str();
                    if prev_gid != Some(gid) {
                        prop_assert_eq!(gid, unit.step.id.as_str());
                    }
                    prev_gid = Some(gid);
                }
            }

            #[test]
            fn multi_member_groups_are_all_concurrent(schedule in arb_schedule()) {
                let units = group_schedule(&schedule, &ctx());
                for (i, unit) in units.iter().enumerate() {
                    let shared = units
                        .iter()
                        .enumerate()
                        .any(|(j, other)| j != i && other.group_id == unit.group_id);
                    if shared {
                        prop_assert!(unit.step.concurrent);
                    }
                }
            }
        }
    }
}
