// navigator_sim/tests/scenario_runs.rs

use navigator_sim::prelude::*;
use std::path::PathBuf;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../assets/scenarios")
        .join(name)
}

fn run(scenario: ScenarioConfig) -> SimulationSummary {
    let max_ticks = scenario.simulation.max_ticks;
    let rng = SimulationRng::new(scenario.simulation.seed);
    Simulation::new(scenario, rng).unwrap().run(max_ticks).unwrap()
}

#[test]
fn bundled_scenarios_load() {
    let open = load_scenario(&scenario_path("00_open_field.toml")).unwrap();
    assert_eq!(open.friendly.len(), 3);
    assert_eq!(open.simulation.seed, Some(42));

    let crowded = load_scenario(&scenario_path("01_crowded_midfield.toml")).unwrap();
    assert_eq!(crowded.enemy.len(), 4);
    assert_eq!(crowded.navigator.path_expansion, PathExpansion::PerWaypoint);
    assert!(crowded
        .intents
        .iter()
        .any(|intent| matches!(intent, Intent::Unrecognized { name, .. } if name == "Kick Intent")));
}

#[test]
fn open_field_scenario_completes() {
    let scenario = load_scenario(&scenario_path("00_open_field.toml")).unwrap();
    let summary = run(scenario);

    assert!(summary.all_reached(), "summary: {summary:?}");
    assert!(summary.ticks_run < 600);
    assert_eq!(summary.arrivals.len(), 2);
    assert_eq!(summary.dispatch_errors, 0);
    // Robots never drove through one another.
    assert!(summary.closest_approach > 2.0 * navigator_core::navigator::obstacle::ROBOT_MAX_RADIUS_METERS);
}

#[test]
fn seeded_runs_are_reproducible() {
    let scenario = load_scenario(&scenario_path("01_crowded_midfield.toml")).unwrap();
    let first = run(scenario.clone());
    let second = run(scenario);
    assert_eq!(first, second);
    // The kick intent is reported every tick.
    assert!(first.dispatch_errors as u64 >= first.ticks_run);
}
