// navigator_sim/src/config/mod.rs

//! Loading and validating scenario files.
//!
//! A scenario is layered with `figment`: the built-in defaults first, then the
//! TOML file on top, so a file only needs to name what it changes.

pub mod structs;

use crate::error::SimError;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use navigator_core::error::ConfigError;
use navigator_core::types::RobotId;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

pub use structs::{FirmwareConfig, ObservationConfig, RobotConfig, ScenarioConfig, SimulationSettings};

/// Reads, layers and validates the scenario at `path`.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, SimError> {
    // `Toml::file` treats a missing file as empty, which would silently run
    // the defaults.
    if !path.is_file() {
        return Err(SimError::ScenarioNotFound(path.to_path_buf()));
    }
    info!("Loading scenario from: {}", path.display());
    extract(Figment::from(Serialized::defaults(ScenarioConfig::default())).merge(Toml::file(path)))
}

/// Same as [`load_scenario`] but from TOML text.
pub fn load_scenario_str(toml: &str) -> Result<ScenarioConfig, SimError> {
    extract(Figment::from(Serialized::defaults(ScenarioConfig::default())).merge(Toml::string(toml)))
}

fn extract(figment: Figment) -> Result<ScenarioConfig, SimError> {
    let scenario: ScenarioConfig = figment.extract()?;
    scenario.validate()?;
    debug!(
        friendly = scenario.friendly.len(),
        enemy = scenario.enemy.len(),
        intents = scenario.intents.len(),
        "Scenario resolved"
    );
    Ok(scenario)
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        self.navigator.validate()?;

        let sim = &self.simulation;
        if !(sim.tick_rate_hz.is_finite() && sim.tick_rate_hz > 0.0) {
            return Err(ConfigError::invalid("simulation.tick_rate_hz", "must be > 0").into());
        }
        if !(sim.arrival_tolerance.is_finite() && sim.arrival_tolerance >= 0.0) {
            return Err(ConfigError::invalid("simulation.arrival_tolerance", "must be >= 0").into());
        }
        let noise = &sim.observation;
        for (field, stddev) in [
            ("simulation.observation.position_noise_stddev", noise.position_noise_stddev),
            ("simulation.observation.velocity_noise_stddev", noise.velocity_noise_stddev),
            ("simulation.observation.orientation_noise_stddev", noise.orientation_noise_stddev),
        ] {
            if !(stddev.is_finite() && stddev >= 0.0) {
                return Err(ConfigError::invalid(field, "must be >= 0").into());
            }
        }
        if !(0.0..=1.0).contains(&sim.observation.dropout_probability) {
            return Err(ConfigError::invalid(
                "simulation.observation.dropout_probability",
                "must be a probability in [0, 1]",
            )
            .into());
        }
        if !(sim.firmware.max_speed.is_finite() && sim.firmware.max_speed > 0.0) {
            return Err(ConfigError::invalid("simulation.firmware.max_speed", "must be > 0").into());
        }
        if !(sim.firmware.max_angular_speed.is_finite() && sim.firmware.max_angular_speed > 0.0) {
            return Err(
                ConfigError::invalid("simulation.firmware.max_angular_speed", "must be > 0").into(),
            );
        }
        if !self.field.planning_bounds().is_valid() {
            return Err(ConfigError::invalid("field", "length and width must be positive").into());
        }

        unique_ids("friendly", &self.friendly)?;
        unique_ids("enemy", &self.enemy)
    }
}

fn unique_ids(team: &'static str, robots: &[RobotConfig]) -> Result<(), SimError> {
    let mut seen: HashSet<RobotId> = HashSet::new();
    for robot in robots {
        if !seen.insert(robot.id) {
            return Err(SimError::DuplicateRobot { team, id: robot.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_core::intent::Intent;
    use navigator_core::navigator::PathExpansion;
    use navigator_core::types::Point;

    const SCENARIO: &str = r#"
        [simulation]
        seed = 7
        max_ticks = 300

        [simulation.observation]
        dropout_probability = 0.0

        [navigator]
        path_expansion = "per_waypoint"

        [navigator.rrt]
        step_size = 0.25

        [[friendly]]
        id = 0
        position = [-3.0, 0.0]

        [[enemy]]
        id = 0
        position = [0.0, 0.0]
        velocity = [0.0, 1.0]

        [[intents]]
        type = "Move"
        robot_id = 0
        destination = [3.0, 0.0]
        final_angle = 0.0
        final_speed = 0.0

        [[intents]]
        type = "Stop"
        robot_id = 1
    "#;

    #[test]
    fn scenario_overrides_defaults() {
        let scenario = load_scenario_str(SCENARIO).unwrap();

        assert_eq!(scenario.simulation.seed, Some(7));
        assert_eq!(scenario.simulation.max_ticks, 300);
        assert_eq!(scenario.simulation.tick_rate_hz, 60.0);
        assert_eq!(scenario.simulation.observation.dropout_probability, 0.0);
        assert_eq!(scenario.simulation.observation.position_noise_stddev, 0.005);

        assert_eq!(scenario.navigator.path_expansion, PathExpansion::PerWaypoint);
        assert_eq!(scenario.navigator.rrt.step_size, 0.25);
        assert_eq!(scenario.navigator.rrt.max_iterations, 2000);

        assert_eq!(scenario.friendly.len(), 1);
        assert_eq!(scenario.friendly[0].velocity, navigator_core::types::Vector::zeros());
        assert_eq!(scenario.enemy[0].velocity.y, 1.0);

        assert_eq!(scenario.intents.len(), 2);
        match &scenario.intents[0] {
            Intent::Move(intent) => assert_eq!(intent.destination, Point::new(3.0, 0.0)),
            other => panic!("expected a move intent, got {other:?}"),
        }
        assert!(matches!(&scenario.intents[1], Intent::Stop(stop) if !stop.coast));
    }

    #[test]
    fn empty_scenario_is_all_defaults() {
        let scenario = load_scenario_str("").unwrap();
        assert_eq!(scenario, ScenarioConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_scenario_str("[simulation]\ntick_rate = 30.0\n");
        assert!(matches!(result, Err(SimError::Load(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = load_scenario_str("[navigator.rrt]\ngoal_bias = 2.0\n");
        assert!(matches!(
            result,
            Err(SimError::InvalidConfig(ConfigError::Invalid { field: "rrt.goal_bias", .. }))
        ));

        let duplicate = r#"
            [[friendly]]
            id = 1
            position = [0.0, 0.0]
            [[friendly]]
            id = 1
            position = [1.0, 0.0]
        "#;
        assert!(matches!(
            load_scenario_str(duplicate),
            Err(SimError::DuplicateRobot { team: "friendly", id: 1 })
        ));
    }

    #[test]
    fn negative_noise_is_rejected() {
        let result = load_scenario_str("[simulation.observation]\nposition_noise_stddev = -1.0\n");
        assert!(matches!(
            result,
            Err(SimError::InvalidConfig(ConfigError::Invalid {
                field: "simulation.observation.position_noise_stddev",
                ..
            }))
        ));

        let result = load_scenario_str("[simulation.observation]\norientation_noise_stddev = -0.01\n");
        assert!(matches!(
            result,
            Err(SimError::InvalidConfig(ConfigError::Invalid {
                field: "simulation.observation.orientation_noise_stddev",
                ..
            }))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_scenario(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(SimError::ScenarioNotFound(_))));
    }
}
