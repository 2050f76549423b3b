// navigator_sim/src/config/structs.rs

use navigator_core::intent::Intent;
use navigator_core::navigator::NavigatorConfig;
use navigator_core::types::{Point, RobotId, Vector};
use navigator_core::world::Field;
use serde::{Deserialize, Serialize};

// =========================================================================
// == Top-Level Scenario ==
// =========================================================================

/// # ScenarioConfig
/// The root of a `scenario.toml` file. Every section is optional; missing
/// sections fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub simulation: SimulationSettings,
    pub field: Field,
    pub navigator: NavigatorConfig,
    // `[[friendly]]` and `[[enemy]]` tables in the TOML.
    pub friendly: Vec<RobotConfig>,
    pub enemy: Vec<RobotConfig>,
    /// Held constant for the whole run.
    pub intents: Vec<Intent>,
}

// =========================================================================
// == Sub-Sections ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Seed for the simulation PRNG. Absent means a fresh seed every run.
    pub seed: Option<u64>,
    /// Control ticks per simulated second.
    pub tick_rate_hz: f64,
    /// Tick budget for one run.
    pub max_ticks: u64,
    /// A Move intent counts as reached once the true robot is this close.
    pub arrival_tolerance: f64,
    pub observation: ObservationConfig,
    pub firmware: FirmwareConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate_hz: 60.0,
            max_ticks: 600,
            arrival_tolerance: 0.1,
            observation: ObservationConfig::default(),
            firmware: FirmwareConfig::default(),
        }
    }
}

impl SimulationSettings {
    pub fn tick_period(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }
}

/// How the vision system corrupts ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObservationConfig {
    pub position_noise_stddev: f64,
    pub velocity_noise_stddev: f64,
    pub orientation_noise_stddev: f64,
    /// Chance that a robot goes unseen for a tick.
    pub dropout_probability: f64,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            position_noise_stddev: 0.005,
            velocity_noise_stddev: 0.02,
            orientation_noise_stddev: 0.01,
            dropout_probability: 0.1,
        }
    }
}

/// Limits of the on-robot controller that executes primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirmwareConfig {
    /// m/s
    pub max_speed: f64,
    /// rad/s
    pub max_angular_speed: f64,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_angular_speed: 4.0,
        }
    }
}

/// Initial state of one robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotConfig {
    pub id: RobotId,
    pub position: Point,
    #[serde(default = "zero_vector")]
    pub velocity: Vector,
    #[serde(default)]
    pub orientation: f64,
}

fn zero_vector() -> Vector {
    Vector::zeros()
}
