// navigator_core/src/navigator/config.rs

use crate::error::ConfigError;
use crate::navigator::obstacle::{ObstacleParams, ROBOT_MAX_RADIUS_METERS};
use serde::{Deserialize, Serialize};

// =========================================================================
// == Navigator Configuration ==
// =========================================================================

/// # NavigatorConfig
/// All tunables of the navigator. Every field has a default, so a config
/// section only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigatorConfig {
    /// Clearance kept from other robots, on top of their physical radius.
    pub default_avoid_dist: f64,
    /// Multiplier on `default_avoid_dist` for enemy robots.
    pub enemy_avoid_scale: f64,
    /// Physical radius used for every robot.
    pub robot_radius: f64,
    /// Seconds ahead to project robot positions when building obstacles.
    pub prediction_horizon: f64,
    pub path_expansion: PathExpansion,
    pub rrt: RrtConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            default_avoid_dist: 0.15,
            enemy_avoid_scale: 1.5,
            robot_radius: ROBOT_MAX_RADIUS_METERS,
            prediction_horizon: 0.0,
            path_expansion: PathExpansion::default(),
            rrt: RrtConfig::default(),
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("default_avoid_dist", self.default_avoid_dist)?;
        non_negative("enemy_avoid_scale", self.enemy_avoid_scale)?;
        non_negative("robot_radius", self.robot_radius)?;
        non_negative("prediction_horizon", self.prediction_horizon)?;
        self.rrt.validate()
    }

    pub fn friendly_avoid_dist(&self) -> f64 {
        self.default_avoid_dist
    }

    pub fn enemy_avoid_dist(&self) -> f64 {
        self.default_avoid_dist * self.enemy_avoid_scale
    }

    pub fn obstacle_params(&self) -> ObstacleParams {
        ObstacleParams {
            robot_radius: self.robot_radius,
            prediction_horizon: self.prediction_horizon,
        }
    }
}

/// How a planned path is turned into Move primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathExpansion {
    /// A single Move primitive to the final waypoint.
    #[default]
    SingleShot,
    /// One Move primitive per waypoint after the start.
    PerWaypoint,
}

// =========================================================================
// == RRT Configuration ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RrtConfig {
    /// Sampling iterations before giving up.
    pub max_iterations: usize,
    /// Longest edge added to the tree, in metres.
    pub step_size: f64,
    /// Probability of sampling the goal instead of a random point.
    pub goal_bias: f64,
    /// A node this close to the goal ends the search.
    pub goal_tolerance: f64,
    /// Remove redundant waypoints by greedy line-of-sight shortcutting.
    pub simplify_path: bool,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            step_size: 0.3,
            goal_bias: 0.1,
            goal_tolerance: 0.05,
            simplify_path: true,
        }
    }
}

impl RrtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::invalid("rrt.max_iterations", "must be at least 1"));
        }
        positive("rrt.step_size", self.step_size)?;
        positive("rrt.goal_tolerance", self.goal_tolerance)?;
        if !(0.0..=1.0).contains(&self.goal_bias) {
            return Err(ConfigError::invalid(
                "rrt.goal_bias",
                format!("must be a probability in [0, 1], got {}", self.goal_bias),
            ));
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite and >= 0, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite and > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(NavigatorConfig::default().validate().is_ok());
    }

    #[test]
    fn enemy_margin_is_scaled() {
        let config = NavigatorConfig {
            default_avoid_dist: 0.2,
            enemy_avoid_scale: 2.0,
            ..Default::default()
        };
        assert_eq!(config.friendly_avoid_dist(), 0.2);
        assert_eq!(config.enemy_avoid_dist(), 0.4);
    }

    #[test]
    fn invalid_values_are_reported_by_field() {
        let mut config = NavigatorConfig::default();
        config.rrt.goal_bias = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "rrt.goal_bias", .. })
        ));

        let mut config = NavigatorConfig::default();
        config.rrt.step_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "rrt.step_size", .. })
        ));

        let config = NavigatorConfig {
            default_avoid_dist: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "default_avoid_dist", .. })
        ));
    }
}
