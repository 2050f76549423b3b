// navigator_core/src/error.rs

use crate::types::{Point, RobotId, Timestamp};
use thiserror::Error;

/// Errors raised when mutating or querying a robot's kinematic state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("stale update: requested timestamp {requested} is earlier than last update {last}")]
    StaleTimestamp {
        last: Timestamp,
        requested: Timestamp,
    },
    #[error("robot {expected} cannot be updated with data from robot {found}")]
    IdMismatch { expected: RobotId, found: RobotId },
    #[error("time delta must be finite and non-negative, got {0}")]
    NegativeTimeDelta(f64),
}

/// Outcomes of a planner invocation that did not produce a path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    #[error("no collision-free path found within {iterations} iterations")]
    NoPathFound { iterations: usize },
    #[error("goal point ({}, {}) lies inside an obstacle", .0.x, .0.y)]
    GoalObstructed(Point),
    #[error("start point ({}, {}) is outside the planning bounds", .0.x, .0.y)]
    StartOutOfBounds(Point),
    #[error("goal point ({}, {}) is outside the planning bounds", .0.x, .0.y)]
    GoalOutOfBounds(Point),
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl PlanningError {
    /// True for the expected "there is no way through right now" outcomes,
    /// false for errors caused by bad inputs or configuration.
    pub fn is_no_path(&self) -> bool {
        matches!(
            self,
            PlanningError::NoPathFound { .. } | PlanningError::GoalObstructed(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Per-intent failures reported by the navigator. None of these abort a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("unrecognized intent `{name}` for robot {robot_id}")]
    UnrecognizedIntent { name: String, robot_id: RobotId },
    #[error("robot {0} is not part of the friendly team")]
    UnknownRobot(RobotId),
    #[error("planning failed for robot {robot_id}: {source}")]
    Planning {
        robot_id: RobotId,
        #[source]
        source: PlanningError,
    },
    #[error("could not build obstacles: {0}")]
    Obstacles(#[from] StateError),
}

/// Errors raised when rebuilding a primitive from its generic message form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrimitiveError {
    #[error("unknown primitive `{0}`")]
    UnknownPrimitive(String),
    #[error("`{name}` expects {expected} parameters, got {found}")]
    ParameterCount {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("`{name}` expects {expected} extra bits, got {found}")]
    ExtraBitCount {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}
