// navigator_core/src/intent.rs

use crate::types::{Point, RobotId};
use serde::{Deserialize, Serialize};

pub const MOVE_INTENT_NAME: &str = "Move Intent";
pub const STOP_INTENT_NAME: &str = "Stop Intent";

/// Drive a robot to a point and arrive with a given heading and speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub robot_id: RobotId,
    pub destination: Point,
    /// Radians.
    pub final_angle: f64,
    /// Metres per second at the destination.
    pub final_speed: f64,
}

impl MoveIntent {
    pub fn new(robot_id: RobotId, destination: Point, final_angle: f64, final_speed: f64) -> Self {
        Self {
            robot_id,
            destination,
            final_angle,
            final_speed,
        }
    }
}

/// Bring a robot to a halt where it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopIntent {
    pub robot_id: RobotId,
    /// Let the wheels spin down freely instead of braking.
    #[serde(default)]
    pub coast: bool,
}

/// A high-level goal for a single robot, produced by the strategy layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    Move(MoveIntent),
    Stop(StopIntent),
    /// An intent kind this navigator has no planning strategy for, carried by
    /// name so it can be reported back instead of being dropped silently.
    Unrecognized { name: String, robot_id: RobotId },
}

impl Intent {
    pub fn name(&self) -> &str {
        match self {
            Intent::Move(_) => MOVE_INTENT_NAME,
            Intent::Stop(_) => STOP_INTENT_NAME,
            Intent::Unrecognized { name, .. } => name,
        }
    }

    pub fn robot_id(&self) -> RobotId {
        match self {
            Intent::Move(intent) => intent.robot_id,
            Intent::Stop(intent) => intent.robot_id,
            Intent::Unrecognized { robot_id, .. } => *robot_id,
        }
    }
}

impl From<MoveIntent> for Intent {
    fn from(intent: MoveIntent) -> Self {
        Intent::Move(intent)
    }
}

impl From<StopIntent> for Intent {
    fn from(intent: StopIntent) -> Self {
        Intent::Stop(intent)
    }
}
