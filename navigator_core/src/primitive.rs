// navigator_core/src/primitive.rs

//! Low-level robot commands, the navigator's only output.
//!
//! Each primitive flattens into a [`PrimitiveMsg`]: a name, the owning robot,
//! an array of numeric parameters and an array of extra flag bits. How that
//! message is put on the wire is up to the radio layer.

use crate::error::PrimitiveError;
use crate::types::{Point, RobotId};
use serde::{Deserialize, Serialize};

pub const MOVE_PRIMITIVE_NAME: &str = "Move Primitive";
pub const STOP_PRIMITIVE_NAME: &str = "Stop Primitive";

const MOVE_PARAMETER_COUNT: usize = 4;
const STOP_EXTRA_BIT_COUNT: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct MovePrimitive {
    pub robot_id: RobotId,
    pub destination: Point,
    /// Orientation the robot should have at the destination, in radians.
    pub final_angle: f64,
    /// Speed the robot should have at the destination, in m/s.
    pub final_speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopPrimitive {
    pub robot_id: RobotId,
    pub coast: bool,
}

impl StopPrimitive {
    /// Brake to a halt and stay there.
    pub fn hold(robot_id: RobotId) -> Self {
        Self {
            robot_id,
            coast: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Move(MovePrimitive),
    Stop(StopPrimitive),
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Move(_) => MOVE_PRIMITIVE_NAME,
            Primitive::Stop(_) => STOP_PRIMITIVE_NAME,
        }
    }

    pub fn robot_id(&self) -> RobotId {
        match self {
            Primitive::Move(primitive) => primitive.robot_id,
            Primitive::Stop(primitive) => primitive.robot_id,
        }
    }

    /// The numeric parameters, in wire order.
    pub fn parameter_array(&self) -> Vec<f64> {
        match self {
            Primitive::Move(primitive) => vec![
                primitive.destination.x,
                primitive.destination.y,
                primitive.final_angle,
                primitive.final_speed,
            ],
            Primitive::Stop(_) => Vec::new(),
        }
    }

    /// The auxiliary flag bits, in wire order.
    pub fn extra_bit_array(&self) -> Vec<bool> {
        match self {
            Primitive::Move(_) => Vec::new(),
            Primitive::Stop(primitive) => vec![primitive.coast],
        }
    }
}

impl From<MovePrimitive> for Primitive {
    fn from(primitive: MovePrimitive) -> Self {
        Primitive::Move(primitive)
    }
}

impl From<StopPrimitive> for Primitive {
    fn from(primitive: StopPrimitive) -> Self {
        Primitive::Stop(primitive)
    }
}

/// The generic, serializable form of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveMsg {
    pub primitive_name: String,
    pub robot_id: RobotId,
    pub parameters: Vec<f64>,
    pub extra_bits: Vec<bool>,
}

impl From<&Primitive> for PrimitiveMsg {
    fn from(primitive: &Primitive) -> Self {
        Self {
            primitive_name: primitive.name().to_string(),
            robot_id: primitive.robot_id(),
            parameters: primitive.parameter_array(),
            extra_bits: primitive.extra_bit_array(),
        }
    }
}

impl TryFrom<&PrimitiveMsg> for Primitive {
    type Error = PrimitiveError;

    fn try_from(msg: &PrimitiveMsg) -> Result<Self, Self::Error> {
        match msg.primitive_name.as_str() {
            MOVE_PRIMITIVE_NAME => {
                expect_len(MOVE_PRIMITIVE_NAME, MOVE_PARAMETER_COUNT, msg.parameters.len(), false)?;
                expect_len(MOVE_PRIMITIVE_NAME, 0, msg.extra_bits.len(), true)?;
                let p = &msg.parameters;
                Ok(Primitive::Move(MovePrimitive {
                    robot_id: msg.robot_id,
                    destination: Point::new(p[0], p[1]),
                    final_angle: p[2],
                    final_speed: p[3],
                }))
            }
            STOP_PRIMITIVE_NAME => {
                expect_len(STOP_PRIMITIVE_NAME, 0, msg.parameters.len(), false)?;
                expect_len(STOP_PRIMITIVE_NAME, STOP_EXTRA_BIT_COUNT, msg.extra_bits.len(), true)?;
                Ok(Primitive::Stop(StopPrimitive {
                    robot_id: msg.robot_id,
                    coast: msg.extra_bits[0],
                }))
            }
            other => Err(PrimitiveError::UnknownPrimitive(other.to_string())),
        }
    }
}

fn expect_len(
    name: &'static str,
    expected: usize,
    found: usize,
    extra_bits: bool,
) -> Result<(), PrimitiveError> {
    if expected == found {
        Ok(())
    } else if extra_bits {
        Err(PrimitiveError::ExtraBitCount {
            name,
            expected,
            found,
        })
    } else {
        Err(PrimitiveError::ParameterCount {
            name,
            expected,
            found,
        })
    }
}
