// navigator_sim/src/simulation/bodies.rs

use crate::config::RobotConfig;
use navigator_core::types::{normalize_angle, Bounds, Point, RobotId, Timestamp, Vector};
use navigator_core::world::Robot;

/// Ground-truth kinematic state of one simulated robot.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: RobotId,
    pub position: Point,
    pub velocity: Vector,
    pub orientation: f64,
    pub angular_velocity: f64,
}

impl Body {
    pub fn from_config(config: &RobotConfig) -> Self {
        Self {
            id: config.id,
            position: config.position,
            velocity: config.velocity,
            orientation: normalize_angle(config.orientation),
            angular_velocity: 0.0,
        }
    }

    /// A perfect observation of this body.
    pub fn to_robot(&self, timestamp: Timestamp) -> Robot {
        Robot::with_state(
            self.id,
            self.position,
            self.velocity,
            self.orientation,
            self.angular_velocity,
            timestamp,
        )
    }

    /// Constant-velocity step that reflects off the edges of `bounds`.
    pub fn step_bouncing(&mut self, dt: f64, bounds: &Bounds) {
        self.position += self.velocity * dt;
        self.orientation = normalize_angle(self.orientation + self.angular_velocity * dt);

        if self.position.x < bounds.min.x {
            self.position.x = 2.0 * bounds.min.x - self.position.x;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > bounds.max.x {
            self.position.x = 2.0 * bounds.max.x - self.position.x;
            self.velocity.x = -self.velocity.x.abs();
        }
        if self.position.y < bounds.min.y {
            self.position.y = 2.0 * bounds.min.y - self.position.y;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > bounds.max.y {
            self.position.y = 2.0 * bounds.max.y - self.position.y;
            self.velocity.y = -self.velocity.y.abs();
        }
        // A step longer than the whole field could still land outside.
        self.position = bounds.clamp(&self.position);
    }
}
