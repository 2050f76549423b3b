// navigator_sim/src/simulation/firmware.rs

//! A deliberately simple stand-in for the on-robot controller.

use super::bodies::Body;
use crate::config::FirmwareConfig;
use navigator_core::primitive::Primitive;
use navigator_core::types::{normalize_angle, Vector};

#[derive(Debug, Clone)]
pub struct Firmware {
    config: FirmwareConfig,
}

impl Firmware {
    pub fn new(config: FirmwareConfig) -> Self {
        Self { config }
    }

    /// Executes `primitive` on `body` for `dt` seconds.
    ///
    /// A Move drives straight for its destination at up to `max_speed`
    /// without overshooting and turns toward the final angle at up to
    /// `max_angular_speed`. A Stop, or no primitive at all, halts the robot
    /// on the spot.
    pub fn execute(&self, body: &mut Body, primitive: Option<&Primitive>, dt: f64) {
        match primitive {
            Some(Primitive::Move(command)) => {
                let offset = command.destination - body.position;
                let distance = offset.norm();
                let travel = (self.config.max_speed * dt).min(distance);
                body.velocity = if distance > 0.0 && dt > 0.0 {
                    offset * (travel / (distance * dt))
                } else {
                    Vector::zeros()
                };

                let max_turn = self.config.max_angular_speed * dt;
                let turn = normalize_angle(command.final_angle - body.orientation).clamp(-max_turn, max_turn);
                body.angular_velocity = if dt > 0.0 { turn / dt } else { 0.0 };
            }
            Some(Primitive::Stop(_)) | None => {
                body.velocity = Vector::zeros();
                body.angular_velocity = 0.0;
            }
        }

        body.position += body.velocity * dt;
        body.orientation = normalize_angle(body.orientation + body.angular_velocity * dt);
    }
}
