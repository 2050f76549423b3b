// navigator_core/src/world/motion.rs

use crate::types::{normalize_angle, Point, Vector};
use dyn_clone::DynClone;
use std::fmt::Debug;

/// The observed kinematic quantities a prediction starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSnapshot {
    pub position: Point,
    pub velocity: Vector,
    /// Radians, canonical range `(-PI, PI]`.
    pub orientation: f64,
    /// Radians per second, counter-clockwise positive.
    pub angular_velocity: f64,
}

impl Default for MotionSnapshot {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            velocity: Vector::zeros(),
            orientation: 0.0,
            angular_velocity: 0.0,
        }
    }
}

// --- MOTION MODEL TRAIT ---
// Projects a snapshot forward in time. `x(t + dt) = g(x(t), dt)`
/// A replaceable prediction policy for a robot's future state.
///
/// The four projections are independent: each method has the constant-velocity
/// reference behaviour as its default body, so an implementation may override
/// any one of them (e.g. acceleration-aware position prediction) and inherit
/// the rest unchanged.
///
/// `dt` is in seconds and has already been validated as finite and
/// non-negative by the caller (`Robot`).
pub trait MotionModel: DynClone + Debug + Send + Sync {
    /// Preserves the current speed and heading of travel.
    fn predict_position(&self, snapshot: &MotionSnapshot, dt: f64) -> Point {
        let speed = snapshot.velocity.norm();
        if speed <= f64::EPSILON {
            // No heading of travel to follow.
            return snapshot.position;
        }
        let heading = snapshot.velocity / speed;
        snapshot.position + heading * (speed * dt)
    }

    /// Holds the velocity constant.
    fn predict_velocity(&self, snapshot: &MotionSnapshot, _dt: f64) -> Vector {
        snapshot.velocity
    }

    /// Integrates the angular velocity and wraps the result.
    fn predict_orientation(&self, snapshot: &MotionSnapshot, dt: f64) -> f64 {
        normalize_angle(snapshot.orientation + snapshot.angular_velocity * dt)
    }

    /// Holds the angular velocity constant.
    fn predict_angular_velocity(&self, snapshot: &MotionSnapshot, _dt: f64) -> f64 {
        snapshot.angular_velocity
    }

    /// Runs all four projections.
    fn predict(&self, snapshot: &MotionSnapshot, dt: f64) -> MotionSnapshot {
        MotionSnapshot {
            position: self.predict_position(snapshot, dt),
            velocity: self.predict_velocity(snapshot, dt),
            orientation: self.predict_orientation(snapshot, dt),
            angular_velocity: self.predict_angular_velocity(snapshot, dt),
        }
    }
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn MotionModel>`.
dyn_clone::clone_trait_object!(MotionModel);

/// Constant velocity, constant angular velocity extrapolation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearMotionModel;

impl MotionModel for LinearMotionModel {}
