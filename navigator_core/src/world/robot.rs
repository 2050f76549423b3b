// navigator_core/src/world/robot.rs

use crate::error::StateError;
use crate::types::{normalize_angle, Point, RobotId, Timestamp, Vector};
use crate::world::motion::{LinearMotionModel, MotionModel, MotionSnapshot};

/// The tracked kinematic state of a single robot.
///
/// The state only moves forward in time: every mutating method rejects a
/// timestamp earlier than the last one recorded, leaving the robot untouched.
/// Predictions are read-only and never advance the timestamp.
#[derive(Debug, Clone)]
pub struct Robot {
    id: RobotId,
    state: MotionSnapshot,
    last_update_timestamp: Timestamp,
    /// The estimator used by every `estimate_*` method.
    motion_model: Box<dyn MotionModel>,
}

impl Robot {
    /// Creates a robot at rest at the origin.
    pub fn new(id: RobotId, timestamp: Timestamp) -> Self {
        Self {
            id,
            state: MotionSnapshot::default(),
            last_update_timestamp: timestamp,
            motion_model: Box::new(LinearMotionModel),
        }
    }

    /// Creates a robot with a fully specified state.
    pub fn with_state(
        id: RobotId,
        position: Point,
        velocity: Vector,
        orientation: f64,
        angular_velocity: f64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            state: MotionSnapshot {
                position,
                velocity,
                orientation: normalize_angle(orientation),
                angular_velocity,
            },
            last_update_timestamp: timestamp,
            motion_model: Box::new(LinearMotionModel),
        }
    }

    /// Replaces the estimator used for predictions.
    pub fn with_motion_model(mut self, motion_model: Box<dyn MotionModel>) -> Self {
        self.motion_model = motion_model;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.state.position
    }

    pub fn velocity(&self) -> Vector {
        self.state.velocity
    }

    pub fn orientation(&self) -> f64 {
        self.state.orientation
    }

    pub fn angular_velocity(&self) -> f64 {
        self.state.angular_velocity
    }

    pub fn last_update_timestamp(&self) -> Timestamp {
        self.last_update_timestamp
    }

    // --- Updates ---

    /// Replaces the state with a new observation taken at `timestamp`.
    pub fn update_state(
        &mut self,
        position: Point,
        velocity: Vector,
        orientation: f64,
        angular_velocity: f64,
        timestamp: Timestamp,
    ) -> Result<(), StateError> {
        self.check_not_stale(timestamp)?;

        self.state = MotionSnapshot {
            position,
            velocity,
            orientation: normalize_angle(orientation),
            angular_velocity,
        };
        self.last_update_timestamp = timestamp;
        Ok(())
    }

    /// Copies the state and timestamp of another observation of the same robot.
    pub fn update_state_from(&mut self, observation: &Robot) -> Result<(), StateError> {
        if observation.id != self.id {
            return Err(StateError::IdMismatch {
                expected: self.id,
                found: observation.id,
            });
        }

        self.update_state(
            observation.position(),
            observation.velocity(),
            observation.orientation(),
            observation.angular_velocity(),
            observation.last_update_timestamp(),
        )
    }

    /// Commits the predicted state at `timestamp` as if it had been observed.
    ///
    /// Used when a cycle needs a current estimate but no new observation arrived.
    pub fn update_state_to_predicted_state(&mut self, timestamp: Timestamp) -> Result<(), StateError> {
        self.check_not_stale(timestamp)?;

        let dt = timestamp.seconds_since(self.last_update_timestamp);
        let predicted = self.motion_model.predict(&self.state, dt);
        self.update_state(
            predicted.position,
            predicted.velocity,
            predicted.orientation,
            predicted.angular_velocity,
            timestamp,
        )
    }

    // --- Predictions ---

    /// Estimated position `dt` seconds after the last update.
    pub fn estimate_position_at_future_time(&self, dt: f64) -> Result<Point, StateError> {
        let dt = validate_time_delta(dt)?;
        Ok(self.motion_model.predict_position(&self.state, dt))
    }

    /// Estimated velocity `dt` seconds after the last update.
    pub fn estimate_velocity_at_future_time(&self, dt: f64) -> Result<Vector, StateError> {
        let dt = validate_time_delta(dt)?;
        Ok(self.motion_model.predict_velocity(&self.state, dt))
    }

    /// Estimated orientation `dt` seconds after the last update, in `(-PI, PI]`.
    pub fn estimate_orientation_at_future_time(&self, dt: f64) -> Result<f64, StateError> {
        let dt = validate_time_delta(dt)?;
        Ok(self.motion_model.predict_orientation(&self.state, dt))
    }

    /// Estimated angular velocity `dt` seconds after the last update.
    pub fn estimate_angular_velocity_at_future_time(&self, dt: f64) -> Result<f64, StateError> {
        let dt = validate_time_delta(dt)?;
        Ok(self.motion_model.predict_angular_velocity(&self.state, dt))
    }

    fn check_not_stale(&self, timestamp: Timestamp) -> Result<(), StateError> {
        if timestamp < self.last_update_timestamp {
            return Err(StateError::StaleTimestamp {
                last: self.last_update_timestamp,
                requested: timestamp,
            });
        }
        Ok(())
    }
}

fn validate_time_delta(dt: f64) -> Result<f64, StateError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(StateError::NegativeTimeDelta(dt))
    }
}

/// Robots compare equal on identity and kinematic state; the timestamp and
/// the motion model are ignored.
impl PartialEq for Robot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.state == other.state
    }
}
