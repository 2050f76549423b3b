// navigator_sim/src/simulation/observation.rs

use super::bodies::Body;
use crate::config::ObservationConfig;
use crate::error::SimError;
use navigator_core::types::{normalize_angle, Point, Timestamp, Vector};
use navigator_core::world::Robot;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Simulated vision: noisy, and sometimes blind to a robot.
#[derive(Debug, Clone)]
pub struct ObservationModel {
    position_noise: Normal<f64>,
    velocity_noise: Normal<f64>,
    orientation_noise: Normal<f64>,
    dropout_probability: f64,
}

impl ObservationModel {
    pub fn new(config: &ObservationConfig) -> Result<Self, SimError> {
        Ok(Self {
            position_noise: Normal::new(0.0, config.position_noise_stddev)?,
            velocity_noise: Normal::new(0.0, config.velocity_noise_stddev)?,
            orientation_noise: Normal::new(0.0, config.orientation_noise_stddev)?,
            dropout_probability: config.dropout_probability,
        })
    }

    /// Observes `body` at `timestamp`. `None` means the robot was not seen
    /// this tick.
    pub fn observe<R: Rng + ?Sized>(
        &self,
        body: &Body,
        timestamp: Timestamp,
        rng: &mut R,
    ) -> Option<Robot> {
        if rng.gen_bool(self.dropout_probability) {
            return None;
        }

        let position = Point::new(
            body.position.x + self.position_noise.sample(rng),
            body.position.y + self.position_noise.sample(rng),
        );
        let velocity = Vector::new(
            body.velocity.x + self.velocity_noise.sample(rng),
            body.velocity.y + self.velocity_noise.sample(rng),
        );
        let orientation = normalize_angle(body.orientation + self.orientation_noise.sample(rng));

        Some(Robot::with_state(
            body.id,
            position,
            velocity,
            orientation,
            body.angular_velocity,
            timestamp,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn body() -> Body {
        Body {
            id: 5,
            position: Point::new(1.0, -1.0),
            velocity: Vector::new(0.5, 0.0),
            orientation: 0.3,
            angular_velocity: 0.1,
        }
    }

    #[test]
    fn noiseless_observation_is_exact() {
        let model = ObservationModel::new(&ObservationConfig {
            position_noise_stddev: 0.0,
            velocity_noise_stddev: 0.0,
            orientation_noise_stddev: 0.0,
            dropout_probability: 0.0,
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let t = Timestamp::from_secs(2.0);

        let robot = model.observe(&body(), t, &mut rng).unwrap();
        assert_eq!(robot, body().to_robot(t));
        assert_eq!(robot.last_update_timestamp(), t);
    }

    #[test]
    fn full_dropout_sees_nothing() {
        let model = ObservationModel::new(&ObservationConfig {
            dropout_probability: 1.0,
            ..Default::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!((0..20).all(|_| model.observe(&body(), Timestamp::from_secs(0.0), &mut rng).is_none()));
    }

    #[test]
    fn noise_stays_small() {
        let model = ObservationModel::new(&ObservationConfig {
            dropout_probability: 0.0,
            ..Default::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let robot = model.observe(&body(), Timestamp::from_secs(0.0), &mut rng).unwrap();
            // Default stddev is 5 mm; 10 sigma is never reached in practice.
            assert!(nalgebra::distance(&robot.position(), &body().position) < 0.05);
        }
    }
}
