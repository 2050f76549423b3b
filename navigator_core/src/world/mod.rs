// navigator_core/src/world/mod.rs

//! The read-only world snapshot the navigator plans against: the field, both
//! teams, and the kinematic state of every robot on them.

use crate::error::StateError;
use crate::types::{Bounds, RobotId, Timestamp};
use serde::{Deserialize, Serialize};

pub mod motion;
pub mod robot;

pub use motion::{LinearMotionModel, MotionModel, MotionSnapshot};
pub use robot::Robot;

/// Playing-field geometry, centred on the origin with the length along X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    /// Touchline to touchline along X, in metres.
    pub length: f64,
    /// Along Y, in metres.
    pub width: f64,
    /// Extra space outside the field lines robots may still drive in.
    #[serde(default)]
    pub boundary_margin: f64,
}

impl Default for Field {
    // Division B dimensions.
    fn default() -> Self {
        Self {
            length: 9.0,
            width: 6.0,
            boundary_margin: 0.3,
        }
    }
}

impl Field {
    pub fn new(length: f64, width: f64, boundary_margin: f64) -> Self {
        Self {
            length,
            width,
            boundary_margin,
        }
    }

    /// The region a planner may sample and route through.
    pub fn planning_bounds(&self) -> Bounds {
        let half_x = self.length / 2.0 + self.boundary_margin;
        let half_y = self.width / 2.0 + self.boundary_margin;
        Bounds::from_ranges((-half_x, half_x), (-half_y, half_y))
    }
}

/// The robots of one side.
#[derive(Debug, Clone, Default)]
pub struct Team {
    robots: Vec<Robot>,
}

impl Team {
    pub fn new(robots: Vec<Robot>) -> Self {
        Self { robots }
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|robot| robot.id() == id)
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// Applies a fresh observation. Robots seen for the first time are added.
    pub fn update_robot(&mut self, observation: &Robot) -> Result<(), StateError> {
        match self.robots.iter_mut().find(|robot| robot.id() == observation.id()) {
            Some(robot) => robot.update_state_from(observation),
            None => {
                self.robots.push(observation.clone());
                Ok(())
            }
        }
    }

    /// Advances every robot whose last update is older than `timestamp` to its
    /// predicted state. Robots already at `timestamp` are left alone.
    pub fn update_to_predicted_state(&mut self, timestamp: Timestamp) -> Result<(), StateError> {
        for robot in self
            .robots
            .iter_mut()
            .filter(|robot| robot.last_update_timestamp() < timestamp)
        {
            robot.update_state_to_predicted_state(timestamp)?;
        }
        Ok(())
    }
}

/// Everything the navigator needs to know about one control tick.
#[derive(Debug, Clone, Default)]
pub struct World {
    field: Field,
    friendly_team: Team,
    enemy_team: Team,
    timestamp: Timestamp,
}

impl World {
    pub fn new(field: Field, friendly_team: Team, enemy_team: Team, timestamp: Timestamp) -> Self {
        Self {
            field,
            friendly_team,
            enemy_team,
            timestamp,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn friendly_team(&self) -> &Team {
        &self.friendly_team
    }

    pub fn enemy_team(&self) -> &Team {
        &self.enemy_team
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    // --- Between-tick updates ---

    pub fn friendly_team_mut(&mut self) -> &mut Team {
        &mut self.friendly_team
    }

    pub fn enemy_team_mut(&mut self) -> &mut Team {
        &mut self.enemy_team
    }

    /// Moves the world clock forward and catches up every robot that was not
    /// observed at `timestamp` to its predicted state.
    pub fn advance_to(&mut self, timestamp: Timestamp) -> Result<(), StateError> {
        if timestamp < self.timestamp {
            return Err(StateError::StaleTimestamp {
                last: self.timestamp,
                requested: timestamp,
            });
        }
        self.friendly_team.update_to_predicted_state(timestamp)?;
        self.enemy_team.update_to_predicted_state(timestamp)?;
        self.timestamp = timestamp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Vector};

    #[test]
    fn planning_bounds_include_margin() {
        let bounds = Field::new(9.0, 6.0, 0.5).planning_bounds();
        assert_eq!(bounds, Bounds::from_ranges((-5.0, 5.0), (-3.5, 3.5)));
    }

    #[test]
    fn first_observation_adds_robot() {
        let mut team = Team::default();
        let observation = Robot::with_state(
            2,
            Point::new(1.0, 0.0),
            Vector::zeros(),
            0.0,
            0.0,
            Timestamp::from_secs(1.0),
        );
        team.update_robot(&observation).unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team.robot(2), Some(&observation));
        assert!(team.robot(3).is_none());
    }

    #[test]
    fn later_observation_updates_existing_robot() {
        let mut team = Team::new(vec![Robot::new(1, Timestamp::from_secs(0.0))]);
        let observation = Robot::with_state(
            1,
            Point::new(0.5, 0.5),
            Vector::new(1.0, 0.0),
            0.1,
            0.0,
            Timestamp::from_secs(0.5),
        );
        team.update_robot(&observation).unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team.robot(1).unwrap().position(), Point::new(0.5, 0.5));

        let stale = Robot::new(1, Timestamp::from_secs(0.1));
        assert!(team.update_robot(&stale).is_err());
        assert_eq!(team.robot(1).unwrap().position(), Point::new(0.5, 0.5));
    }

    #[test]
    fn prediction_only_advances_lagging_robots() {
        let moving = Robot::with_state(
            1,
            Point::new(0.0, 0.0),
            Vector::new(2.0, 0.0),
            0.0,
            0.0,
            Timestamp::from_secs(1.0),
        );
        let current = Robot::with_state(
            2,
            Point::new(3.0, 0.0),
            Vector::new(2.0, 0.0),
            0.0,
            0.0,
            Timestamp::from_secs(1.5),
        );
        let mut team = Team::new(vec![moving, current]);
        team.update_to_predicted_state(Timestamp::from_secs(1.5)).unwrap();

        assert_eq!(team.robot(1).unwrap().position(), Point::new(1.0, 0.0));
        assert_eq!(team.robot(2).unwrap().position(), Point::new(3.0, 0.0));
        assert!(team
            .robots()
            .iter()
            .all(|robot| robot.last_update_timestamp() == Timestamp::from_secs(1.5)));
    }

    #[test]
    fn world_advance_rejects_going_back() {
        let t0 = Timestamp::from_secs(2.0);
        let friendly = Team::new(vec![Robot::with_state(
            0,
            Point::new(0.0, 0.0),
            Vector::new(0.0, 1.0),
            0.0,
            0.0,
            t0,
        )]);
        let mut world = World::new(Field::default(), friendly, Team::default(), t0);

        assert!(world.advance_to(Timestamp::from_secs(1.0)).is_err());
        world.advance_to(Timestamp::from_secs(3.0)).unwrap();
        assert_eq!(world.timestamp(), Timestamp::from_secs(3.0));
        assert_eq!(world.friendly_team().robot(0).unwrap().position(), Point::new(0.0, 1.0));
    }
}
