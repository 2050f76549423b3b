// navigator_core/src/navigator/obstacle.rs

use crate::error::StateError;
use crate::types::{Point, RobotId};
use crate::world::{Robot, Team};

/// Largest distance from a robot's centre to its outer shell, in metres.
pub const ROBOT_MAX_RADIUS_METERS: f64 = 0.09;

/// A circular keep-out region, valid for the planning cycle that built it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Point,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True if `point` is strictly inside the circle.
    pub fn contains(&self, point: &Point) -> bool {
        nalgebra::distance(&self.center, point) < self.radius
    }

    /// Distance from `point` to the circle boundary; negative inside.
    pub fn distance_to(&self, point: &Point) -> f64 {
        nalgebra::distance(&self.center, point) - self.radius
    }

    /// True if any part of the segment `a -> b` is strictly inside the circle.
    /// Grazing the boundary does not count as a collision.
    pub fn intersects_segment(&self, a: &Point, b: &Point) -> bool {
        distance_point_to_segment(&self.center, a, b) < self.radius
    }

    /// True if travelling along `a -> b` would collide with this obstacle.
    ///
    /// A segment that starts inside the circle is only blocked when it heads
    /// further in. Along a segment that points away from the centre the
    /// distance to the centre never decreases, so the robot escapes and
    /// cannot re-enter on the same segment.
    pub fn blocks_segment(&self, a: &Point, b: &Point) -> bool {
        if self.contains(a) {
            return (b - a).dot(&(a - self.center)) < 0.0;
        }
        self.intersects_segment(a, b)
    }
}

/// Euclidean distance from `p` to the closest point on segment `a -> b`.
pub fn distance_point_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab = b - a;
    let length_squared = ab.norm_squared();
    if length_squared <= f64::EPSILON {
        return nalgebra::distance(p, a);
    }
    // Project p onto the segment, clamped to its end points.
    let t = ((p - a).dot(&ab) / length_squared).clamp(0.0, 1.0);
    nalgebra::distance(p, &(a + ab * t))
}

/// True if the segment `a -> b` is clear of every obstacle. See
/// [`Obstacle::blocks_segment`] for segments starting inside one.
pub fn segment_is_clear(a: &Point, b: &Point, obstacles: &[Obstacle]) -> bool {
    !obstacles.iter().any(|obstacle| obstacle.blocks_segment(a, b))
}

/// Shared parameters for turning robots into obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleParams {
    /// Physical radius of a robot.
    pub robot_radius: f64,
    /// How far ahead, in seconds, to predict each robot's position. 0 uses
    /// the last observed position.
    pub prediction_horizon: f64,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        Self {
            robot_radius: ROBOT_MAX_RADIUS_METERS,
            prediction_horizon: 0.0,
        }
    }
}

/// Builds the obstacle for a single robot: its (predicted) position inflated
/// by the robot radius and the avoidance margin.
pub fn robot_obstacle(
    robot: &Robot,
    avoid_dist: f64,
    params: &ObstacleParams,
) -> Result<Obstacle, StateError> {
    let center = robot.estimate_position_at_future_time(params.prediction_horizon)?;
    Ok(Obstacle::new(center, params.robot_radius + avoid_dist))
}

/// One obstacle per friendly robot, optionally leaving out the robot being
/// planned for.
pub fn generate_friendly_obstacles(
    team: &Team,
    avoid_dist: f64,
    params: &ObstacleParams,
    exclude: Option<RobotId>,
) -> Result<Vec<Obstacle>, StateError> {
    team.robots()
        .iter()
        .filter(|robot| Some(robot.id()) != exclude)
        .map(|robot| robot_obstacle(robot, avoid_dist, params))
        .collect()
}

/// One obstacle per enemy robot.
pub fn generate_enemy_obstacles(
    team: &Team,
    avoid_dist: f64,
    params: &ObstacleParams,
) -> Result<Vec<Obstacle>, StateError> {
    team.robots()
        .iter()
        .map(|robot| robot_obstacle(robot, avoid_dist, params))
        .collect()
}
