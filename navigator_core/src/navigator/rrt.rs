// navigator_core/src/navigator/rrt.rs

//! Rapidly-exploring random tree planner for a holonomic robot in the plane.

use crate::error::{ConfigError, PlanningError};
use crate::navigator::config::RrtConfig;
use crate::navigator::obstacle::{segment_is_clear, Obstacle};
use crate::types::{Bounds, Point};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::fmt::Debug;
use tracing::debug;

/// What a single planner invocation is asked to solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub start: Point,
    pub start_orientation: f64,
    pub goal: Point,
    pub final_orientation: f64,
    pub final_speed: f64,
}

/// A collision-free polyline from the start to (within tolerance of) the goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Point>,
    /// Sampling iterations spent finding it. 0 if the straight line was clear.
    iterations: usize,
}

impl Path {
    pub fn new(waypoints: Vec<Point>, iterations: usize) -> Self {
        Self {
            waypoints,
            iterations,
        }
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn into_waypoints(self) -> Vec<Point> {
        self.waypoints
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn start(&self) -> Option<&Point> {
        self.waypoints.first()
    }

    pub fn end(&self) -> Option<&Point> {
        self.waypoints.last()
    }

    /// Sum of the segment lengths.
    pub fn length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
            .sum()
    }
}

// --- PATH PLANNER TRAIT ---
/// The contract for any algorithm that finds a collision-free path.
///
/// The random source is injected so that runs are reproducible from a seed.
pub trait PathPlanner: Debug + Send + Sync {
    fn plan_path(
        &self,
        request: &PlanRequest,
        obstacles: &[Obstacle],
        bounds: &Bounds,
        rng: &mut dyn RngCore,
    ) -> Result<Path, PlanningError>;
}

// --- Search Tree ---

#[derive(Debug, Clone)]
struct RrtNode {
    position: Point,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena of tree nodes. Index 0 is the root; a node only ever points back to
/// its parent by index, so the tree is acyclic by construction.
#[derive(Debug, Clone)]
struct RrtTree {
    nodes: Vec<RrtNode>,
}

impl RrtTree {
    fn new(root: Point) -> Self {
        Self {
            nodes: vec![RrtNode {
                position: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn position(&self, index: usize) -> Point {
        self.nodes[index].position
    }

    fn insert(&mut self, position: Point, parent: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(RrtNode {
            position,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Index of the node closest to `point`. Linear scan.
    fn nearest(&self, point: &Point) -> usize {
        self.nodes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = nalgebra::distance_squared(&a.position, point);
                let db = nalgebra::distance_squared(&b.position, point);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    /// Positions from the root down to `index`.
    fn path_from_root(&self, index: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            path.push(self.nodes[i].position);
            current = self.nodes[i].parent;
        }
        path.reverse();
        path
    }
}

/// Moves from `from` toward `to` by at most `step_size`.
fn steer(from: &Point, to: &Point, step_size: f64) -> Point {
    let direction = to - from;
    let distance = direction.norm();
    if distance <= step_size {
        *to
    } else {
        from + direction * (step_size / distance)
    }
}

/// Greedily replaces runs of waypoints with straight segments wherever the
/// straight segment is clear. Every consecutive pair in the input must
/// already be clear.
pub fn shortcut_path(waypoints: &[Point], obstacles: &[Obstacle]) -> Vec<Point> {
    if waypoints.len() <= 2 {
        return waypoints.to_vec();
    }

    let last = waypoints.len() - 1;
    let mut simplified = vec![waypoints[0]];
    let mut i = 0;
    while i < last {
        // Farthest waypoint visible from i; i + 1 always is.
        let mut j = last;
        while j > i + 1 && !segment_is_clear(&waypoints[i], &waypoints[j], obstacles) {
            j -= 1;
        }
        simplified.push(waypoints[j]);
        i = j;
    }
    simplified
}

/// # RrtPlanner
/// Goal-biased RRT over the planning bounds.
#[derive(Debug, Clone, Default)]
pub struct RrtPlanner {
    config: RrtConfig,
}

impl RrtPlanner {
    pub fn new(config: RrtConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    fn sample(&self, goal: &Point, bounds: &Bounds, rng: &mut dyn RngCore) -> Point {
        if rng.gen_bool(self.config.goal_bias) {
            *goal
        } else {
            Point::new(
                rng.gen_range(bounds.min.x..=bounds.max.x),
                rng.gen_range(bounds.min.y..=bounds.max.y),
            )
        }
    }

    /// The sampling loop proper. Assumes the inputs were already checked.
    fn grow(
        &self,
        request: &PlanRequest,
        obstacles: &[Obstacle],
        bounds: &Bounds,
        rng: &mut dyn RngCore,
    ) -> Result<Path, PlanningError> {
        let goal = request.goal;
        let mut tree = RrtTree::new(request.start);

        for iteration in 1..=self.config.max_iterations {
            let sample = self.sample(&goal, bounds, rng);
            let nearest = tree.nearest(&sample);
            let from = tree.position(nearest);
            let candidate = steer(&from, &sample, self.config.step_size);

            if nalgebra::distance_squared(&from, &candidate) <= f64::EPSILON {
                continue;
            }
            if !segment_is_clear(&from, &candidate, obstacles) {
                continue;
            }

            let index = tree.insert(candidate, nearest);
            if nalgebra::distance(&candidate, &goal) > self.config.goal_tolerance {
                continue;
            }

            let mut waypoints = tree.path_from_root(index);
            if candidate != goal && segment_is_clear(&candidate, &goal, obstacles) {
                waypoints.push(goal);
            }
            if self.config.simplify_path {
                waypoints = shortcut_path(&waypoints, obstacles);
            }

            let path = Path::new(waypoints, iteration);
            debug!(
                iterations = iteration,
                tree_size = tree.len(),
                waypoints = path.waypoints().len(),
                length = path.length(),
                "RRT reached goal"
            );
            return Ok(path);
        }

        debug!(
            iterations = self.config.max_iterations,
            tree_size = tree.len(),
            "RRT exhausted its iteration budget"
        );
        Err(PlanningError::NoPathFound {
            iterations: self.config.max_iterations,
        })
    }
}

impl PathPlanner for RrtPlanner {
    fn plan_path(
        &self,
        request: &PlanRequest,
        obstacles: &[Obstacle],
        bounds: &Bounds,
        rng: &mut dyn RngCore,
    ) -> Result<Path, PlanningError> {
        self.config.validate()?;
        if !bounds.is_valid() {
            return Err(ConfigError::invalid("bounds", "planning bounds must have a positive area").into());
        }
        if !bounds.contains(&request.start) {
            return Err(PlanningError::StartOutOfBounds(request.start));
        }
        if !bounds.contains(&request.goal) {
            return Err(PlanningError::GoalOutOfBounds(request.goal));
        }
        if obstacles.iter().any(|o| o.contains(&request.goal)) {
            return Err(PlanningError::GoalObstructed(request.goal));
        }

        if segment_is_clear(&request.start, &request.goal, obstacles) {
            return Ok(Path::new(vec![request.start, request.goal], 0));
        }

        self.grow(request, obstacles, bounds, rng)
    }
}
