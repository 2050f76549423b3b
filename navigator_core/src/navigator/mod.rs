// navigator_core/src/navigator/mod.rs

//! Turns a batch of intents into primitives, one tick at a time.

pub mod config;
pub mod obstacle;
pub mod rrt;

pub use config::{NavigatorConfig, PathExpansion, RrtConfig};
pub use obstacle::{Obstacle, ObstacleParams};
pub use rrt::{Path, PathPlanner, PlanRequest, RrtPlanner};

use crate::error::{ConfigError, DispatchError};
use crate::intent::{Intent, MoveIntent, StopIntent};
use crate::primitive::{MovePrimitive, Primitive, StopPrimitive};
use crate::types::RobotId;
use crate::world::World;
use rand::RngCore;
use tracing::{debug, warn};

/// Everything one `assign_primitives` call produced, in intent order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub primitives: Vec<Primitive>,
    pub errors: Vec<DispatchError>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Primitives addressed to one robot.
    pub fn primitives_for(&self, robot_id: RobotId) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(move |primitive| primitive.robot_id() == robot_id)
    }
}

/// Per-intent result before it is folded into the report.
enum Outcome {
    Primitives(Vec<Primitive>),
    Failed(DispatchError),
    Fallback(Primitive, DispatchError),
}

/// # Navigator
/// Owns the configuration and the path planner. It holds no per-tick state,
/// so one instance can serve every tick.
#[derive(Debug)]
pub struct Navigator {
    config: NavigatorConfig,
    planner: Box<dyn PathPlanner>,
}

impl Navigator {
    /// A navigator backed by an [`RrtPlanner`] built from `config.rrt`.
    pub fn new(config: NavigatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let planner = RrtPlanner::new(config.rrt.clone())?;
        Ok(Self {
            config,
            planner: Box::new(planner),
        })
    }

    /// A navigator using any other planner implementation.
    pub fn with_planner(
        config: NavigatorConfig,
        planner: Box<dyn PathPlanner>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, planner })
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Produces primitives for every intent in `intents`.
    ///
    /// # Arguments
    /// * `world` - The snapshot to plan against. It is not modified.
    /// * `intents` - One entry per robot goal. Order is kept in the report.
    /// * `rng` - Random source for sampling planners.
    ///
    /// # Returns
    /// A [`DispatchReport`]. A failing intent never stops the rest of the
    /// batch from being processed.
    pub fn assign_primitives(
        &self,
        world: &World,
        intents: &[Intent],
        rng: &mut dyn RngCore,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for intent in intents {
            let outcome = match intent {
                Intent::Move(move_intent) => self.dispatch_move(world, move_intent, rng),
                Intent::Stop(stop_intent) => Outcome::Primitives(vec![stop(stop_intent)]),
                Intent::Unrecognized { .. } => {
                    warn!(
                        robot_id = intent.robot_id(),
                        intent = intent.name(),
                        "No navigation strategy for intent"
                    );
                    Outcome::Failed(DispatchError::UnrecognizedIntent {
                        name: intent.name().to_string(),
                        robot_id: intent.robot_id(),
                    })
                }
            };

            match outcome {
                Outcome::Primitives(primitives) => report.primitives.extend(primitives),
                Outcome::Failed(error) => report.errors.push(error),
                Outcome::Fallback(primitive, error) => {
                    report.primitives.push(primitive);
                    report.errors.push(error);
                }
            }
        }

        debug!(
            intents = intents.len(),
            primitives = report.primitives.len(),
            errors = report.errors.len(),
            "Assigned primitives"
        );
        report
    }

    fn dispatch_move(
        &self,
        world: &World,
        intent: &MoveIntent,
        rng: &mut dyn RngCore,
    ) -> Outcome {
        let Some(robot) = world.friendly_team().robot(intent.robot_id) else {
            return Outcome::Failed(DispatchError::UnknownRobot(intent.robot_id));
        };

        let params = self.config.obstacle_params();
        let obstacles = obstacle::generate_friendly_obstacles(
            world.friendly_team(),
            self.config.friendly_avoid_dist(),
            &params,
            Some(intent.robot_id),
        )
        .and_then(|mut friendly| {
            friendly.extend(obstacle::generate_enemy_obstacles(
                world.enemy_team(),
                self.config.enemy_avoid_dist(),
                &params,
            )?);
            Ok(friendly)
        });
        let obstacles = match obstacles {
            Ok(obstacles) => obstacles,
            Err(error) => return Outcome::Failed(error.into()),
        };

        let request = PlanRequest {
            start: robot.position(),
            start_orientation: robot.orientation(),
            goal: intent.destination,
            final_orientation: intent.final_angle,
            final_speed: intent.final_speed,
        };
        let bounds = world.field().planning_bounds();

        match self.planner.plan_path(&request, &obstacles, &bounds, rng) {
            Ok(path) => {
                debug!(
                    robot_id = intent.robot_id,
                    waypoints = path.waypoints().len(),
                    iterations = path.iterations(),
                    "Planned path"
                );
                Outcome::Primitives(self.expand_path(intent, path))
            }
            Err(error) if error.is_no_path() => {
                warn!(robot_id = intent.robot_id, %error, "No path, holding position");
                Outcome::Primitives(vec![StopPrimitive::hold(intent.robot_id).into()])
            }
            Err(error) => {
                warn!(robot_id = intent.robot_id, %error, "Planner failed, holding position");
                Outcome::Fallback(
                    StopPrimitive::hold(intent.robot_id).into(),
                    DispatchError::Planning {
                        robot_id: intent.robot_id,
                        source: error,
                    },
                )
            }
        }
    }

    fn expand_path(&self, intent: &MoveIntent, path: Path) -> Vec<Primitive> {
        let to_primitive = |destination| {
            Primitive::Move(MovePrimitive {
                robot_id: intent.robot_id,
                destination,
                final_angle: intent.final_angle,
                final_speed: intent.final_speed,
            })
        };

        match self.config.path_expansion {
            PathExpansion::SingleShot => path.end().copied().map(to_primitive).into_iter().collect(),
            PathExpansion::PerWaypoint => path
                .into_waypoints()
                .into_iter()
                .skip(1)
                .map(to_primitive)
                .collect(),
        }
    }
}

fn stop(intent: &StopIntent) -> Primitive {
    Primitive::Stop(StopPrimitive {
        robot_id: intent.robot_id,
        coast: intent.coast,
    })
}
