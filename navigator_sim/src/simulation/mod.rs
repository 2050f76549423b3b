// navigator_sim/src/simulation/mod.rs

//! Headless closed-loop run of the navigator.
//!
//! Each tick:
//! 1. the navigator turns the intents into primitives against the current
//!    `World`;
//! 2. the firmware model executes those primitives on the true friendly
//!    bodies, and enemies drift at constant velocity;
//! 3. the vision model observes every body, and robots it missed are carried
//!    forward by their motion model.

pub mod bodies;
pub mod firmware;
pub mod observation;

use crate::config::ScenarioConfig;
use crate::error::SimError;
use crate::prng::SimulationRng;
use bodies::Body;
use firmware::Firmware;
use navigator_core::intent::Intent;
use navigator_core::navigator::Navigator;
use navigator_core::primitive::Primitive;
use navigator_core::types::{Bounds, Point, RobotId, Timestamp};
use navigator_core::world::{Team, World};
use observation::ObservationModel;
use tracing::{debug, info, warn};

/// Progress of one Move intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub robot_id: RobotId,
    /// First tick after which the robot was within tolerance.
    pub reached_at_tick: Option<u64>,
    /// Ground-truth distance to the destination when the run ended.
    pub final_distance: f64,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationSummary {
    pub ticks_run: u64,
    pub simulated_seconds: f64,
    pub arrivals: Vec<Arrival>,
    pub primitives_issued: usize,
    /// Stop primitives sent in answer to Move intents.
    pub holds: usize,
    pub dispatch_errors: usize,
    pub dropped_observations: usize,
    /// Smallest centre-to-centre distance seen between a friendly robot and
    /// any other robot. Infinite with fewer than two robots.
    pub closest_approach: f64,
}

impl SimulationSummary {
    pub fn all_reached(&self) -> bool {
        self.arrivals.iter().all(|arrival| arrival.reached_at_tick.is_some())
    }

    pub fn log(&self) {
        info!(
            ticks = self.ticks_run,
            seconds = self.simulated_seconds,
            primitives = self.primitives_issued,
            holds = self.holds,
            dispatch_errors = self.dispatch_errors,
            dropped_observations = self.dropped_observations,
            closest_approach = self.closest_approach,
            "Simulation finished"
        );
        for arrival in &self.arrivals {
            match arrival.reached_at_tick {
                Some(tick) => info!(robot_id = arrival.robot_id, tick, "Destination reached"),
                None => warn!(
                    robot_id = arrival.robot_id,
                    distance = arrival.final_distance,
                    "Destination not reached"
                ),
            }
        }
    }
}

/// # Simulation
/// Owns the ground truth, the navigator's view of it, and the random source.
#[derive(Debug)]
pub struct Simulation {
    scenario: ScenarioConfig,
    navigator: Navigator,
    firmware: Firmware,
    observation: ObservationModel,
    rng: SimulationRng,
    world: World,
    friendly_bodies: Vec<Body>,
    enemy_bodies: Vec<Body>,
    tick: u64,
    summary: SimulationSummary,
}

impl Simulation {
    pub fn new(scenario: ScenarioConfig, rng: SimulationRng) -> Result<Self, SimError> {
        scenario.validate()?;

        let navigator = Navigator::new(scenario.navigator.clone())?;
        let firmware = Firmware::new(scenario.simulation.firmware.clone());
        let observation = ObservationModel::new(&scenario.simulation.observation)?;

        let friendly_bodies: Vec<Body> = scenario.friendly.iter().map(Body::from_config).collect();
        let enemy_bodies: Vec<Body> = scenario.enemy.iter().map(Body::from_config).collect();

        // The first frame is a perfect observation.
        let start = Timestamp::from_secs(0.0);
        let world = World::new(
            scenario.field,
            Team::new(friendly_bodies.iter().map(|b| b.to_robot(start)).collect()),
            Team::new(enemy_bodies.iter().map(|b| b.to_robot(start)).collect()),
            start,
        );

        let arrivals = move_targets(&scenario.intents)
            .map(|(robot_id, _)| Arrival {
                robot_id,
                reached_at_tick: None,
                final_distance: f64::INFINITY,
            })
            .collect();

        info!(
            friendly = friendly_bodies.len(),
            enemy = enemy_bodies.len(),
            intents = scenario.intents.len(),
            "Simulation ready"
        );

        let mut simulation = Self {
            scenario,
            navigator,
            firmware,
            observation,
            rng,
            world,
            friendly_bodies,
            enemy_bodies,
            tick: 0,
            summary: SimulationSummary {
                arrivals,
                closest_approach: f64::INFINITY,
                ..Default::default()
            },
        };
        simulation.record_progress();
        Ok(simulation)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn friendly_bodies(&self) -> &[Body] {
        &self.friendly_bodies
    }

    pub fn enemy_bodies(&self) -> &[Body] {
        &self.enemy_bodies
    }

    pub fn summary(&self) -> &SimulationSummary {
        &self.summary
    }

    /// Runs until every Move intent is reached or `max_ticks` ticks have been
    /// spent.
    pub fn run(&mut self, max_ticks: u64) -> Result<SimulationSummary, SimError> {
        while self.tick < max_ticks {
            self.step()?;
            if self.summary.all_reached() {
                info!(tick = self.tick, "All Move intents reached");
                break;
            }
        }
        Ok(self.summary.clone())
    }

    /// Advances the simulation by one control tick.
    pub fn step(&mut self) -> Result<(), SimError> {
        let dt = self.scenario.simulation.tick_period();

        // 1. Plan
        let report =
            self.navigator
                .assign_primitives(&self.world, &self.scenario.intents, &mut self.rng.0);
        for error in &report.errors {
            debug!(tick = self.tick, %error, "Dispatch error");
        }
        self.summary.primitives_issued += report.primitives.len();
        self.summary.dispatch_errors += report.errors.len();
        self.summary.holds += count_holds(&self.scenario.intents, &report.primitives);

        // 2. Act
        for body in &mut self.friendly_bodies {
            // For per-waypoint expansion the first primitive is the next waypoint.
            let primitive = report.primitives_for(body.id).next();
            self.firmware.execute(body, primitive, dt);
        }
        let bounds = self.world.field().planning_bounds();
        for body in &mut self.enemy_bodies {
            body.step_bouncing(dt, &bounds);
        }

        // 3. Observe
        self.tick += 1;
        let now = Timestamp::from_secs(self.tick as f64 * dt);
        let dropped = observe_team(
            &self.observation,
            &self.friendly_bodies,
            self.world.friendly_team_mut(),
            now,
            &mut self.rng,
        )? + observe_team(
            &self.observation,
            &self.enemy_bodies,
            self.world.enemy_team_mut(),
            now,
            &mut self.rng,
        )?;
        self.summary.dropped_observations += dropped;
        self.world.advance_to(now)?;

        self.summary.ticks_run = self.tick;
        self.summary.simulated_seconds = now.as_secs();
        self.record_progress();
        Ok(())
    }

    fn record_progress(&mut self) {
        let tolerance = self.scenario.simulation.arrival_tolerance;
        for (robot_id, destination) in move_targets(&self.scenario.intents) {
            let Some(body) = self.friendly_bodies.iter().find(|b| b.id == robot_id) else {
                continue;
            };
            let distance = nalgebra::distance(&body.position, &destination);
            if let Some(arrival) = self.summary.arrivals.iter_mut().find(|a| a.robot_id == robot_id) {
                arrival.final_distance = distance;
                if arrival.reached_at_tick.is_none() && distance <= tolerance {
                    debug!(robot_id, tick = self.tick, "Robot reached its destination");
                    arrival.reached_at_tick = Some(self.tick);
                }
            }
        }

        let closest = closest_approach(&self.friendly_bodies, &self.enemy_bodies);
        self.summary.closest_approach = self.summary.closest_approach.min(closest);
    }

    /// Planning bounds of the simulated field.
    pub fn bounds(&self) -> Bounds {
        self.world.field().planning_bounds()
    }
}

fn move_targets(intents: &[Intent]) -> impl Iterator<Item = (RobotId, Point)> + '_ {
    intents.iter().filter_map(|intent| match intent {
        Intent::Move(m) => Some((m.robot_id, m.destination)),
        _ => None,
    })
}

/// Stop primitives addressed to robots that were asked to move.
fn count_holds(intents: &[Intent], primitives: &[Primitive]) -> usize {
    primitives
        .iter()
        .filter(|primitive| {
            matches!(primitive, Primitive::Stop(_))
                && move_targets(intents).any(|(robot_id, _)| robot_id == primitive.robot_id())
        })
        .count()
}

/// Feeds one observation per body into `team`. Returns how many were dropped.
fn observe_team(
    model: &ObservationModel,
    bodies: &[Body],
    team: &mut Team,
    now: Timestamp,
    rng: &mut SimulationRng,
) -> Result<usize, SimError> {
    let mut dropped = 0;
    for body in bodies {
        match model.observe(body, now, &mut rng.0) {
            Some(observation) => team.update_robot(&observation)?,
            None => dropped += 1,
        }
    }
    Ok(dropped)
}

fn closest_approach(friendly: &[Body], enemy: &[Body]) -> f64 {
    let mut closest = f64::INFINITY;
    for (i, a) in friendly.iter().enumerate() {
        for b in friendly.iter().skip(i + 1).chain(enemy.iter()) {
            closest = closest.min(nalgebra::distance(&a.position, &b.position));
        }
    }
    closest
}
