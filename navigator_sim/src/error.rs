// navigator_sim/src/error.rs

use navigator_core::error::{ConfigError, StateError};
use navigator_core::types::RobotId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario file not found: {}", .0.display())]
    ScenarioNotFound(PathBuf),
    #[error("failed to load scenario: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("robot id {id} appears more than once in the {team} team")]
    DuplicateRobot { team: &'static str, id: RobotId },
    #[error("observation noise: {0}")]
    Noise(#[from] rand_distr::NormalError),
    #[error("world update failed: {0}")]
    State(#[from] StateError),
}

impl From<figment::Error> for SimError {
    fn from(error: figment::Error) -> Self {
        SimError::Load(Box::new(error))
    }
}
