// navigator_sim/src/prelude.rs

// --- Entry points ---
pub use crate::cli::Cli;
pub use crate::config::{load_scenario, load_scenario_str, ScenarioConfig};
pub use crate::error::SimError;
pub use crate::prng::SimulationRng;
pub use crate::simulation::{Arrival, Simulation, SimulationSummary};

// --- Re-export the core library's prelude for convenience ---
pub use navigator_core::prelude::*;
