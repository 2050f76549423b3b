// navigator_sim/src/lib.rs

// Public modules of the simulation library.
pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
pub mod prng;
pub mod simulation;
