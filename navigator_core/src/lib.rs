// navigator_core/src/lib.rs

// Public modules of the navigator library.
pub mod error;
pub mod intent;
pub mod navigator;
pub mod prelude;
pub mod primitive;
pub mod types;
pub mod world;
