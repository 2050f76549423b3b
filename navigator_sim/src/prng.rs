// navigator_sim/src/prng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The single pseudo-random source of a simulation run. Planner sampling,
/// observation noise and dropouts all draw from it, so a fixed seed replays
/// a run exactly.
#[derive(Debug, Clone)]
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }
}
