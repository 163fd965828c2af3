// optflow_sim/src/simulation/core/prng.rs

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// A newtype wrapper around `ChaCha8Rng`.
/// This is the central, deterministic pseudo-random number generator for the simulation.
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seeds from the scenario, or from entropy when no seed is given.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                info!("Seeding simulation PRNG with {}", seed);
                Self(ChaCha8Rng::seed_from_u64(seed))
            }
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }

    /// A child generator for one sensor. Deterministic given the parent seed
    /// and the order in which sensors are created.
    pub fn fork(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_forks() {
        let mut a = SimulationRng::from_seed_option(Some(42));
        let mut b = SimulationRng::from_seed_option(Some(42));
        let xa: u64 = a.fork().gen();
        let xb: u64 = b.fork().gen();
        assert_eq!(xa, xb);
    }
}
