//! Random noise source for the tank simulation.

use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use homecontrol_app::ports::SimulationNoise;

/// Chance that the tank drains on a tick while the pump is off.
pub const DEFAULT_DRAIN_PROBABILITY: f64 = 0.3;

/// [`SimulationNoise`] backed by a `ChaCha8Rng`.
///
/// A fixed seed makes a run reproducible.
pub struct RandomNoise {
    rng: Mutex<ChaCha8Rng>,
    drain_probability: f64,
}

impl RandomNoise {
    /// Seeded source; the same seed yields the same sequence.
    #[must_use]
    pub fn seeded(seed: u64, drain_probability: f64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), drain_probability)
    }

    /// Source seeded from the operating system.
    #[must_use]
    pub fn from_entropy(drain_probability: f64) -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy(), drain_probability)
    }

    fn with_rng(rng: ChaCha8Rng, drain_probability: f64) -> Self {
        Self {
            rng: Mutex::new(rng),
            drain_probability: drain_probability.clamp(0.0, 1.0),
        }
    }
}

impl SimulationNoise for RandomNoise {
    fn drains(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(self.drain_probability)
    }

    fn sync_jitter(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(-1.0..=1.0)
    }
}
