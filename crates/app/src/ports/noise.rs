//! Simulation noise port: the random inputs of the tank simulation.
//!
//! The domain tick takes these as plain values; implementations decide
//! where they come from (seeded RNG, fixed script in tests, …).

/// Source of the random inputs fed to the tank.
pub trait SimulationNoise: Send + Sync {
    /// Whether passive drainage happens on this tick.
    fn drains(&self) -> bool;

    /// Sensor jitter applied on a system sync, within `[-1, 1]`.
    fn sync_jitter(&self) -> f64;
}

impl<T: SimulationNoise + ?Sized> SimulationNoise for std::sync::Arc<T> {
    fn drains(&self) -> bool {
        (**self).drains()
    }

    fn sync_jitter(&self) -> f64 {
        (**self).sync_jitter()
    }
}
