//! # homecontrol-adapter-virtual
//!
//! Simulated hardware for the homecontrol panel. Nothing here talks to a
//! real controller: addresses and GPIO pins are decorative.
//!
//! ## Provided pieces
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`demo_home`] | Four rooms, four devices and a tank at 65 % |
//! | [`RandomNoise`] | Drainage roll and sync jitter for the tank simulation |
//!
//! ## Dependency rule
//!
//! Depends on `homecontrol-app` (port traits) and `homecontrol-domain` only.

mod demo;
mod noise;

pub use demo::demo_home;
pub use noise::{DEFAULT_DRAIN_PROBABILITY, RandomNoise};
