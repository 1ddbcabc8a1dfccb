//! # homecontrol-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventPublisher`: broadcast side effects (log lines, notifications, …)
//!   - `SimulationNoise`: random inputs of the tank simulation
//!   - `CommandInterpreter`: natural-language command parsing
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HomeService`: every home operation, serialised behind one lock
//!   - `CommandService`: interpret a prompt and apply the resulting actions
//!   - `TankSimulator`: the periodic tank tick
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `homecontrol-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
pub mod simulator;
