//! # homecontrol-domain
//!
//! Pure domain model for the homecontrol panel.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Rooms** and the **Devices** (lights, fans, the pump) inside them
//! - Define the **Water tank** and its per-tick simulation step
//! - Define **Settings**, the **Activity log** and advisory **Notifications**
//! - Define the **Home** aggregate enforcing every control gate and
//!   confirmation rule
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Randomness is passed in as plain values; IO boundaries are traits in the
//! `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod confirmation;
pub mod device;
pub mod event;
pub mod home;
pub mod log;
pub mod notification;
pub mod room;
pub mod settings;
pub mod tank;
