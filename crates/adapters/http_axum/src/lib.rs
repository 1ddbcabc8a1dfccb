//! # homecontrol-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for every panel operation
//!   (`/api/rooms`, `/api/devices`, `/api/tank`, `/api/settings`, …)
//! - Stream side effects (log lines, notifications, device and tank updates)
//!   as **Server-Sent Events** on `/api/events/stream`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map outcomes into HTTP responses: refused operations answer
//!   `409 Conflict` with the advisory notification, operations waiting for
//!   confirmation answer `202 Accepted`
//!
//! ## Dependency rule
//! Depends on `homecontrol-app` (for port traits and services) and
//! `homecontrol-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
