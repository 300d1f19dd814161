//! KeyGuard firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;

// Hardware-facing modules.  On host targets the drivers fall back to
// in-memory simulation, so these compile (and test) everywhere.
pub mod adapters;
pub mod drivers;
pub mod sensors;
