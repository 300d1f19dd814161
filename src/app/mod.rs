//! Application core — pure domain logic, zero I/O.
//!
//! Code entry, the distance-scaled alert cycle and the Armed/Disarmed
//! controller.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod alert;
pub mod credential;
pub mod events;
pub mod ports;
pub mod service;
