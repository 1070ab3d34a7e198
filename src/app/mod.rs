//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules of the pet: need decay, care actions,
//! mode switching and the awake/asleep cycle.  All interaction with disk,
//! clock and terminal happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a real store.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
