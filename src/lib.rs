//! PetSim library.
//!
//! A virtual pet whose needs decay on timers, persisted between runs in a
//! flat key-value store.  Exposes the pure-logic modules for integration
//! testing; the `petsim` binary wires them to disk, clock and terminal.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod needs;
pub mod scheduler;
pub mod storage;
