//! Fuzz target: loading a pet from an arbitrary store
//!
//! Splits the input on `\n` and writes the pieces as the raw values of
//! the persisted keys, then starts a service on that store.
//!
//! Invariants checked:
//! - No panics under any stored text
//! - Every need lands in `[0, 100]` after load and catch-up
//!
//! cargo fuzz run fuzz_stored_state

#![no_main]

use libfuzzer_sys::fuzz_target;
use petsim::adapters::memory::MemoryStore;
use petsim::app::events::PetEvent;
use petsim::app::ports::{ClockPort, EventSink, StorePort};
use petsim::app::service::PetService;
use petsim::config::SimConfig;
use petsim::needs::Need;
use petsim::storage::PERSISTED_KEYS;

struct Frozen;

impl ClockPort for Frozen {
    fn now_ms(&self) -> i64 {
        1_700_000_000_000
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &PetEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut store = MemoryStore::new();
    for (key, value) in PERSISTED_KEYS.iter().zip(text.split('\n')) {
        let _ = store.set(key, value);
    }

    let config = SimConfig {
        rng_seed: Some(0),
        ..Default::default()
    };
    let Ok(mut svc) = PetService::new(config, store, Frozen) else {
        return;
    };
    if svc.start(&mut Discard).is_err() {
        return;
    }

    let needs = svc.needs();
    for need in Need::ALL {
        assert!((0.0..=100.0).contains(&needs.get(need)));
    }
});
