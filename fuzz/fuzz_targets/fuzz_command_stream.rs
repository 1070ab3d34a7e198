//! Fuzz target: interleaved commands and elapsed time
//!
//! Each input byte is either a command word (parsed through `FromStr`
//! from a small vocabulary plus the raw byte) or a slice of elapsed time.
//!
//! Invariants checked:
//! - No panics for any byte sequence
//! - Needs stay in `[0, 100]` after every step
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use petsim::adapters::memory::MemoryStore;
use petsim::app::commands::PetCommand;
use petsim::app::events::PetEvent;
use petsim::app::ports::{ClockPort, EventSink};
use petsim::app::service::PetService;
use petsim::config::SimConfig;
use petsim::needs::Need;

struct Frozen;

impl ClockPort for Frozen {
    fn now_ms(&self) -> i64 {
        0
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &PetEvent) {}
}

const WORDS: [&str; 6] = ["feed", "play", "mode", "reset", "f", "p"];

fuzz_target!(|data: &[u8]| {
    let config = SimConfig {
        rng_seed: Some(1),
        ..Default::default()
    };
    let Ok(mut svc) = PetService::new(config, MemoryStore::new(), Frozen) else {
        return;
    };
    if svc.start(&mut Discard).is_err() {
        return;
    }

    for &byte in data {
        if byte & 0x80 == 0 {
            let word = WORDS[usize::from(byte) % WORDS.len()];
            if let Ok(cmd) = word.parse::<PetCommand>() {
                let _ = svc.handle_command(cmd, &mut Discard);
            }
            let _ = char::from(byte).to_string().parse::<PetCommand>();
        } else {
            let _ = svc.advance(u64::from(byte & 0x7f) * 500, &mut Discard);
        }

        let needs = svc.needs();
        for need in Need::ALL {
            assert!((0.0..=100.0).contains(&needs.get(need)));
        }
    }
});
