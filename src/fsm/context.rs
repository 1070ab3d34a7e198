//! Shared mutable context threaded through every FSM handler.
//!
//! `PetContext` is the blackboard the phase handlers read from and write
//! to: the three needs, the wake-up roll window and the RNG that rolls it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::needs::{NEED_MAX, Need, clamp_need};

// ---------------------------------------------------------------------------
// Needs
// ---------------------------------------------------------------------------

/// Current level of every need, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needs {
    pub hunger: f32,
    pub fun: f32,
    pub sleep: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: NEED_MAX,
            fun: NEED_MAX,
            sleep: NEED_MAX,
        }
    }
}

impl Needs {
    pub fn get(&self, need: Need) -> f32 {
        match need {
            Need::Hunger => self.hunger,
            Need::Fun => self.fun,
            Need::Sleep => self.sleep,
        }
    }

    /// Store a value, clamped into range.
    pub fn set(&mut self, need: Need, value: f32) {
        let slot = match need {
            Need::Hunger => &mut self.hunger,
            Need::Fun => &mut self.fun,
            Need::Sleep => &mut self.sleep,
        };
        *slot = clamp_need(value);
    }
}

// ---------------------------------------------------------------------------
// PetContext
// ---------------------------------------------------------------------------

/// The shared context passed to every phase handler function.
pub struct PetContext {
    pub needs: Needs,
    /// Inclusive window for the sleep value rolled on waking.
    pub wake_sleep_min: u8,
    pub wake_sleep_max: u8,
    pub rng: StdRng,
}

impl PetContext {
    /// Fresh needs; seeded RNG when the config pins a seed.
    pub fn new(config: &SimConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            needs: Needs::default(),
            wake_sleep_min: config.wake_sleep_min,
            wake_sleep_max: config.wake_sleep_max,
            rng,
        }
    }

    /// Uniform integer in the wake window, inclusive on both ends.
    pub fn roll_wake_sleep(&mut self) -> f32 {
        let lo = self.wake_sleep_min.min(self.wake_sleep_max);
        let hi = self.wake_sleep_max.max(self.wake_sleep_min);
        f32::from(self.rng.gen_range(lo..=hi))
    }
}
