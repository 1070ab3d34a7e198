//! Needs, play modes and the decay arithmetic shared by ticks and catch-up.
//!
//! Every need lives in `[NEED_MIN, NEED_MAX]`.  The helpers here are the
//! only places that move a need, so the bound holds no matter which
//! operation runs.

use serde::{Deserialize, Serialize};

/// Lower bound of every need.
pub const NEED_MIN: f32 = 0.0;
/// Upper bound of every need (also the fresh-start value).
pub const NEED_MAX: f32 = 100.0;

// ---------------------------------------------------------------------------
// Need identity
// ---------------------------------------------------------------------------

/// One of the three decaying needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Need {
    Hunger,
    Fun,
    Sleep,
}

impl Need {
    /// All needs in scheduler registration order.
    pub const ALL: [Need; 3] = [Need::Hunger, Need::Fun, Need::Sleep];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hunger => "hunger",
            Self::Fun => "fun",
            Self::Sleep => "sleep",
        }
    }
}

impl core::fmt::Display for Need {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Decay profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Fast,
    Realistic,
}

impl Mode {
    pub fn from_realistic(realistic: bool) -> Self {
        if realistic { Self::Realistic } else { Self::Fast }
    }

    pub fn is_realistic(self) -> bool {
        self == Self::Realistic
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Fast => Self::Realistic,
            Self::Realistic => Self::Fast,
        }
    }

    /// Label for the control that switches *away* from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Fast => "Switch to Realistic Mode",
            Self::Realistic => "Switch to Fast Mode",
        }
    }
}

// ---------------------------------------------------------------------------
// Decay intervals
// ---------------------------------------------------------------------------

/// Milliseconds between automatic changes, per need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayIntervals {
    pub hunger_ms: u64,
    pub fun_ms: u64,
    pub sleep_ms: u64,
}

impl DecayIntervals {
    pub const FAST: Self = Self {
        hunger_ms: 3_000,
        fun_ms: 2_000,
        sleep_ms: 5_000,
    };

    pub const REALISTIC: Self = Self {
        hunger_ms: 30_000,
        fun_ms: 20_000,
        sleep_ms: 60_000,
    };

    pub fn for_need(&self, need: Need) -> u64 {
        match need {
            Need::Hunger => self.hunger_ms,
            Need::Fun => self.fun_ms,
            Need::Sleep => self.sleep_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Clamp an arbitrary value into the need range.  NaN collapses to the floor.
pub fn clamp_need(value: f32) -> f32 {
    if value.is_nan() {
        return NEED_MIN;
    }
    value.clamp(NEED_MIN, NEED_MAX)
}

/// Lower a need by `step`, never below the floor.
pub fn decay(value: f32, step: f32) -> f32 {
    clamp_need(value - step)
}

/// Raise a need by `step`, never above the ceiling.
pub fn restore(value: f32, step: f32) -> f32 {
    clamp_need(value + step)
}

/// Whole decay steps missed during an absence of `elapsed_ms`.
///
/// Negative absences (clock stepped backwards) and zero intervals yield 0.
pub fn missed_steps(elapsed_ms: i64, interval_ms: u64) -> u64 {
    if elapsed_ms <= 0 || interval_ms == 0 {
        return 0;
    }
    elapsed_ms as u64 / interval_ms
}

/// Apply catch-up decay to one need.
pub fn catch_up(value: f32, elapsed_ms: i64, interval_ms: u64) -> f32 {
    let steps = missed_steps(elapsed_ms, interval_ms);
    if steps == 0 {
        return clamp_need(value);
    }
    // Anything past NEED_MAX steps lands on the floor anyway.
    decay(value, steps.min(NEED_MAX as u64 + 1) as f32)
}
