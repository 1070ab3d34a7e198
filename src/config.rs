//! Simulation configuration parameters
//!
//! All tunable parameters for the pet simulation.
//! Values can be overridden through `config.json` in the data directory.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::needs::{DecayIntervals, Mode};

/// Core simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // --- Decay profiles ---
    /// Intervals used in fast mode
    pub fast: DecayIntervals,
    /// Intervals used in realistic mode
    pub realistic: DecayIntervals,

    // --- Care ---
    /// Amount a feed or play action restores
    pub care_boost: f32,

    // --- Sleep ---
    /// Lowest sleep value rolled on waking
    pub wake_sleep_min: u8,
    /// Highest sleep value rolled on waking (inclusive)
    pub wake_sleep_max: u8,

    // --- Runtime ---
    /// Host loop granularity (milliseconds)
    pub loop_tick_ms: u64,
    /// Fixed RNG seed for reproducible runs
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fast: DecayIntervals::FAST,
            realistic: DecayIntervals::REALISTIC,

            care_boost: 30.0,

            wake_sleep_min: 60,
            wake_sleep_max: 100,

            loop_tick_ms: 100, // 10 Hz
            rng_seed: None,
        }
    }
}

impl SimConfig {
    /// Interval profile for `mode`.
    pub fn intervals(&self, mode: Mode) -> DecayIntervals {
        match mode {
            Mode::Fast => self.fast,
            Mode::Realistic => self.realistic,
        }
    }
}

/// Longest accepted decay interval: one day.
pub const MAX_INTERVAL_MS: u64 = 24 * 60 * 60 * 1_000;

fn validate_intervals(intervals: &DecayIntervals, what: &'static str) -> Result<(), ConfigError> {
    let ms = [intervals.hunger_ms, intervals.fun_ms, intervals.sleep_ms];
    if ms.iter().any(|&v| v == 0 || v > MAX_INTERVAL_MS) {
        return Err(ConfigError::ValidationFailed(what));
    }
    Ok(())
}

/// Range-check a configuration before it is used or persisted.
pub fn validate_config(cfg: &SimConfig) -> Result<(), ConfigError> {
    validate_intervals(&cfg.fast, "fast intervals must be 1ms–1 day")?;
    validate_intervals(&cfg.realistic, "realistic intervals must be 1ms–1 day")?;
    if !(cfg.care_boost > 0.0 && cfg.care_boost <= 100.0) {
        return Err(ConfigError::ValidationFailed("care_boost must be in (0, 100]"));
    }
    if cfg.wake_sleep_max > 100 {
        return Err(ConfigError::ValidationFailed("wake_sleep_max must be <= 100"));
    }
    if cfg.wake_sleep_min > cfg.wake_sleep_max {
        return Err(ConfigError::ValidationFailed(
            "wake_sleep_min must be <= wake_sleep_max",
        ));
    }
    if !(10..=5_000).contains(&cfg.loop_tick_ms) {
        return Err(ConfigError::ValidationFailed("loop_tick_ms must be 10–5000"));
    }
    Ok(())
}
