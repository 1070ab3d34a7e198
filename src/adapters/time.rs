//! Wall-clock adapter.
//!
//! Implements [`ClockPort`] with `chrono::Utc`, giving the epoch
//! milliseconds stamped into `lastActive` and used for absence catch-up.

use chrono::Utc;

use crate::app::ports::ClockPort;

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
