//! Periodic timer engine.
//!
//! Each need registers one repeating schedule.  The host loop calls
//! [`Scheduler::advance`] with the wall time that elapsed; every schedule
//! whose deadline has passed fires through a [`SchedulerDelegate`], in
//! deadline order, and is re-armed one interval later.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Scheduler                                │
//! │                                                              │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐                 │
//! │  │ hunger    │  │ fun       │  │ sleep     │                 │
//! │  │ every 3s  │  │ every 2s  │  │ every 5s  │                 │
//! │  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘                 │
//! │        │              │              │                       │
//! │        ▼              ▼              ▼                       │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              SchedulerDelegate                         │  │
//! │  │       (service queues the due need ticks)              │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          │                                   │
//! │                          ▼                                   │
//! │                    PetService.tick(need)                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Changing mode never edits a live schedule: [`Scheduler::restart`] drops
//! every entry and registers the new set in one call.

use crate::app::ports::SchedulerDelegate;
use crate::needs::{DecayIntervals, Need};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single repeating registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Human-readable label (e.g., "hunger").
    pub label: &'static str,
    /// Which need ticks when this fires.
    pub need: Need,
    /// Period in milliseconds; zero is rejected by [`Scheduler::add`].
    pub interval_ms: u64,
}

impl Schedule {
    /// One schedule per need, in registration order, from an interval profile.
    pub fn for_intervals(intervals: &DecayIntervals) -> [Schedule; 3] {
        Need::ALL.map(|need| Schedule {
            label: need.label(),
            need,
            interval_ms: intervals.for_need(need),
        })
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
const MAX_SCHEDULES: usize = 4;

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Scheduler time at which this entry next fires.
    next_due_ms: u64,
}

/// The scheduler engine.
///
/// Decoupled from the pet: firing only calls the delegate, so the engine
/// is testable with a recording delegate and no pet at all.
pub struct Scheduler {
    entries: heapless::Vec<ScheduleEntry, MAX_SCHEDULES>,
    /// Milliseconds advanced since construction.
    now_ms: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            now_ms: 0,
        }
    }

    /// Add a schedule, first due one interval from now.
    /// Returns the slot index, or `None` if full or the interval is zero.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        if schedule.interval_ms == 0 {
            return None;
        }
        let entry = ScheduleEntry {
            schedule,
            next_due_ms: self.now_ms.saturating_add(schedule.interval_ms),
        };
        self.entries.push(entry).ok()?;
        let slot = self.entries.len() - 1;
        debug!(
            "Scheduler: added '{}' every {}ms at slot {}",
            schedule.label, schedule.interval_ms, slot
        );
        Some(slot)
    }

    /// Drop every schedule.
    pub fn stop(&mut self) {
        self.entries.clear();
    }

    /// Replace all schedules at once.  Deadlines restart from now.
    pub fn restart(&mut self, schedules: &[Schedule]) {
        self.stop();
        for schedule in schedules {
            if self.add(*schedule).is_none() {
                log::warn!("Scheduler: could not register '{}'", schedule.label);
            }
        }
        info!("Scheduler: restarted with {} schedules", self.entries.len());
    }

    /// Move time forward by `elapsed_ms`, firing everything that came due.
    ///
    /// Fires in deadline order; simultaneous deadlines fire in registration
    /// order.  A long `elapsed_ms` fires an entry once per missed interval.
    /// Returns the number of fires.
    pub fn advance(&mut self, elapsed_ms: u64, delegate: &mut dyn SchedulerDelegate) -> usize {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = 0;
        loop {
            let due = self
                .entries
                .iter_mut()
                .filter(|e| e.next_due_ms <= target)
                .min_by_key(|e| e.next_due_ms);
            let Some(entry) = due else { break };

            self.now_ms = entry.next_due_ms;
            entry.next_due_ms = entry.next_due_ms.saturating_add(entry.schedule.interval_ms);
            delegate.on_schedule_fired(entry.schedule.label, entry.schedule.need);
            fired += 1;
        }

        self.now_ms = target;
        fired
    }

    /// Number of live schedules.
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Interval currently registered for `need`, if any.
    pub fn interval_of(&self, need: Need) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.schedule.need == need)
            .map(|e| e.schedule.interval_ms)
    }

    /// Milliseconds advanced since construction.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
