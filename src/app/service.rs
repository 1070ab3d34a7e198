//! Application service, the hexagonal core.
//!
//! [`PetService`] owns the phase machine, the needs, the current mode and
//! the scheduler.  Storage and time come in through injected ports; events
//! leave through an [`EventSink`] passed at each call site, so the whole
//! service runs against mock adapters in tests.
//!
//! ```text
//!   StorePort ◀──▶ ┌────────────────────────┐ ──▶ EventSink (view, log)
//!                  │       PetService       │
//!   ClockPort  ──▶ │ FSM · Needs · Scheduler│ ◀── PetCommand
//!                  └────────────────────────┘
//! ```
//!
//! Every operation that changes state writes the full snapshot back to the
//! store before emitting [`PetEvent::Updated`].

use std::collections::VecDeque;

use log::{debug, info};

use crate::config::{SimConfig, validate_config};
use crate::error::Result;
use crate::fsm::context::{Needs, PetContext};
use crate::fsm::states::build_phase_table;
use crate::fsm::{Fsm, Phase};
use crate::needs::{DecayIntervals, Mode, NEED_MIN, Need, catch_up, decay, restore};
use crate::scheduler::{Schedule, Scheduler};
use crate::storage::{self, PersistedState};

use super::commands::PetCommand;
use super::events::{PetEvent, PetSnapshot};
use super::ports::{ClockPort, EventSink, SchedulerDelegate, StorePort};

// ───────────────────────────────────────────────────────────────
// Scheduler delegate
// ───────────────────────────────────────────────────────────────

/// Collects due ticks while the scheduler is borrowed; the service
/// drains it afterwards in fire order.
#[derive(Default)]
struct DueTicks(VecDeque<Need>);

impl SchedulerDelegate for DueTicks {
    fn on_schedule_fired(&mut self, label: &str, need: Need) {
        debug!("Schedule fired: '{}'", label);
        self.0.push_back(need);
    }
}

// ───────────────────────────────────────────────────────────────
// PetService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct PetService<S: StorePort, C: ClockPort> {
    fsm: Fsm,
    ctx: PetContext,
    mode: Mode,
    config: SimConfig,
    scheduler: Scheduler,
    store: S,
    clock: C,
}

impl<S: StorePort, C: ClockPort> PetService<S, C> {
    /// Construct the service with default needs.
    ///
    /// Does **not** read the store; call [`start`](Self::start) next.
    pub fn new(config: SimConfig, store: S, clock: C) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self {
            fsm: Fsm::new(build_phase_table(), Phase::Awake),
            ctx: PetContext::new(&config),
            mode: Mode::Fast,
            config,
            scheduler: Scheduler::new(),
            store,
            clock,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load persisted state, apply catch-up decay for the absence, arm the
    /// timers and write the caught-up snapshot back.
    pub fn start(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let saved = storage::load_state(&self.store)?;
        let now = self.clock.now_ms();
        let elapsed = saved.last_active_ms.map_or(0, |last| now.saturating_sub(last));

        self.restore_from(&saved);
        self.catch_up(elapsed);
        self.restart_timers();
        self.persist()?;

        let snapshot = self.snapshot();
        info!(
            "PetService started: {:?}/{:?} after {}ms away (hunger={} fun={} sleep={})",
            self.fsm.current_phase(),
            self.mode,
            elapsed.max(0),
            snapshot.hunger,
            snapshot.fun,
            snapshot.sleep
        );
        sink.emit(&PetEvent::Started(snapshot));
        Ok(())
    }

    /// Apply decay for `elapsed_ms` of absence.  Phase is not consulted.
    fn catch_up(&mut self, elapsed_ms: i64) {
        let intervals = self.intervals();
        for need in Need::ALL {
            let value = catch_up(self.ctx.needs.get(need), elapsed_ms, intervals.for_need(need));
            self.ctx.needs.set(need, value);
        }
    }

    fn restore_from(&mut self, saved: &PersistedState) {
        self.ctx.needs = Needs {
            hunger: saved.hunger,
            fun: saved.fun,
            sleep: saved.sleep,
        };
        self.fsm.resume(Phase::from_awake(saved.awake));
        self.mode = Mode::from_realistic(saved.is_realistic_mode);
    }

    fn restart_timers(&mut self) {
        self.scheduler
            .restart(&Schedule::for_intervals(&self.intervals()));
    }

    // ── Time ──────────────────────────────────────────────────

    /// Move the timers forward by `elapsed_ms` and run every tick that
    /// came due, in order.  Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: u64, sink: &mut impl EventSink) -> Result<usize> {
        let mut due = DueTicks::default();
        let fired = self.scheduler.advance(elapsed_ms, &mut due);
        for need in due.0 {
            self.tick(need, &mut *sink)?;
        }
        Ok(fired)
    }

    /// One periodic tick for `need`.
    ///
    /// Hunger and fun lose the phase's decay step (nothing is written when
    /// already empty).  Sleep drives the awake/asleep machine and is always
    /// written.
    pub fn tick(&mut self, need: Need, sink: &mut impl EventSink) -> Result<()> {
        match need {
            Need::Hunger | Need::Fun => {
                let before = self.ctx.needs.get(need);
                if before > NEED_MIN {
                    self.ctx.needs.set(need, decay(before, self.fsm.decay_step()));
                    self.persist()?;
                }
            }
            Need::Sleep => {
                if let Some((from, to)) = self.fsm.sleep_tick(&mut self.ctx) {
                    sink.emit(&PetEvent::PhaseChanged { from, to });
                }
                self.persist()?;
            }
        }
        sink.emit(&PetEvent::Updated(self.snapshot()));
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a user action.
    pub fn handle_command(&mut self, cmd: PetCommand, sink: &mut impl EventSink) -> Result<()> {
        match cmd {
            PetCommand::Feed => self.feed(sink),
            PetCommand::Play => self.play(sink),
            PetCommand::ToggleMode => self.toggle_mode(sink),
            PetCommand::Reset => self.reset(sink),
        }
    }

    /// Restore hunger.  Ignored while asleep.
    pub fn feed(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.care(Need::Hunger, sink)
    }

    /// Restore fun.  Ignored while asleep.
    pub fn play(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.care(Need::Fun, sink)
    }

    fn care(&mut self, need: Need, sink: &mut impl EventSink) -> Result<()> {
        if !self.fsm.accepts_care() {
            debug!("{} ignored: pet is asleep", need);
            return Ok(());
        }
        let value = restore(self.ctx.needs.get(need), self.config.care_boost);
        self.ctx.needs.set(need, value);
        self.persist()?;
        sink.emit(&PetEvent::Updated(self.snapshot()));
        Ok(())
    }

    /// Flip the decay profile and re-arm every timer with the new intervals.
    pub fn toggle_mode(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.mode = self.mode.toggled();
        self.restart_timers();
        self.persist()?;
        info!("Mode switched to {:?}", self.mode);
        sink.emit(&PetEvent::ModeChanged {
            mode: self.mode,
            intervals: self.intervals(),
        });
        sink.emit(&PetEvent::Updated(self.snapshot()));
        Ok(())
    }

    /// Wipe the store and return to a fresh pet.  Nothing is written back,
    /// so the store stays empty until the next mutation.
    pub fn reset(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.store.clear()?;
        self.restore_from(&PersistedState::default());
        self.restart_timers();
        info!("Pet reset to defaults");
        sink.emit(&PetEvent::Reset);
        sink.emit(&PetEvent::Updated(self.snapshot()));
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            hunger: self.ctx.needs.hunger,
            fun: self.ctx.needs.fun,
            sleep: self.ctx.needs.sleep,
            awake: self.fsm.current_phase().is_awake(),
            is_realistic_mode: self.mode.is_realistic(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.fsm.current_phase()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn needs(&self) -> Needs {
        self.ctx.needs
    }

    /// Interval profile of the current mode.
    pub fn intervals(&self) -> DecayIntervals {
        self.config.intervals(self.mode)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Internal ──────────────────────────────────────────────

    fn persist(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        let state = PersistedState {
            hunger: snapshot.hunger,
            fun: snapshot.fun,
            sleep: snapshot.sleep,
            awake: snapshot.awake,
            is_realistic_mode: snapshot.is_realistic_mode,
            last_active_ms: None,
        };
        storage::save_state(&mut self.store, &state, self.clock.now_ms())?;
        Ok(())
    }
}
