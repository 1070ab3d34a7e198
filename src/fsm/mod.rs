//! Function-pointer finite state machine for the awake/asleep cycle.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  PhaseTable                                                        │
//! │  ┌────────┬───────────┬──────────┬────────────────────┬──────────┐ │
//! │  │ Phase  │ on_enter  │ on_exit  │ on_sleep_tick      │ decay    │ │
//! │  ├────────┼───────────┼──────────┼────────────────────┼──────────┤ │
//! │  │ Awake  │ fn(ctx)   │ -        │ fn(ctx)->Option<>  │ 1.0      │ │
//! │  │ Asleep │ fn(ctx)   │ -        │ fn(ctx)->Option<>  │ 0.5      │ │
//! │  └────────┴───────────┴──────────┴────────────────────┴──────────┘ │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the sleep tick drives transitions.  When `on_sleep_tick` returns
//! `Some(next)` the engine runs `on_exit` for the current phase, then
//! `on_enter` for the next.  Hunger and fun ticks only consult the
//! current phase's decay step.

pub mod context;
pub mod states;

use context::PetContext;
use log::info;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Awake or asleep.  Must stay in sync with [`states::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Phase {
    #[default]
    Awake = 0,
    Asleep = 1,
}

impl Phase {
    pub const COUNT: usize = 2;

    pub fn from_awake(awake: bool) -> Self {
        if awake { Self::Awake } else { Self::Asleep }
    }

    pub fn is_awake(self) -> bool {
        self == Self::Awake
    }

    fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Awake,
            _ => Self::Asleep,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type PhaseActionFn = fn(&mut PetContext);

/// Signature for the sleep-tick handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type SleepTickFn = fn(&mut PetContext) -> Option<Phase>;

// ---------------------------------------------------------------------------
// Phase descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct PhaseDescriptor {
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_sleep_tick: SleepTickFn,
    /// Hunger/fun lost per tick in this phase.
    pub decay_step: f32,
    /// Whether feed/play have any effect in this phase.
    pub accepts_care: bool,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The phase machine.  Owns the table; the context is passed in per call.
pub struct Fsm {
    table: [PhaseDescriptor; Phase::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Jump to `phase` without running any hooks (restored or reset state).
    pub fn resume(&mut self, phase: Phase) {
        self.current = phase as usize;
    }

    /// Run one sleep tick.  Returns `(from, to)` if the phase changed.
    pub fn sleep_tick(&mut self, ctx: &mut PetContext) -> Option<(Phase, Phase)> {
        let from = self.current_phase();
        let next = (self.table[self.current].on_sleep_tick)(ctx)?;
        self.transition(next, ctx);
        Some((from, next))
    }

    pub fn current_phase(&self) -> Phase {
        Phase::from_index(self.current)
    }

    pub fn decay_step(&self) -> f32 {
        self.table[self.current].decay_step
    }

    pub fn accepts_care(&self) -> bool {
        self.table[self.current].accepts_care
    }

    fn transition(&mut self, next: Phase, ctx: &mut PetContext) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
