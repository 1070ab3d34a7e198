//! Concrete phase handler functions and table builder.
//!
//! ```text
//!  AWAKE ──[sleep tick finds sleep <= 0]──▶ ASLEEP
//!    ▲                                         │
//!    └──────[sleep tick reaches 100]───────────┘
//!            (sleep rerolled to 60..=100)
//! ```
//!
//! While awake, a sleep tick that lands on 0 leaves the pet awake; only the
//! *next* sleep tick puts it to bed.

use super::context::PetContext;
use super::{Phase, PhaseDescriptor};
use crate::needs::{NEED_MAX, NEED_MIN, decay, restore};
use log::info;

/// Hunger/fun lost per tick while awake.
const AWAKE_DECAY_STEP: f32 = 1.0;
/// Hunger/fun lost per tick while asleep.
const ASLEEP_DECAY_STEP: f32 = 0.5;
/// Sleep moved per sleep tick, either direction.
const SLEEP_STEP: f32 = 1.0;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table.  Called once at startup.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        // Index 0: Awake
        PhaseDescriptor {
            name: "Awake",
            on_enter: Some(awake_enter),
            on_exit: None,
            on_sleep_tick: awake_sleep_tick,
            decay_step: AWAKE_DECAY_STEP,
            accepts_care: true,
        },
        // Index 1: Asleep
        PhaseDescriptor {
            name: "Asleep",
            on_enter: Some(asleep_enter),
            on_exit: None,
            on_sleep_tick: asleep_sleep_tick,
            decay_step: ASLEEP_DECAY_STEP,
            accepts_care: false,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAKE
// ═══════════════════════════════════════════════════════════════════════════

fn awake_enter(ctx: &mut PetContext) {
    ctx.needs.sleep = ctx.roll_wake_sleep();
    info!("AWAKE: woke up rested, sleep={}", ctx.needs.sleep);
}

fn awake_sleep_tick(ctx: &mut PetContext) -> Option<Phase> {
    if ctx.needs.sleep > NEED_MIN {
        ctx.needs.sleep = decay(ctx.needs.sleep, SLEEP_STEP);
        return None;
    }
    Some(Phase::Asleep)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ASLEEP
// ═══════════════════════════════════════════════════════════════════════════

fn asleep_enter(ctx: &mut PetContext) {
    info!(
        "ASLEEP: exhausted (hunger={}, fun={})",
        ctx.needs.hunger, ctx.needs.fun
    );
}

fn asleep_sleep_tick(ctx: &mut PetContext) -> Option<Phase> {
    ctx.needs.sleep = restore(ctx.needs.sleep, SLEEP_STEP);
    if ctx.needs.sleep >= NEED_MAX {
        return Some(Phase::Awake);
    }
    None
}
