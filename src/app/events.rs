//! Outbound application events.
//!
//! The [`PetService`](super::service::PetService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The view renders
//! snapshots; other sinks log them.

use serde::Serialize;

use crate::fsm::Phase;
use crate::needs::{DecayIntervals, Mode};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum PetEvent {
    /// The service finished loading and catch-up (carries initial state).
    Started(PetSnapshot),

    /// State after a mutation or a tick; the view re-renders on this.
    Updated(PetSnapshot),

    /// The pet fell asleep or woke up.
    PhaseChanged { from: Phase, to: Phase },

    /// Decay profile switched and the timers were restarted.
    ModeChanged { mode: Mode, intervals: DecayIntervals },

    /// The store was wiped and the pet is back to defaults.
    Reset,
}

/// Point-in-time view of the pet, suitable for rendering or printing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSnapshot {
    pub hunger: f32,
    pub fun: f32,
    pub sleep: f32,
    pub awake: bool,
    pub is_realistic_mode: bool,
}

impl PetSnapshot {
    pub fn mode(&self) -> Mode {
        Mode::from_realistic(self.is_realistic_mode)
    }

    /// Text for the mode-toggle control.
    pub fn toggle_label(&self) -> &'static str {
        self.mode().toggle_label()
    }
}
