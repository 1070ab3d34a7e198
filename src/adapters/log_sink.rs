//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every [`PetEvent`] through the `log`
//! facade, one line per event.  Paired with the console view in the
//! interactive loop and used alone for one-shot commands.

use log::{debug, info};

use crate::app::events::PetEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PetEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PetEvent) {
        match event {
            PetEvent::Started(s) => {
                info!(
                    "START | hunger={:.1} fun={:.1} sleep={:.1} | {} | realistic={}",
                    s.hunger,
                    s.fun,
                    s.sleep,
                    if s.awake { "awake" } else { "asleep" },
                    s.is_realistic_mode,
                );
            }
            PetEvent::Updated(s) => {
                debug!(
                    "NEEDS | hunger={:.1} fun={:.1} sleep={:.1} | {}",
                    s.hunger,
                    s.fun,
                    s.sleep,
                    if s.awake { "awake" } else { "asleep" },
                );
            }
            PetEvent::PhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            PetEvent::ModeChanged { mode, intervals } => {
                info!(
                    "MODE  | {:?} | hunger={}ms fun={}ms sleep={}ms",
                    mode, intervals.hunger_ms, intervals.fun_ms, intervals.sleep_ms
                );
            }
            PetEvent::Reset => {
                info!("RESET | store cleared");
            }
        }
    }
}
