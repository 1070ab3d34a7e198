//! Console view.
//!
//! Implements [`EventSink`] by printing a bar per need plus the label of
//! the mode-toggle control.  A snapshot identical to the last one printed
//! is skipped, so a burst of no-op ticks stays quiet.

use std::io::Write;

use log::warn;

use crate::app::events::{PetEvent, PetSnapshot};
use crate::app::ports::EventSink;
use crate::fsm::Phase;
use crate::needs::NEED_MAX;

/// Characters per need bar.
const BAR_WIDTH: usize = 20;

fn bar(value: f32) -> String {
    let filled = ((value / NEED_MAX) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// One-line rendering of a snapshot.
pub fn render(s: &PetSnapshot) -> String {
    format!(
        "Hunger [{}] {:>5.1}  Fun [{}] {:>5.1}  Sleep [{}] {:>5.1}  {}  ({})",
        bar(s.hunger),
        s.hunger,
        bar(s.fun),
        s.fun,
        bar(s.sleep),
        s.sleep,
        if s.awake { "awake " } else { "asleep" },
        s.toggle_label(),
    )
}

pub struct ConsoleView<W: Write> {
    out: W,
    last: Option<PetSnapshot>,
}

impl ConsoleView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("ConsoleView: write failed: {}", e);
        }
    }

    fn show(&mut self, snapshot: &PetSnapshot) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }
        self.last = Some(*snapshot);
        self.line(&render(snapshot));
    }
}

impl<W: Write> EventSink for ConsoleView<W> {
    fn emit(&mut self, event: &PetEvent) {
        match event {
            PetEvent::Started(s) | PetEvent::Updated(s) => self.show(s),
            PetEvent::PhaseChanged { to: Phase::Asleep, .. } => {
                self.line("Your pet fell asleep.")
            }
            PetEvent::PhaseChanged { to: Phase::Awake, .. } => self.line("Your pet woke up!"),
            PetEvent::ModeChanged { mode, .. } => {
                self.line(&format!("Now in {:?} mode.", mode))
            }
            PetEvent::Reset => {
                self.last = None;
                self.line("Pet reset.");
            }
        }
    }
}
