//! Inbound commands to the application service.
//!
//! These are the user actions (buttons, stdin, one-shot CLI calls) that
//! [`PetService`](super::service::PetService) interprets and acts upon.

use core::str::FromStr;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetCommand {
    /// Restore hunger (awake only).
    Feed,

    /// Restore fun (awake only).
    Play,

    /// Switch between fast and realistic decay.
    ToggleMode,

    /// Wipe the store and start over.
    Reset,
}

/// Returned when a line of input names no known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl core::fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown command '{}'", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for PetCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feed" | "f" => Ok(Self::Feed),
            "play" | "p" => Ok(Self::Play),
            "mode" | "toggle" | "toggle-mode" | "m" => Ok(Self::ToggleMode),
            "reset" => Ok(Self::Reset),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}
