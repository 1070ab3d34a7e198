//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetService (domain)
//! ```
//!
//! Driven adapters (store, clock, view, config) implement these traits.
//! The [`PetService`](super::service::PetService) consumes them via
//! generics, so the domain core never touches disk, wall clock or terminal
//! directly.

use crate::config::SimConfig;
use crate::needs::Need;

// ───────────────────────────────────────────────────────────────
// Store port (driven adapter: domain ↔ key-value persistence)
// ───────────────────────────────────────────────────────────────

/// Flat key-value persistence, the same shape as a browser's local storage.
///
/// Values are opaque strings; the domain writes JSON-encoded scalars.
/// `clear` removes every key owned by this store and nothing else.
pub trait StorePort {
    /// Read a value.  `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove every key.
    fn clear(&mut self) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: wall clock → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for `lastActive` stamps and absence catch-up.
pub trait ClockPort {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → view / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`PetEvent`](super::events::PetEvent)s through this
/// port.  The view is just another sink.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PetEvent);
}

impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::PetEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists simulation configuration.
///
/// Implementations MUST validate before persisting and after loading;
/// out-of-range values are rejected with [`ConfigError::ValidationFailed`],
/// not clamped.
pub trait ConfigPort {
    /// Returns [`SimConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SimConfig, ConfigError>;

    fn save(&self, config: &SimConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the pet)
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes when a
/// registration fires.  The scheduler knows nothing about pet state.
pub trait SchedulerDelegate {
    /// * `label`: the registration's human-readable label.
    /// * `need`: which need's tick is due.
    fn on_schedule_fired(&mut self, label: &str, need: Need);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StorePort`] operations.
#[derive(Debug)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    Io(String),
    /// The backing medium holds something that is not a key-value map.
    Corrupted(String),
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed to deserialize.
    Corrupted(String),
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    Io(String),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Corrupted(msg) => write!(f, "store corrupted: {}", msg),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}
impl std::error::Error for ConfigError {}
