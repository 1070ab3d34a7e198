//! Unified error type for the simulation.
//!
//! State operations themselves are total; everything that can fail comes
//! from an adapter behind a port.  Each port error converts into [`Error`]
//! so the service can propagate with `?`.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

/// Every fallible service operation funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The key-value store could not be read or written.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
