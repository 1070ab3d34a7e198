//! In-memory adapter.
//!
//! Implements [`StorePort`] and [`ConfigPort`] without touching disk.
//! Backs `--ephemeral` runs and serves as the default test double.

use std::cell::RefCell;
use std::collections::HashMap;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StorePort};
use crate::config::{SimConfig, validate_config};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    config: RefCell<Option<SimConfig>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        info!("MemoryStore: cleared {} keys", self.entries.len());
        self.entries.clear();
        Ok(())
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<SimConfig, ConfigError> {
        let cfg = self.config.borrow().clone().unwrap_or_default();
        validate_config(&cfg)?;
        Ok(cfg)
    }

    fn save(&self, config: &SimConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }
}
