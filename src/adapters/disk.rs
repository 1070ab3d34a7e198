//! On-disk adapter.
//!
//! Implements both [`StorePort`] and [`ConfigPort`] over a data directory:
//!
//! - `state.json`: one JSON object mapping each key to its encoded value.
//! - `config.json`: the [`SimConfig`], pretty-printed.
//!
//! The key map is read once on [`DiskAdapter::open`] and rewritten in full
//! on every `set`.  Writes go to a sibling temp file first and are renamed
//! into place, so a crash never leaves a half-written state file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StorePort};
use crate::config::{SimConfig, validate_config};

const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

pub struct DiskAdapter {
    dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl DiskAdapter {
    /// Open (creating if needed) the data directory and load the key map.
    ///
    /// A state file that is not a JSON object of strings is logged and
    /// treated as empty; it is replaced on the next write.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let path = dir.join(STATE_FILE);
        let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("DiskAdapter: {} is unreadable ({}), starting empty", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_error(&path, e)),
        };

        info!(
            "DiskAdapter: {} ({} keys)",
            dir.display(),
            entries.len()
        );
        Ok(Self { dir, entries })
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        write_atomic(&self.state_path(), &text).map_err(|e| io_error(&self.state_path(), e))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io(format!("{}: {}", path.display(), e))
}

fn write_atomic(path: &Path, text: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)
}

impl StorePort for DiskAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Drops the state file.  `config.json` is left alone.
    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        let path = self.state_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("DiskAdapter: removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

impl ConfigPort for DiskAdapter {
    fn load(&self) -> Result<SimConfig, ConfigError> {
        let path = self.config_path();
        let cfg = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| ConfigError::Corrupted(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("DiskAdapter: no {}, using defaults", CONFIG_FILE);
                SimConfig::default()
            }
            Err(e) => return Err(ConfigError::Io(format!("{}: {}", path.display(), e))),
        };
        validate_config(&cfg)?;
        Ok(cfg)
    }

    fn save(&self, config: &SimConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let text = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        let path = self.config_path();
        write_atomic(&path, &text)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        info!("DiskAdapter: config saved to {}", path.display());
        Ok(())
    }
}
