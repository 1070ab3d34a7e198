//! Persisted layout of the pet.
//!
//! Six flat keys, each holding one JSON-encoded scalar:
//!
//! | key               | JSON type | default        |
//! |-------------------|-----------|----------------|
//! | `hunger`          | number    | 100            |
//! | `fun`             | number    | 100            |
//! | `sleep`           | number    | 100            |
//! | `awake`           | bool      | true           |
//! | `isRealisticMode` | bool      | false          |
//! | `lastActive`      | number    | now (no decay) |
//!
//! A key that is missing or fails to decode takes its default.

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::app::ports::{StorageError, StorePort};
use crate::needs::{NEED_MAX, clamp_need};

pub const KEY_HUNGER: &str = "hunger";
pub const KEY_FUN: &str = "fun";
pub const KEY_SLEEP: &str = "sleep";
pub const KEY_AWAKE: &str = "awake";
pub const KEY_REALISTIC: &str = "isRealisticMode";
pub const KEY_LAST_ACTIVE: &str = "lastActive";

/// Every key this crate writes.
pub const PERSISTED_KEYS: [&str; 6] = [
    KEY_HUNGER,
    KEY_FUN,
    KEY_SLEEP,
    KEY_AWAKE,
    KEY_REALISTIC,
    KEY_LAST_ACTIVE,
];

/// Everything that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedState {
    pub hunger: f32,
    pub fun: f32,
    pub sleep: f32,
    pub awake: bool,
    pub is_realistic_mode: bool,
    /// Epoch milliseconds of the last save; `None` on a fresh store.
    pub last_active_ms: Option<i64>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            hunger: NEED_MAX,
            fun: NEED_MAX,
            sleep: NEED_MAX,
            awake: true,
            is_realistic_mode: false,
            last_active_ms: None,
        }
    }
}

fn load_field<T: DeserializeOwned>(
    store: &impl StorePort,
    key: &str,
    default: T,
) -> Result<T, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(default);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("storage: '{}' holds undecodable value {:?} ({}), using default", key, raw, e);
            Ok(default)
        }
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value)
        .map_err(|e| StorageError::Corrupted(format!("encoding '{}': {}", key, e)))
}

/// Read every field, falling back per key.  Needs are clamped into range.
pub fn load_state(store: &impl StorePort) -> Result<PersistedState, StorageError> {
    let d = PersistedState::default();
    Ok(PersistedState {
        hunger: clamp_need(load_field(store, KEY_HUNGER, d.hunger)?),
        fun: clamp_need(load_field(store, KEY_FUN, d.fun)?),
        sleep: clamp_need(load_field(store, KEY_SLEEP, d.sleep)?),
        awake: load_field(store, KEY_AWAKE, d.awake)?,
        is_realistic_mode: load_field(store, KEY_REALISTIC, d.is_realistic_mode)?,
        last_active_ms: load_field(store, KEY_LAST_ACTIVE, None)?,
    })
}

/// Write the full snapshot, stamping `lastActive` with `now_ms`.
pub fn save_state(
    store: &mut impl StorePort,
    state: &PersistedState,
    now_ms: i64,
) -> Result<(), StorageError> {
    store.set(KEY_HUNGER, &encode(KEY_HUNGER, &state.hunger)?)?;
    store.set(KEY_FUN, &encode(KEY_FUN, &state.fun)?)?;
    store.set(KEY_SLEEP, &encode(KEY_SLEEP, &state.sleep)?)?;
    store.set(KEY_AWAKE, &encode(KEY_AWAKE, &state.awake)?)?;
    store.set(KEY_REALISTIC, &encode(KEY_REALISTIC, &state.is_realistic_mode)?)?;
    store.set(KEY_LAST_ACTIVE, &encode(KEY_LAST_ACTIVE, &now_ms)?)?;
    Ok(())
}
