//! Persistent Save/Load
//!
//! JSON-encoded values on top of the host's string key/value store.
//! Reading never fails: a missing or corrupt value yields the caller's
//! default.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{KitError, KitResult};
use crate::host::KeyValueStore;

/// Typed save/load over a host store.
#[derive(Clone, Debug)]
pub struct Storage<S: KeyValueStore> {
    store: S,
    slot_prefix: String,
}

impl<S: KeyValueStore> Storage<S> {
    /// Wrap a store; save slots are written under `slot_prefix`.
    pub fn new(store: S, slot_prefix: impl Into<String>) -> Self {
        Self {
            store,
            slot_prefix: slot_prefix.into(),
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encode and write `value` under `key`.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> KitResult<()> {
        let encoded = serde_json::to_string(value).map_err(|source| KitError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, encoded);
        Ok(())
    }

    /// Read `key`, or `default` when absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.store.get(key) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "corrupt stored value, using default");
                default
            }
        }
    }

    /// Save into numbered/named slot.
    pub fn slot_save<T: Serialize + ?Sized>(&mut self, slot: &str, value: &T) -> KitResult<()> {
        let key = self.slot_key(slot);
        self.save(&key, value)
    }

    /// Load from a slot.
    pub fn slot_load<T: DeserializeOwned>(&self, slot: &str, default: T) -> T {
        self.load(&self.slot_key(slot), default)
    }

    fn slot_key(&self, slot: &str) -> String {
        format!("{}{}", self.slot_prefix, slot)
    }
}
