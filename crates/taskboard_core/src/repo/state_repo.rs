//! Whole-state JSON persistence adapter.
//!
//! # Responsibility
//! - Load the state document once at startup, falling back to defaults.
//! - Overwrite the full document after every mutation.
//!
//! # Invariants
//! - `load_or_default` never fails; parse and medium errors are logged and
//!   treated as "no prior state".
//! - `save` followed by `load_or_default` reproduces an equal value.
//! - Document contents are never logged, only keys and byte lengths.

use crate::repo::kv_repo::KeyValueStore;
use crate::repo::RepoResult;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON document adapter over any key-value medium.
pub struct JsonStateRepository<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> JsonStateRepository<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Strict load: `Ok(None)` when the key is absent, `Err` when the
    /// medium fails or the document does not parse.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)?;
        Ok(Some(value))
    }

    /// Startup load: any failure yields `T::default()`.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.load(key) {
            Ok(Some(value)) => {
                debug!("event=state_load module=repo status=ok key={key}");
                value
            }
            Ok(None) => {
                debug!("event=state_load module=repo status=empty key={key}");
                T::default()
            }
            Err(err) => {
                warn!(
                    "event=state_load module=repo status=fallback key={key} error_code=load_failed error={err}"
                );
                T::default()
            }
        }
    }

    /// Serializes `state` and replaces the document stored under `key`.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, state: &T) -> RepoResult<()> {
        let raw = serde_json::to_string(state)?;
        self.kv.set(key, &raw)?;
        debug!(
            "event=state_save module=repo status=ok key={key} bytes={}",
            raw.len()
        );
        Ok(())
    }

    pub fn clear(&mut self, key: &str) -> RepoResult<()> {
        self.kv.remove(key)
    }

    pub fn medium(&self) -> &K {
        &self.kv
    }

    pub fn medium_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    pub fn into_medium(self) -> K {
        self.kv
    }
}
