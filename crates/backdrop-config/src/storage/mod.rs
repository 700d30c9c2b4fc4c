//! Durable key/value storage for persisted state.
//!
//! Values are plain strings. `BackgroundConfig` is stored as JSON, the
//! capability verdict as `"on"` / `"off"`.

mod file;
mod memory;


pub use file::FileStore;
pub use memory::MemoryStore;

use backdrop_common::StorageError;
use tracing::warn;

use crate::schema::BackgroundConfig;
use crate::validation;

/// Full current configuration.
pub const CONFIG_KEY: &str = "background-config";
/// Last configuration whose effect was not `none`.
pub const LAST_WALLPAPER_KEY: &str = "last-wallpaper";
/// Cached capability verdict.
pub const CAPABILITY_KEY: &str = "animation-capability";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and sanitize a persisted config.
///
/// Unreadable storage and corrupt JSON are logged and treated as absent.
pub fn load_config(store: &dyn KeyValueStore, key: &str) -> Option<BackgroundConfig> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("failed to read {key}: {e}");
            return None;
        }
    };

    let mut config: BackgroundConfig = match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            let err = StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            };
            warn!("{err}, ignoring stored value");
            return None;
        }
    };

    for note in validation::sanitize(&mut config) {
        warn!(key, "stored config adjusted: {note}");
    }
    Some(config)
}

/// Serialize and write a config under `key`.
pub fn save_config(
    store: &dyn KeyValueStore,
    key: &str,
    config: &BackgroundConfig,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(config).map_err(|e| StorageError::Write {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &json)
}
