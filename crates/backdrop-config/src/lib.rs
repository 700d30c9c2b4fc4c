//! Backdrop configuration.
//!
//! Holds the persisted [`BackgroundConfig`] and its reactive
//! [`BackgroundStore`], the color model, the key/value storage layer and
//! the `settings.toml` engine settings.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use backdrop_config::{BackgroundStore, ConfigPatch, EffectType, MemoryStore};
//!
//! let store = BackgroundStore::open(Arc::new(MemoryStore::new()));
//! store.update(&ConfigPatch::effect(EffectType::Vortex));
//! println!("{}", backdrop_config::config_to_json(&store.get()));
//! ```

pub mod colors;
pub mod palette;
pub mod schema;
pub mod storage;
pub mod store;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use palette::{
    average_colors, resolve_palette, AverageMethod, Palette, ResolvedPalette,
};
pub use schema::{
    BackgroundConfig, CapabilitySettings, ColorMode, ConfigPatch, DriverSettings, EffectType,
    EngineSettings, FpsSource, SETTINGS_SCHEMA_VERSION,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::BackgroundStore;
pub use toml_writer::save_settings_to_path;
pub use watcher::StorageWatcher;

use backdrop_common::ConfigError;

/// Load `settings.toml` from the platform default path, creating it if
/// missing.
pub fn load_settings() -> Result<EngineSettings, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to pretty-printed JSON.
pub fn config_to_json(config: &BackgroundConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
