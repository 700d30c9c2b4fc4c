//! Configuration schema types.
//!
//! `BackgroundConfig` is the persisted visual state; every field is
//! mandatory. `EngineSettings` is the TOML tuning file and uses
//! `serde(default)` throughout so partial files work.

mod background;
mod settings;

pub use background::*;
pub use settings::*;

/// Current settings schema version.
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;
