//! Read engine settings from a path or the platform default.

use crate::schema::EngineSettings;
use crate::validation;
use backdrop_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_settings, default_settings_path};

/// Load settings from a specific TOML file.
///
/// Missing sections and fields take their defaults. Out-of-range values
/// are logged and kept as parsed; consumers clamp where it matters.
pub fn load_from_path(path: &Path) -> Result<EngineSettings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let settings: EngineSettings = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate_settings(&settings) {
        warn!("settings validation warning: {e}");
    }

    info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Load settings from the platform default path.
///
/// On Linux: `~/.config/backdrop/settings.toml`
/// On macOS: `~/Library/Application Support/backdrop/settings.toml`
///
/// Creates a commented default file when none exists.
pub fn load_default() -> Result<EngineSettings, ConfigError> {
    let path = default_settings_path()?;
    load_or_create(&path)
}

/// Load `path`, writing the default template first if it is missing.
pub fn load_or_create(path: &Path) -> Result<EngineSettings, ConfigError> {
    match load_from_path(path) {
        Ok(settings) => Ok(settings),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no settings found at {}, creating default", path.display());
            create_default_settings(path)?;
            Ok(EngineSettings::default())
        }
        Err(e) => Err(e),
    }
}
