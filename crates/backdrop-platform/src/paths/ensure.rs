use std::fs;

use backdrop_common::PlatformError;
use backdrop_config::EngineSettings;

use super::resolve::{config_dir, storage_dir};

/// Create the config and storage directories if they do not exist.
pub fn ensure_dirs(settings: &EngineSettings) -> Result<(), PlatformError> {
    fs::create_dir_all(config_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    fs::create_dir_all(storage_dir(settings)?)
        .map_err(|e| PlatformError::PathError(e.to_string()))?;
    Ok(())
}
