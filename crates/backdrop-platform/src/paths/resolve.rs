use std::path::{Path, PathBuf};

use backdrop_common::PlatformError;
use backdrop_config::EngineSettings;

pub(super) const APP_NAME: &str = "backdrop";

/// Platform configuration directory for backdrop.
///
/// - macOS: `~/Library/Application Support/backdrop`
/// - Linux: `$XDG_CONFIG_HOME/backdrop` (defaults to `~/.config/backdrop`)
/// - Windows: `%APPDATA%\backdrop`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Platform data directory for backdrop.
///
/// - macOS: `~/Library/Application Support/backdrop`
/// - Linux: `$XDG_DATA_HOME/backdrop` (defaults to `~/.local/share/backdrop`)
/// - Windows: `%APPDATA%\backdrop`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// `config_dir()/settings.toml`
pub fn settings_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("settings.toml"))
}

/// Directory holding persisted keys: `[storage] dir` when set, otherwise
/// `data_dir()/state`.
pub fn storage_dir(settings: &EngineSettings) -> Result<PathBuf, PlatformError> {
    match settings.storage.dir.as_deref() {
        Some(dir) if !dir.trim().is_empty() => Ok(expand_home(Path::new(dir.trim()))),
        _ => Ok(data_dir()?.join("state")),
    }
}

/// Replace a leading `~` with the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
