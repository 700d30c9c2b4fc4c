//! Write EngineSettings to TOML on disk.
//!
//! Writes are atomic (write to `.tmp`, then rename) so a crash mid-write
//! never leaves a truncated settings file.

use std::path::Path;

use backdrop_common::ConfigError;

use crate::schema::EngineSettings;

/// Write settings to a specific path, creating parent directories.
pub fn save_settings_to_path(settings: &EngineSettings, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(settings)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize settings: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &toml_str).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write settings to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, &toml_str).map_err(|e2| {
            ConfigError::ParseError(format!(
                "failed to write settings to {}: {e2}",
                path.display()
            ))
        })?;
    }

    tracing::debug!(path = %path.display(), "settings saved to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FpsSource;
    use crate::toml_loader::load_from_path;
    use tempfile::TempDir;

    #[test]
    fn save_settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = EngineSettings::default();
        settings.capability.floor_fps = 20.0;
        settings.driver.fps_source = FpsSource::Schedule;
        settings.storage.dir = Some("/var/lib/backdrop".into());
        save_settings_to_path(&settings, &path).unwrap();

        let parsed = load_from_path(&path).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn save_settings_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("settings.toml");

        save_settings_to_path(&EngineSettings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_settings_cleans_up_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        save_settings_to_path(&EngineSettings::default(), &path).unwrap();

        let tmp_path = path.with_extension("toml.tmp");
        assert!(!tmp_path.exists(), "tmp file should be renamed away");
    }
}
