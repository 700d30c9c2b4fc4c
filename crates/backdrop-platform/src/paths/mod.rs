mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{config_dir, data_dir, settings_file, storage_dir};

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_config::EngineSettings;

    #[test]
    fn config_dir_ends_with_backdrop() {
        if let Ok(path) = config_dir() {
            assert!(path.ends_with("backdrop"), "got: {path:?}");
        }
    }

    #[test]
    fn settings_file_has_correct_name() {
        if let Ok(path) = settings_file() {
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), "settings.toml");
        }
    }

    #[test]
    fn storage_dir_defaults_inside_data_dir() {
        let settings = EngineSettings::default();
        if let (Ok(storage), Ok(data)) = (storage_dir(&settings), data_dir()) {
            assert!(storage.starts_with(&data));
            assert!(storage.ends_with("state"));
        }
    }

    #[test]
    fn storage_dir_override_is_used() {
        let mut settings = EngineSettings::default();
        settings.storage.dir = Some("/var/lib/backdrop".into());
        assert_eq!(
            storage_dir(&settings).unwrap(),
            std::path::PathBuf::from("/var/lib/backdrop")
        );
    }

    #[test]
    fn storage_dir_blank_override_falls_back() {
        let mut settings = EngineSettings::default();
        settings.storage.dir = Some("   ".into());
        if let Ok(path) = storage_dir(&settings) {
            assert!(path.ends_with("state"));
        }
    }

    #[test]
    fn storage_dir_expands_home() {
        let mut settings = EngineSettings::default();
        settings.storage.dir = Some("~/bd".into());
        if let Some(home) = dirs::home_dir() {
            assert_eq!(storage_dir(&settings).unwrap(), home.join("bd"));
        }
    }
}
