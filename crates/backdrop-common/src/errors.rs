use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage read error for '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("storage write error for '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("export error: {0}")]
    Export(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("opacity = 2 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: opacity = 2 is out of range"
        );
    }

    #[test]
    fn storage_error_display() {
        let err = StorageError::Write {
            key: "background-config".into(),
            reason: "read-only file system".into(),
        };
        assert_eq!(
            err.to_string(),
            "storage write error for 'background-config': read-only file system"
        );

        let err = StorageError::Unavailable("no data directory".into());
        assert_eq!(err.to_string(), "storage unavailable: no data directory");
    }

    #[test]
    fn render_error_display() {
        let err = RenderError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "invalid surface dimensions 0x10");

        let err = RenderError::InvalidColor("var(--accent)".into());
        assert_eq!(err.to_string(), "invalid color: var(--accent)");
    }

    #[test]
    fn backdrop_error_from_config() {
        let config_err = ConfigError::ParseError("bad json".into());
        let err: BackdropError = config_err.into();
        assert!(matches!(err, BackdropError::Config(_)));
        assert!(err.to_string().contains("bad json"));
    }

    #[test]
    fn backdrop_error_from_storage() {
        let storage_err = StorageError::Unavailable("private mode".into());
        let err: BackdropError = storage_err.into();
        assert!(matches!(err, BackdropError::Storage(_)));
        assert!(err.to_string().contains("private mode"));
    }

    #[test]
    fn backdrop_error_from_render() {
        let render_err = RenderError::InvalidGradient("negative radius".into());
        let err: BackdropError = render_err.into();
        assert!(matches!(err, BackdropError::Render(_)));
    }

    #[test]
    fn backdrop_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BackdropError = io_err.into();
        assert!(matches!(err, BackdropError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
