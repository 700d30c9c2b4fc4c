//! Configuration validation.
//!
//! `validate` reports every out-of-range field in one `ConfigError`.
//! `sanitize` is applied where persisted values enter the process and
//! clamps instead of rejecting.

mod background;
mod helpers;
mod settings;


use crate::schema::{BackgroundConfig, EngineSettings};
use backdrop_common::ConfigError;

/// Run all background validations, collecting all errors.
pub fn validate(config: &BackgroundConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    background::validate_background(&mut errors, config);
    into_result(errors)
}

/// Run all settings validations, collecting all errors.
pub fn validate_settings(settings: &EngineSettings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    settings::validate_capability(&mut errors, settings);
    settings::validate_driver(&mut errors, settings);
    settings::validate_display(&mut errors, settings);
    into_result(errors)
}

/// Clamp a config read from storage into its valid ranges.
///
/// Returns a note for each field that had to change; an empty list means
/// the config was already valid.
pub fn sanitize(config: &mut BackgroundConfig) -> Vec<String> {
    background::sanitize_background(config)
}

fn into_result(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
