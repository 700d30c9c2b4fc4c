//! BackgroundConfig validation and read-boundary sanitizing.

use crate::colors::is_literal_hex;
use crate::schema::{BackgroundConfig, ColorMode, OPACITY_RANGE, SPEED_RANGE};

use super::helpers::{clamp_f64, validate_range_f64};

/// Validate all background constraints.
pub(crate) fn validate_background(errors: &mut Vec<String>, config: &BackgroundConfig) {
    validate_range_f64(
        errors,
        "opacity",
        config.opacity,
        OPACITY_RANGE.0,
        OPACITY_RANGE.1,
    );
    validate_range_f64(
        errors,
        "animationSpeed",
        config.animation_speed,
        SPEED_RANGE.0,
        SPEED_RANGE.1,
    );
    if config.is_active() {
        let (min, max) = config.effect.density_range();
        validate_range_f64(
            errors,
            &format!("density ({})", config.effect),
            config.density,
            min,
            max,
        );
    }
    if config.color_mode == ColorMode::Custom && !is_literal_hex(&config.custom_color) {
        errors.push(format!(
            "customColor = {:?} is not a #rrggbb color",
            config.custom_color
        ));
    }
}

/// Pull every field back into range. Returns one note per adjustment.
pub(crate) fn sanitize_background(config: &mut BackgroundConfig) -> Vec<String> {
    let defaults = BackgroundConfig::default_config();
    let mut notes = Vec::new();

    clamp_f64(
        &mut notes,
        "opacity",
        &mut config.opacity,
        OPACITY_RANGE,
        defaults.opacity,
    );
    clamp_f64(
        &mut notes,
        "animationSpeed",
        &mut config.animation_speed,
        SPEED_RANGE,
        defaults.animation_speed,
    );
    if config.is_active() {
        clamp_f64(
            &mut notes,
            "density",
            &mut config.density,
            config.effect.density_range(),
            defaults.density,
        );
    }
    if !is_literal_hex(&config.custom_color) {
        notes.push(format!(
            "customColor = {:?} replaced with {}",
            config.custom_color, defaults.custom_color
        ));
        config.custom_color = defaults.custom_color;
    }

    notes
}
