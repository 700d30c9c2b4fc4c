//! Engine settings validation.

use crate::schema::EngineSettings;

use super::helpers::validate_range_f64;

pub(crate) fn validate_capability(errors: &mut Vec<String>, settings: &EngineSettings) {
    let cap = &settings.capability;
    if cap.capable_score == 0 || cap.capable_score > 10 {
        errors.push(format!(
            "capability.capable_score = {} is out of range [1, 10]",
            cap.capable_score
        ));
    }
    validate_range_f64(errors, "capability.floor_fps", cap.floor_fps, 0.0, 240.0);
    validate_range_f64(
        errors,
        "capability.gpu_override_fps",
        cap.gpu_override_fps,
        0.0,
        240.0,
    );
    if cap.floor_fps > cap.gpu_override_fps {
        errors.push(format!(
            "capability.floor_fps ({}) must not exceed capability.gpu_override_fps ({})",
            cap.floor_fps, cap.gpu_override_fps
        ));
    }
    validate_range_f64(errors, "capability.warmup_ms", cap.warmup_ms, 100.0, 10_000.0);
    validate_range_f64(
        errors,
        "capability.default_memory_gb",
        cap.default_memory_gb,
        0.5,
        1024.0,
    );
}

pub(crate) fn validate_driver(errors: &mut Vec<String>, settings: &EngineSettings) {
    let driver = &settings.driver;
    validate_range_f64(
        errors,
        "driver.frame_budget_ms",
        driver.frame_budget_ms,
        0.0,
        1000.0,
    );
    validate_range_f64(
        errors,
        "driver.fps_window_ms",
        driver.fps_window_ms,
        100.0,
        10_000.0,
    );
}

pub(crate) fn validate_display(errors: &mut Vec<String>, settings: &EngineSettings) {
    let display = &settings.display;
    if display.width == 0 || display.height == 0 || display.width > 16_384 || display.height > 16_384
    {
        errors.push(format!(
            "display size {}x{} is out of range [1, 16384]",
            display.width, display.height
        ));
    }
}
