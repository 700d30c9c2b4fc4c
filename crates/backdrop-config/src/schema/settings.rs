//! Engine settings read from `settings.toml`.

use serde::{Deserialize, Serialize};

/// Thresholds used by the capability prober.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySettings {
    /// Minimum total score for an `animate` verdict.
    pub capable_score: u32,
    /// Warm-up fps at or above which a GPU-equipped device is always capable.
    pub gpu_override_fps: f64,
    /// Warm-up fps below which the verdict is always static.
    pub floor_fps: f64,
    pub warmup_ms: f64,
    pub bonus_high_fps: f64,
    pub bonus_mid_fps: f64,
    /// Score ceiling for machines with this many cores or fewer.
    pub low_core_cap: u32,
    pub default_memory_gb: f64,
}

impl Default for CapabilitySettings {
    fn default() -> Self {
        Self {
            capable_score: 8,
            gpu_override_fps: 36.0,
            floor_fps: 18.0,
            warmup_ms: 1000.0,
            bonus_high_fps: 60.0,
            bonus_mid_fps: 45.0,
            low_core_cap: 4,
            default_memory_gb: 4.0,
        }
    }
}

/// What the fps broadcast counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum FpsSource {
    /// Frames actually painted.
    #[default]
    Draw,
    /// Every scheduled tick, painted or not.
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    pub frame_budget_ms: f64,
    pub fps_window_ms: f64,
    pub fps_source: FpsSource,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            frame_budget_ms: 33.0,
            fps_window_ms: 1000.0,
            fps_source: FpsSource::Draw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for persisted keys. Defaults to the platform data dir.
    pub dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub dark_mode: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            width: 1280,
            height: 720,
        }
    }
}

/// Root of `settings.toml`. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub capability: CapabilitySettings,
    pub driver: DriverSettings,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
}
