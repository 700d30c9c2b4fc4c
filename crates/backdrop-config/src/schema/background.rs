//! Background configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which generator paints the background. `None` disables rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum EffectType {
    #[default]
    Hologram,
    Circuit,
    Psychedelic,
    Vortex,
    None,
}

impl EffectType {
    pub const GENERATORS: [EffectType; 4] = [
        EffectType::Hologram,
        EffectType::Circuit,
        EffectType::Psychedelic,
        EffectType::Vortex,
    ];

    pub fn is_none(&self) -> bool {
        matches!(self, EffectType::None)
    }

    /// Accepted density range for this effect, inclusive.
    pub fn density_range(&self) -> (f64, f64) {
        match self {
            EffectType::Vortex => (0.5, 4.0),
            _ => (0.2, 1.5),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::Hologram => "hologram",
            EffectType::Circuit => "circuit",
            EffectType::Psychedelic => "psychedelic",
            EffectType::Vortex => "vortex",
            EffectType::None => "none",
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hologram" => Ok(EffectType::Hologram),
            "circuit" => Ok(EffectType::Circuit),
            "psychedelic" => Ok(EffectType::Psychedelic),
            "vortex" => Ok(EffectType::Vortex),
            "none" => Ok(EffectType::None),
            other => Err(format!("unknown effect type '{other}'")),
        }
    }
}

/// Named palettes, or `Custom` to derive one from `custom_color`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ColorMode {
    #[default]
    Cyber,
    Ocean,
    Fire,
    Spark,
    Forest,
    Synthwave,
    Sunset,
    Midnight,
    Aurora,
    Neon,
    Custom,
}

impl ColorMode {
    pub const ALL: [ColorMode; 11] = [
        ColorMode::Cyber,
        ColorMode::Ocean,
        ColorMode::Fire,
        ColorMode::Spark,
        ColorMode::Forest,
        ColorMode::Synthwave,
        ColorMode::Sunset,
        ColorMode::Midnight,
        ColorMode::Aurora,
        ColorMode::Neon,
        ColorMode::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Cyber => "cyber",
            ColorMode::Ocean => "ocean",
            ColorMode::Fire => "fire",
            ColorMode::Spark => "spark",
            ColorMode::Forest => "forest",
            ColorMode::Synthwave => "synthwave",
            ColorMode::Sunset => "sunset",
            ColorMode::Midnight => "midnight",
            ColorMode::Aurora => "aurora",
            ColorMode::Neon => "neon",
            ColorMode::Custom => "custom",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ColorMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| format!("unknown color mode '{wanted}'"))
    }
}

pub const OPACITY_RANGE: (f64, f64) = (0.1, 0.9);
pub const SPEED_RANGE: (f64, f64) = (0.1, 10.0);

/// The single source of truth for what the background looks like.
///
/// Serialized with camelCase keys so the persisted blob reads
/// `{"type":"vortex","animationSpeed":1.0,...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundConfig {
    #[serde(rename = "type")]
    pub effect: EffectType,
    pub opacity: f64,
    pub animation_speed: f64,
    pub density: f64,
    pub color_mode: ColorMode,
    pub custom_color: String,
    pub is_animated: bool,
}

impl BackgroundConfig {
    /// Configuration used on first launch and when no backup exists to restore.
    pub fn default_config() -> Self {
        Self {
            effect: EffectType::Hologram,
            opacity: 0.5,
            animation_speed: 1.0,
            density: 1.0,
            color_mode: ColorMode::Cyber,
            custom_color: "#00d4ff".into(),
            is_animated: true,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.effect.is_none()
    }

    /// Apply every field present in `patch`.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(effect) = patch.effect {
            self.effect = effect;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(speed) = patch.animation_speed {
            self.animation_speed = speed;
        }
        if let Some(density) = patch.density {
            self.density = density;
        }
        if let Some(mode) = patch.color_mode {
            self.color_mode = mode;
        }
        if let Some(ref color) = patch.custom_color {
            self.custom_color = color.clone();
        }
        if let Some(animated) = patch.is_animated {
            self.is_animated = animated;
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// A partial update: `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(rename = "type")]
    pub effect: Option<EffectType>,
    pub opacity: Option<f64>,
    pub animation_speed: Option<f64>,
    pub density: Option<f64>,
    pub color_mode: Option<ColorMode>,
    pub custom_color: Option<String>,
    pub is_animated: Option<bool>,
}

impl ConfigPatch {
    pub fn effect(effect: EffectType) -> Self {
        Self {
            effect: Some(effect),
            ..Default::default()
        }
    }

    pub fn animated(is_animated: bool) -> Self {
        Self {
            is_animated: Some(is_animated),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }
}
