//! Color model: palette lookup and derived colors.
//!
//! [`resolve_palette`] turns a color mode into four hex strings. Those
//! strings are not trusted (a custom color is user input), so renderers
//! go through [`ResolvedPalette::from_palette`], which validates each
//! slot and substitutes fallbacks.

mod average;
mod table;

#[cfg(test)]
mod tests;

pub use average::{
    accent_colors, average_colors, average_of, mean_hue, AccentColors, AverageMethod,
    ACHROMATIC_SATURATION,
};

use backdrop_common::Color;
use serde::{Deserialize, Serialize};

use crate::colors::{sanitize_hex, sanitize_hex_or};
use crate::schema::ColorMode;

pub const FALLBACK_PRIMARY: Color = Color::from_rgb(0x00, 0xd4, 0xff);
pub const FALLBACK_SECONDARY: Color = Color::from_rgba(0x00, 0xd4, 0xff, 0xcc);
pub const FALLBACK_ACCENT: Color = Color::from_rgba(0x00, 0xd4, 0xff, 0x88);
pub const FALLBACK_BACKGROUND: Color = Color::from_rgb(0x0a, 0x0a, 0x0f);

/// Alpha suffixes appended to a custom color for the derived slots.
const CUSTOM_SECONDARY_ALPHA: &str = "cc";
const CUSTOM_ACCENT_ALPHA: &str = "88";

/// Palette as strings, exactly as looked up or derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl Palette {
    pub fn slots(&self) -> [&str; 4] {
        [
            &self.primary,
            &self.secondary,
            &self.accent,
            &self.background,
        ]
    }
}

/// Resolve a color mode to its palette for the current brightness.
pub fn resolve_palette(mode: ColorMode, custom_color: &str, dark_mode: bool) -> Palette {
    let [primary, secondary, accent, background] = table::lookup(mode, dark_mode);
    if mode == ColorMode::Custom {
        // Derived slots carry their own alpha, so an existing one is dropped.
        let base = match sanitize_hex(custom_color) {
            Some(color) => color.to_rgb_hex(),
            None => custom_color.to_string(),
        };
        return Palette {
            primary: custom_color.to_string(),
            secondary: format!("{base}{CUSTOM_SECONDARY_ALPHA}"),
            accent: format!("{base}{CUSTOM_ACCENT_ALPHA}"),
            background: background.to_string(),
        };
    }
    Palette {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
    }
}

/// Palette with every slot validated. Never contains an unusable color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
}

impl ResolvedPalette {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            primary: sanitize_hex_or(&palette.primary, FALLBACK_PRIMARY),
            secondary: sanitize_hex_or(&palette.secondary, FALLBACK_SECONDARY),
            accent: sanitize_hex_or(&palette.accent, FALLBACK_ACCENT),
            background: sanitize_hex_or(&palette.background, FALLBACK_BACKGROUND),
        }
    }

    pub fn resolve(mode: ColorMode, custom_color: &str, dark_mode: bool) -> Self {
        Self::from_palette(&resolve_palette(mode, custom_color, dark_mode))
    }

    /// Foreground colors in slot order, for effects that cycle through them.
    pub fn cycle(&self) -> [Color; 3] {
        [self.primary, self.secondary, self.accent]
    }
}

impl Default for ResolvedPalette {
    fn default() -> Self {
        Self {
            primary: FALLBACK_PRIMARY,
            secondary: FALLBACK_SECONDARY,
            accent: FALLBACK_ACCENT,
            background: FALLBACK_BACKGROUND,
        }
    }
}
