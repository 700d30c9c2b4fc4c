//! Palette averaging for derived UI accent colors.

use backdrop_common::{Color, Hsl};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Palette, FALLBACK_PRIMARY};
use crate::colors::sanitize_hex;

/// Colors with saturation below this have no meaningful hue and do not
/// vote in the hue average.
pub const ACHROMATIC_SATURATION: f64 = 0.05;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum AverageMethod {
    /// Arithmetic mean of the RGB channels.
    RgbMean,
    /// Mean in HSL space with circular hue averaging.
    #[default]
    HslMean,
    /// The single most saturated color.
    DominantSaturation,
}

impl FromStr for AverageMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" | "rgb-mean" => Ok(AverageMethod::RgbMean),
            "hsl" | "hsl-mean" => Ok(AverageMethod::HslMean),
            "dominant" | "dominant-saturation" => Ok(AverageMethod::DominantSaturation),
            other => Err(format!("unknown average method '{other}'")),
        }
    }
}

/// Average the palette's foreground slots (and optionally its background)
/// into one opaque `#rrggbb`.
///
/// Slots that fail validation are skipped; if none survive, the fallback
/// primary is returned.
pub fn average_colors(palette: &Palette, method: AverageMethod, include_background: bool) -> String {
    let mut slots = vec![
        palette.primary.as_str(),
        palette.secondary.as_str(),
        palette.accent.as_str(),
    ];
    if include_background {
        slots.push(palette.background.as_str());
    }
    let colors: Vec<Color> = slots.into_iter().filter_map(sanitize_hex).collect();
    average_of(&colors, method)
        .unwrap_or(FALLBACK_PRIMARY)
        .to_rgb_hex()
}

/// Average a set of colors. `None` for an empty slice.
pub fn average_of(colors: &[Color], method: AverageMethod) -> Option<Color> {
    if colors.is_empty() {
        return None;
    }
    let color = match method {
        AverageMethod::RgbMean => rgb_mean(colors),
        AverageMethod::HslMean => hsl_mean(colors),
        AverageMethod::DominantSaturation => dominant(colors),
    };
    Some(color)
}

fn rgb_mean(colors: &[Color]) -> Color {
    let n = colors.len() as f64;
    let mean = |f: fn(&Color) -> u8| {
        (colors.iter().map(|c| f(c) as f64).sum::<f64>() / n).round() as u8
    };
    Color::from_rgb(mean(|c| c.r), mean(|c| c.g), mean(|c| c.b))
}

fn hsl_mean(colors: &[Color]) -> Color {
    let hsls: Vec<Hsl> = colors.iter().map(Color::to_hsl).collect();
    let n = hsls.len() as f64;
    let s = hsls.iter().map(|h| h.s).sum::<f64>() / n;
    let l = hsls.iter().map(|h| h.l).sum::<f64>() / n;
    let chromatic: Vec<f64> = hsls
        .iter()
        .filter(|h| h.s >= ACHROMATIC_SATURATION)
        .map(|h| h.h)
        .collect();
    let h = mean_hue(&chromatic).unwrap_or(0.0);
    Color::from_hsl(Hsl::new(h, s, l))
}

fn dominant(colors: &[Color]) -> Color {
    let mut best = colors[0];
    let mut best_s = best.to_hsl().s;
    for c in &colors[1..] {
        let s = c.to_hsl().s;
        if s > best_s {
            best = *c;
            best_s = s;
        }
    }
    Color::from_rgb(best.r, best.g, best.b)
}

/// Circular mean of hues in degrees, via unit vectors on the color wheel.
///
/// Returns `None` for an empty slice. Opposing hues that cancel out
/// resolve to 0.
pub fn mean_hue(hues: &[f64]) -> Option<f64> {
    if hues.is_empty() {
        return None;
    }
    let (sum_x, sum_y) = hues.iter().fold((0.0, 0.0), |(x, y), h| {
        let rad = h.to_radians();
        (x + rad.cos(), y + rad.sin())
    });
    if sum_x.abs() < 1e-12 && sum_y.abs() < 1e-12 {
        return Some(0.0);
    }
    Some(sum_y.atan2(sum_x).to_degrees().rem_euclid(360.0))
}

/// Accent trio derived from a palette for tinting UI chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentColors {
    pub base: String,
    pub light: String,
    pub dark: String,
}

pub fn accent_colors(palette: &Palette) -> AccentColors {
    let colors: Vec<Color> = [palette.primary.as_str(), palette.secondary.as_str()]
        .into_iter()
        .filter_map(sanitize_hex)
        .collect();
    let base = average_of(&colors, AverageMethod::HslMean).unwrap_or(FALLBACK_PRIMARY);
    let hsl = base.to_hsl();
    let shifted = |dl: f64| Color::from_hsl(Hsl::new(hsl.h, hsl.s, hsl.l + dl)).to_rgb_hex();
    AccentColors {
        base: base.to_rgb_hex(),
        light: shifted(0.15),
        dark: shifted(-0.15),
    }
}
