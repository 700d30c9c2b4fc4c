//! Color string validation.
//!
//! Palette values can come from user input, so every string headed for a
//! gradient or fill passes through [`sanitize_hex`]. Only literal hex is
//! accepted: CSS variables, color names and `rgb()` forms are rejected.

mod parse;


use backdrop_common::Color;

use parse::{parse_hex, RGB_HEX_RE};

/// The validated color, or `None` for anything that is not literal hex.
pub fn sanitize_hex(s: &str) -> Option<Color> {
    parse_hex(s)
}

/// Like [`sanitize_hex`] but substitutes `fallback` for invalid input.
pub fn sanitize_hex_or(s: &str, fallback: Color) -> Color {
    sanitize_hex(s).unwrap_or(fallback)
}

/// True for a literal opaque `#rrggbb`.
pub fn is_literal_hex(s: &str) -> bool {
    RGB_HEX_RE.is_match(s)
}
