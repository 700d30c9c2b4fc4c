//! Internal color parsing helpers.

use backdrop_common::Color;
use regex::Regex;
use std::sync::LazyLock;

/// `#rrggbb` or `#rrggbbaa`, nothing else.
pub(crate) static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// Opaque `#rrggbb` only.
pub(crate) static RGB_HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

/// Parse a string already matched by [`HEX_RE`].
pub(super) fn parse_hex(s: &str) -> Option<Color> {
    if !HEX_RE.is_match(s) {
        return None;
    }
    Color::from_hex(s)
}
