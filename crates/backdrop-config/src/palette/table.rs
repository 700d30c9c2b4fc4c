//! Static palette table: one dark and one light entry per named mode.

use crate::schema::ColorMode;

/// `[primary, secondary, accent, background]`
pub(super) type Entry = [&'static str; 4];

pub(super) fn lookup(mode: ColorMode, dark_mode: bool) -> Entry {
    let (dark, light): (Entry, Entry) = match mode {
        ColorMode::Cyber | ColorMode::Custom => (
            ["#00ffff", "#ff00ff", "#00ff88", "#0a0a0f"],
            ["#0891b2", "#c026d3", "#059669", "#f0f9ff"],
        ),
        ColorMode::Ocean => (
            ["#0077be", "#00a8cc", "#7fdbff", "#001f3f"],
            ["#0369a1", "#0284c7", "#38bdf8", "#f0f9ff"],
        ),
        ColorMode::Fire => (
            ["#ff4500", "#ff8c00", "#ffd700", "#1a0000"],
            ["#dc2626", "#ea580c", "#f59e0b", "#fff7ed"],
        ),
        ColorMode::Spark => (
            ["#ffd60a", "#ff006e", "#8338ec", "#0b0b12"],
            ["#ca8a04", "#db2777", "#7c3aed", "#fefce8"],
        ),
        ColorMode::Forest => (
            ["#228b22", "#32cd32", "#90ee90", "#0a1a0a"],
            ["#15803d", "#16a34a", "#65a30d", "#f0fdf4"],
        ),
        ColorMode::Synthwave => (
            ["#ff2a6d", "#05d9e8", "#d1f7ff", "#01012b"],
            ["#e11d48", "#0891b2", "#7c3aed", "#fdf4ff"],
        ),
        ColorMode::Sunset => (
            ["#ff6b6b", "#feca57", "#ff9ff3", "#2d1b2e"],
            ["#f43f5e", "#f59e0b", "#ec4899", "#fff1f2"],
        ),
        ColorMode::Midnight => (
            ["#4169e1", "#9370db", "#e6e6fa", "#0b0b2b"],
            ["#1e3a8a", "#6d28d9", "#4338ca", "#eef2ff"],
        ),
        ColorMode::Aurora => (
            ["#00ff9f", "#00b8ff", "#d600ff", "#001a1a"],
            ["#059669", "#0284c7", "#a21caf", "#ecfeff"],
        ),
        ColorMode::Neon => (
            ["#39ff14", "#ff073a", "#0ff0fc", "#000000"],
            ["#16a34a", "#e11d48", "#0891b2", "#fafafa"],
        ),
    };
    if dark_mode {
        dark
    } else {
        light
    }
}
