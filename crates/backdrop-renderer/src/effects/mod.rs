//! Procedural background generators.
//!
//! Hologram, circuit and psychedelic are pure functions of the surface size,
//! the config and the elapsed time. Vortex owns a [`ParticleField`] that
//! persists across frames for one surface.

pub mod circuit;
pub mod hologram;
pub mod matrix;
pub mod psychedelic;
pub mod vortex;

mod state;


use backdrop_common::Color;
use backdrop_config::{BackgroundConfig, EffectType, ResolvedPalette};

use crate::canvas::{RadialGradient, Surface};

pub use state::{render_effect, EffectState};
pub use vortex::{Connection, Node, ParticleField};

/// Everything a generator reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub config: &'a BackgroundConfig,
    pub palette: &'a ResolvedPalette,
    /// Seconds since the animation started.
    pub elapsed: f64,
}

impl<'a> FrameContext<'a> {
    pub fn new(config: &'a BackgroundConfig, palette: &'a ResolvedPalette, elapsed: f64) -> Self {
        Self {
            config,
            palette,
            elapsed,
        }
    }

    /// Animation phase: elapsed seconds scaled by the configured speed.
    pub fn time(&self) -> f64 {
        let t = self.elapsed * self.config.animation_speed;
        if t.is_finite() {
            t
        } else {
            0.0
        }
    }

    /// Density clamped into the effect's range.
    pub fn density(&self) -> f64 {
        clamp_density(self.config.effect, self.config.density)
    }
}

/// Clamp `density` into the range accepted for `effect`. Non-finite values
/// become 1.
pub fn clamp_density(effect: EffectType, density: f64) -> f64 {
    let (lo, hi) = effect.density_range();
    if density.is_finite() {
        density.clamp(lo, hi)
    } else {
        1.0_f64.clamp(lo, hi)
    }
}

/// Number of elements of `effect` scaled from a per-unit base count.
pub(crate) fn scaled(effect: EffectType, base: f64, density: f64) -> usize {
    ((base * clamp_density(effect, density)).round() as usize).max(1)
}

/// Total drawn element count for `effect` at `density`.
pub fn element_count(effect: EffectType, density: f64) -> usize {
    match effect {
        EffectType::Hologram => hologram::cube_count(density) + hologram::stream_count(density),
        EffectType::Circuit => circuit::tree_count(density) + circuit::packet_count(density),
        EffectType::Psychedelic => {
            psychedelic::layer_count(density) + psychedelic::particle_count(density)
        }
        EffectType::Vortex => vortex::node_count(density),
        EffectType::None => 0,
    }
}

/// Deterministic pseudo-random value in `[0, 1)` for an element index and a
/// salt.
pub(crate) fn hash01(index: usize, salt: u32) -> f64 {
    let mut x = (index as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((salt as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9));
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

/// Soft glow: a radial gradient from `color` at `alpha` to transparent.
///
/// Falls back to a flat low-alpha disc when the gradient cannot be built.
pub(crate) fn glow(surface: &mut Surface, cx: f64, cy: f64, radius: f64, color: Color, alpha: f32) {
    let inner = color.with_alpha(alpha);
    let built = RadialGradient::new(cx, cy, 0.0, radius).and_then(|mut g| {
        g.add_color_stop(0.0, inner)?;
        g.add_color_stop(1.0, color.with_alpha(0.0))?;
        Ok(g)
    });
    match built {
        Ok(gradient) => surface.fill_radial(&gradient),
        Err(e) => {
            tracing::trace!("glow gradient rejected, using flat fill: {e}");
            surface.fill_circle(cx, cy, radius * 0.5, inner.with_alpha(0.5));
        }
    }
}
