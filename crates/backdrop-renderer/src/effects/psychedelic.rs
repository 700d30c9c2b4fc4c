//! Psychedelic mandala: warped petal layers, a pulsing core, a golden-angle
//! particle field and distorted energy rings.

use std::f64::consts::{PI, TAU};

use backdrop_config::EffectType;

use super::{glow, scaled, FrameContext};
use crate::canvas::{Point, Surface};

/// Phyllotaxis divergence angle in radians.
pub const GOLDEN_ANGLE: f64 = 2.39998;
/// Points sampled along one petal outline.
pub const PETAL_POINTS: usize = 20;
pub const CORE_LAYERS: usize = 5;

const WAVE_RINGS: usize = 3;
const WAVE_SEGMENTS: usize = 64;

pub fn layer_count(density: f64) -> usize {
    scaled(EffectType::Psychedelic, 8.0, density)
}

pub fn particle_count(density: f64) -> usize {
    scaled(EffectType::Psychedelic, 80.0, density)
}

/// Petals on mandala layer `layer` (zero-based).
pub fn petals_for_layer(layer: usize) -> usize {
    6 + 2 * layer
}

/// Sunflower-seed placement of `count` particles around `center`, spread
/// out to `radius`.
pub fn golden_angle_positions(count: usize, center: Point, radius: f64, time: f64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = radius / (count as f64).sqrt();
    (0..count)
        .map(|i| {
            let angle = i as f64 * GOLDEN_ANGLE + time * 0.1;
            let r = spacing * (i as f64).sqrt();
            (center.0 + r * angle.cos(), center.1 + r * angle.sin())
        })
        .collect()
}

/// Closed outline of one petal.
pub fn petal_outline(
    center: Point,
    inner: f64,
    outer: f64,
    heading: f64,
    width: f64,
    warp_phase: f64,
) -> Vec<Point> {
    (0..PETAL_POINTS)
        .map(|k| {
            let u = k as f64 / (PETAL_POINTS - 1) as f64;
            let angle = heading + (u - 0.5) * width;
            // Nested sine warp on top of the base petal swell.
            let warp = 1.0 + 0.15 * (u * PI * 4.0 + warp_phase).sin();
            let r = inner + (outer - inner) * (u * PI).sin() * warp;
            (center.0 + r * angle.cos(), center.1 + r * angle.sin())
        })
        .collect()
}

pub fn render(surface: &mut Surface, ctx: &FrameContext<'_>) {
    let t = ctx.time();
    let density = ctx.density();
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let center = (w / 2.0, h / 2.0);
    let max_r = w.min(h) * 0.45;
    let cycle = ctx.palette.cycle();

    let layers = layer_count(density);
    for layer in 0..layers {
        let petals = petals_for_layer(layer);
        let outer = max_r * (layer + 1) as f64 / layers as f64;
        let inner = outer * 0.3;
        let direction = if layer % 2 == 0 { 1.0 } else { -1.0 };
        let rotation = t * 0.2 * direction + layer as f64 * 0.3;
        let width = TAU / petals as f64;
        for p in 0..petals {
            let heading = rotation + p as f64 * width;
            let outline = petal_outline(center, inner, outer, heading, width, t * 2.0 + layer as f64);
            let color = cycle[(layer + p) % 3];
            surface.fill_polygon(&outline, color.with_alpha(0.06));
            surface.stroke_polyline(&outline, 1.0, color.with_alpha(0.25), true);
        }
    }

    for k in 0..CORE_LAYERS {
        let pulse = 1.0 + 0.2 * (t * 3.0 + k as f64).sin();
        let r = max_r * 0.12 * (CORE_LAYERS - k) as f64 / CORE_LAYERS as f64 * pulse;
        glow(surface, center.0, center.1, r, cycle[k % 3], 0.25);
    }

    let count = particle_count(density);
    for (i, (x, y)) in golden_angle_positions(count, center, max_r, t)
        .into_iter()
        .enumerate()
    {
        let size = 1.5 + (t * 2.0 + i as f64 * 0.1).sin();
        let color = cycle[i % 3];
        glow(surface, x, y, size * 3.0, color, 0.35);
        surface.fill_circle(x, y, size.max(0.5), color.with_alpha(0.8));
    }

    for k in 0..WAVE_RINGS {
        let progress = (t * 0.1 + k as f64 / WAVE_RINGS as f64).rem_euclid(1.0);
        let radius = progress * max_r * 1.2;
        let ring: Vec<Point> = (0..WAVE_SEGMENTS)
            .map(|s| {
                let a = s as f64 * TAU / WAVE_SEGMENTS as f64;
                let r = radius * (1.0 + 0.05 * (a * 6.0 + t * 3.0).sin());
                (center.0 + r * a.cos(), center.1 + r * a.sin())
            })
            .collect();
        let alpha = ((1.0 - progress) * 0.3) as f32;
        surface.stroke_polyline(&ring, 1.0, ctx.palette.accent.with_alpha(alpha), true);
    }
}
