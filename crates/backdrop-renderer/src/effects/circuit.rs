//! Organic circuit boards: recursive branching traces with component
//! glyphs, flowing packets and a wavering grid.

use std::f64::consts::{FRAC_PI_2, TAU};

use backdrop_common::Color;
use backdrop_config::EffectType;

use super::{glow, hash01, scaled, FrameContext};
use crate::canvas::{BlendMode, Point, Surface};

/// Deepest recursion level of a circuit tree.
pub const MAX_DEPTH: u32 = 9;
/// Branches shorter than this end the recursion.
pub const MIN_BRANCH_LENGTH: f64 = 8.0;
/// Packet energy above which a spark is drawn.
pub const SPARK_ENERGY: f64 = 0.85;

const GRID_SPACING: f64 = 40.0;
const TRAIL_LENGTH: usize = 6;

/// Stylized component drawn at a branch tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Led,
    Resistor,
    Capacitor,
}

impl Glyph {
    /// Glyphs sit on odd depths and rotate through the three kinds.
    pub fn for_depth(depth: u32) -> Option<Glyph> {
        if depth % 2 == 0 {
            return None;
        }
        Some(match (depth / 2) % 3 {
            0 => Glyph::Led,
            1 => Glyph::Resistor,
            _ => Glyph::Capacitor,
        })
    }
}

pub fn tree_count(density: f64) -> usize {
    scaled(EffectType::Circuit, 6.0, density)
}

pub fn packet_count(density: f64) -> usize {
    scaled(EffectType::Circuit, 25.0, density)
}

/// Packet energy for packet `j` at `time`, in `[-1, 1]`.
pub fn packet_energy(j: usize, time: f64) -> f64 {
    (time * 2.0 + j as f64 * 1.7).sin()
}

pub fn render(surface: &mut Surface, ctx: &FrameContext<'_>) {
    let t = ctx.time();
    let density = ctx.density();

    draw_grid(surface, ctx, t);

    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let trees = tree_count(density);
    let trunk = w.min(h) * 0.12;
    for i in 0..trees {
        let x = w * (i as f64 + 0.5) / trees as f64;
        // Alternate trees grow up from the bottom and down from the top.
        let (y, angle) = if i % 2 == 0 {
            (h, -FRAC_PI_2)
        } else {
            (0.0, FRAC_PI_2)
        };
        let phase = t * 0.5 + i as f64 * 1.3;
        branch(surface, ctx, (x, y), angle, trunk, 0, phase);
    }

    for j in 0..packet_count(density) {
        draw_packet(surface, ctx, j, t);
    }
}

fn draw_grid(surface: &mut Surface, ctx: &FrameContext<'_>, t: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let color = ctx.palette.primary.with_alpha(0.05);
    let columns = (w / GRID_SPACING).ceil() as usize;
    for k in 0..=columns {
        let x = k as f64 * GRID_SPACING + (t * 0.5 + k as f64 * 0.3).sin() * 2.0;
        surface.stroke_line((x, 0.0), (x, h), 1.0, color);
    }
    let rows = (h / GRID_SPACING).ceil() as usize;
    for k in 0..=rows {
        let y = k as f64 * GRID_SPACING + (t * 0.4 + k as f64 * 0.5).cos() * 2.0;
        surface.stroke_line((0.0, y), (w, y), 1.0, color);
    }
}

fn branch(
    surface: &mut Surface,
    ctx: &FrameContext<'_>,
    from: Point,
    angle: f64,
    length: f64,
    depth: u32,
    phase: f64,
) {
    if depth > MAX_DEPTH || length < MIN_BRANCH_LENGTH {
        return;
    }
    let to = (from.0 + angle.cos() * length, from.1 + angle.sin() * length);
    let bend = (phase + depth as f64).sin() * length * 0.2;
    let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    let ctrl = (mid.0 - angle.sin() * bend, mid.1 + angle.cos() * bend);

    let color = ctx.palette.cycle()[depth as usize % 3];
    let alpha = (1.0 - depth as f32 / 10.0) * 0.6;
    let width = (3.0 - depth as f64 * 0.3).max(0.5);
    surface.stroke_quadratic(from, ctrl, to, width, color.with_alpha(alpha));

    if let Some(glyph) = Glyph::for_depth(depth) {
        draw_glyph(surface, ctx, glyph, to, angle, phase);
    }

    let spread = 0.4 + 0.15 * (phase + depth as f64 * 0.7).sin();
    let next = length * (0.72 + 0.05 * (phase * 1.3 + depth as f64).sin());
    branch(surface, ctx, to, angle - spread, next, depth + 1, phase);
    branch(surface, ctx, to, angle + spread, next, depth + 1, phase);
}

fn draw_glyph(
    surface: &mut Surface,
    ctx: &FrameContext<'_>,
    glyph: Glyph,
    at: Point,
    angle: f64,
    phase: f64,
) {
    let (x, y) = at;
    // Unit vectors along and across the branch.
    let (ux, uy) = (angle.cos(), angle.sin());
    let (nx, ny) = (-uy, ux);
    match glyph {
        Glyph::Led => {
            let lit = 0.5 + 0.5 * (phase * 4.0).sin();
            glow(surface, x, y, 7.0, ctx.palette.accent, 0.3 + 0.4 * lit as f32);
            surface.fill_circle(x, y, 2.0, ctx.palette.accent.with_alpha(0.9));
        }
        Glyph::Resistor => {
            let zigzag: Vec<Point> = (0..7)
                .map(|k| {
                    let along = (k as f64 - 3.0) * 2.0;
                    let across = if k % 2 == 0 { -2.5 } else { 2.5 };
                    let across = if k == 0 || k == 6 { 0.0 } else { across };
                    (x + ux * along + nx * across, y + uy * along + ny * across)
                })
                .collect();
            surface.stroke_polyline(&zigzag, 1.0, ctx.palette.secondary.with_alpha(0.7), false);
        }
        Glyph::Capacitor => {
            let color = ctx.palette.primary.with_alpha(0.7);
            for offset in [-1.5, 1.5] {
                let cx = x + ux * offset;
                let cy = y + uy * offset;
                surface.stroke_line(
                    (cx - nx * 4.0, cy - ny * 4.0),
                    (cx + nx * 4.0, cy + ny * 4.0),
                    1.0,
                    color,
                );
            }
        }
    }
}

/// Position of packet `j` at `progress` along its path.
fn packet_position(j: usize, progress: f64, t: f64, w: f64, h: f64) -> Point {
    let lane = hash01(j, 11);
    let a = progress * TAU;
    match j % 4 {
        0 => (progress * w, h * (0.15 + 0.7 * lane) + (a * 2.0 + t).sin() * 30.0),
        1 => (w * (0.15 + 0.7 * lane) + (a * 2.0 + t).cos() * 30.0, progress * h),
        2 => (
            w / 2.0 + (a * 3.0).sin() * w * 0.35,
            h / 2.0 + (a * 2.0 + lane).sin() * h * 0.35,
        ),
        _ => {
            let r = progress * w.min(h) * 0.45;
            let spin = a * 3.0 + lane * TAU;
            (w / 2.0 + r * spin.cos(), h / 2.0 + r * spin.sin())
        }
    }
}

fn draw_packet(surface: &mut Surface, ctx: &FrameContext<'_>, j: usize, t: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let speed = 0.03 + 0.06 * hash01(j, 12);
    let head = (t * speed + hash01(j, 13)).rem_euclid(1.0);
    let color: Color = ctx.palette.cycle()[j % 3];

    let mut trail = Vec::with_capacity(TRAIL_LENGTH);
    for k in 0..TRAIL_LENGTH {
        let progress = (head - k as f64 * 0.006).rem_euclid(1.0);
        trail.push(packet_position(j, progress, t, w, h));
    }
    for (k, pair) in trail.windows(2).enumerate() {
        let fade = 1.0 - k as f32 / TRAIL_LENGTH as f32;
        // Skip the jump where the path wraps.
        let (dx, dy) = (pair[0].0 - pair[1].0, pair[0].1 - pair[1].1);
        if dx.hypot(dy) > w.max(h) * 0.25 {
            continue;
        }
        surface.stroke_line(pair[0], pair[1], 1.5, color.with_alpha(0.6 * fade));
    }
    let (x, y) = trail[0];
    surface.fill_circle(x, y, 2.0, color.with_alpha(0.9));

    if packet_energy(j, t) > SPARK_ENERGY {
        let saved = surface.save();
        surface.set_blend_mode(BlendMode::Screen);
        for k in 0..6 {
            let a = k as f64 * TAU / 6.0 + t * 5.0;
            let reach = 5.0 + 4.0 * hash01(j * 6 + k, 14);
            surface.stroke_line(
                (x, y),
                (x + a.cos() * reach, y + a.sin() * reach),
                1.0,
                ctx.palette.accent.with_alpha(0.8),
            );
        }
        surface.restore(saved);
    }
}
