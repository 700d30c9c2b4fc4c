//! Holographic interface: ambient glow, interference scanlines, rotating
//! wireframe cubes, data streams and occasional glitch bars.

use std::f64::consts::TAU;

use backdrop_common::Color;
use backdrop_config::EffectType;

use super::matrix::{self, Vec3};
use super::{glow, hash01, scaled, FrameContext};
use crate::canvas::{BlendMode, Point, RadialGradient, Surface};

/// Vertical distance between scanlines.
pub const SCANLINE_SPACING: u32 = 4;
/// Scanlines dimmer than this are not drawn.
pub const SCANLINE_THRESHOLD: f64 = 0.3;
/// Global glitch sine level above which bars appear.
pub const GLITCH_THRESHOLD: f64 = 0.85;

const FOCAL_LENGTH: f64 = 300.0;
const Z_OFFSET: f64 = 200.0;
const TRAIL_LENGTH: usize = 8;

const CUBE_VERTICES: [Vec3; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

pub fn cube_count(density: f64) -> usize {
    scaled(EffectType::Hologram, 8.0, density)
}

pub fn stream_count(density: f64) -> usize {
    scaled(EffectType::Hologram, 15.0, density)
}

/// Scanline rows that pass the intensity gate, as `(y, intensity)`.
pub fn visible_scanlines(height: u32, time: f64) -> Vec<(f64, f64)> {
    (0..height)
        .step_by(SCANLINE_SPACING as usize)
        .filter_map(|row| {
            let y = row as f64 + 0.5;
            let intensity = 0.5 + 0.5 * (y * 0.05 + time * 2.0).sin();
            (intensity >= SCANLINE_THRESHOLD).then_some((y, intensity))
        })
        .collect()
}

/// Glitch level at `time`; bars are drawn while it exceeds
/// [`GLITCH_THRESHOLD`].
pub fn glitch_level(time: f64) -> f64 {
    (time * 0.7).sin() * (time * 2.3).sin()
}

pub fn render(surface: &mut Surface, ctx: &FrameContext<'_>) {
    let t = ctx.time();
    let density = ctx.density();

    draw_ambient(surface, ctx);
    draw_scanlines(surface, ctx, t);
    for i in 0..cube_count(density) {
        draw_cube(surface, ctx, i, t);
    }
    for j in 0..stream_count(density) {
        draw_stream(surface, ctx, j, t);
    }
    if glitch_level(t) > GLITCH_THRESHOLD {
        draw_glitch(surface, ctx, t);
    }
}

fn draw_ambient(surface: &mut Surface, ctx: &FrameContext<'_>) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let palette = ctx.palette;
    let built = RadialGradient::new(w / 2.0, h / 2.0, 0.0, w.max(h) * 0.75).and_then(|mut g| {
        g.add_color_stop(0.0, palette.primary.with_alpha(0.12))?;
        g.add_color_stop(0.6, palette.background.with_alpha(0.06))?;
        g.add_color_stop(1.0, palette.background.with_alpha(0.0))?;
        Ok(g)
    });
    match built {
        Ok(g) => surface.fill_radial(&g),
        Err(_) => surface.fill_rect(0.0, 0.0, w, h, palette.background.with_alpha(0.06)),
    }
}

fn draw_scanlines(surface: &mut Surface, ctx: &FrameContext<'_>, t: f64) {
    let w = surface.width() as f64;
    for (y, intensity) in visible_scanlines(surface.height(), t) {
        let color = ctx.palette.primary.with_alpha((intensity * 0.08) as f32);
        surface.stroke_line((0.0, y), (w, y), 1.0, color);
    }
}

fn draw_cube(surface: &mut Surface, ctx: &FrameContext<'_>, i: usize, t: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let cx = w * (0.1 + 0.8 * hash01(i, 1));
    let cy = h * (0.1 + 0.8 * hash01(i, 2));
    let size = 18.0 + 28.0 * hash01(i, 3);

    let rotation = matrix::rotate_xyz(
        t * (0.3 + 0.2 * hash01(i, 4)) + i as f64,
        t * 0.5 + i as f64 * 0.7,
        t * 0.2,
    );
    let projected: Vec<Option<Point>> = CUBE_VERTICES
        .iter()
        .map(|v| {
            let v = matrix::transform(&rotation, [v[0] * size, v[1] * size, v[2] * size]);
            matrix::project(v, FOCAL_LENGTH, Z_OFFSET).map(|(x, y, _)| (cx + x, cy + y))
        })
        .collect();

    for (k, (a, b)) in CUBE_EDGES.iter().enumerate() {
        let (Some(pa), Some(pb)) = (projected[*a], projected[*b]) else {
            continue;
        };
        let color = if k % 2 == 0 {
            ctx.palette.primary
        } else {
            ctx.palette.secondary
        };
        surface.stroke_line(pa, pb, 1.0, color.with_alpha(0.55));
    }

    for (k, p) in projected.iter().enumerate() {
        let Some((x, y)) = *p else {
            continue;
        };
        let pulse = 0.5 + 0.5 * (t * 3.0 + (i + k) as f64).sin();
        surface.fill_circle(x, y, 1.0 + 1.5 * pulse, ctx.palette.accent.with_alpha(0.4 + 0.5 * pulse as f32));
    }
}

/// Position of stream `j` at `progress` along its path.
fn stream_position(j: usize, progress: f64, w: f64, h: f64) -> Point {
    let lane = hash01(j, 6);
    match j % 4 {
        0 => (progress * w, h * lane),
        1 => (w * lane, progress * h),
        2 => (progress * w, (h * lane + progress * h * 0.5) % h),
        _ => {
            let radius = w.min(h) * (0.15 + 0.3 * lane);
            let angle = progress * TAU;
            (w / 2.0 + radius * angle.cos(), h / 2.0 + radius * angle.sin())
        }
    }
}

fn draw_stream(surface: &mut Surface, ctx: &FrameContext<'_>, j: usize, t: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let speed = 0.04 + 0.08 * hash01(j, 5);
    let head = (t * speed + hash01(j, 7)).rem_euclid(1.0);
    let color: Color = ctx.palette.cycle()[j % 3];

    for k in 0..TRAIL_LENGTH {
        let fade = 1.0 - k as f64 / TRAIL_LENGTH as f64;
        let progress = (head - k as f64 * 0.008).rem_euclid(1.0);
        let (x, y) = stream_position(j, progress, w, h);
        surface.fill_circle(x, y, 0.5 + 1.5 * fade, color.with_alpha((0.8 * fade) as f32));
    }
    let (x, y) = stream_position(j, head, w, h);
    glow(surface, x, y, 6.0, color, 0.35);
}

fn draw_glitch(surface: &mut Surface, ctx: &FrameContext<'_>, t: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let saved = surface.save();
    surface.set_blend_mode(BlendMode::Screen);
    // Bars jump ten times a second.
    let tick = (t * 10.0).floor().max(0.0) as usize;
    for k in 0..3 {
        let y = h * hash01(tick * 3 + k, 8);
        let bar = 2.0 + 8.0 * hash01(tick * 3 + k, 9);
        let color = if k % 2 == 0 {
            ctx.palette.primary
        } else {
            ctx.palette.accent
        };
        surface.fill_rect(0.0, y, w, bar, color.with_alpha(0.15));
    }
    surface.restore(saved);
}
