//! Quantum field: a drifting particle simulation with resonant links.
//!
//! The only stateful generator. Node positions live in a [`ParticleField`]
//! that the caller keeps across frames for one surface.

mod field;

use backdrop_common::Color;
use backdrop_config::EffectType;
use tracing::debug;

pub use field::{Connection, Node, ParticleField, CONNECTION_THRESHOLD, DAMPING};

use super::{scaled, FrameContext};
use crate::canvas::{RadialGradient, Surface};

pub const MAX_NODES: usize = 100;

pub fn node_count(density: f64) -> usize {
    scaled(EffectType::Vortex, 25.0, density).min(MAX_NODES)
}

/// Step the field one frame and draw it.
pub fn render(surface: &mut Surface, field: &mut ParticleField, ctx: &FrameContext<'_>) {
    let t = ctx.time();
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    field.step(w, h, t);

    for link in field.connections(t) {
        let (a, b) = (field.nodes()[link.a], field.nodes()[link.b]);
        let energy = (a.energy + b.energy) / 2.0;
        let color = if energy > 0.6 {
            ctx.palette.accent
        } else {
            ctx.palette.primary
        };
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len = link.distance.max(f64::EPSILON);
        let fluctuation = (t * 3.0 + (link.a + link.b) as f64).sin() * 20.0 * link.strength;
        let mid = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let ctrl = (mid.0 - dy / len * fluctuation, mid.1 + dx / len * fluctuation);
        let alpha = (link.strength * (0.3 + 0.5 * energy)) as f32;
        surface.stroke_quadratic((a.x, a.y), ctrl, (b.x, b.y), 1.0, color.with_alpha(alpha));
    }

    for node in field.nodes() {
        let radius = 4.0 + node.energy * 8.0;
        node_glow(surface, node.x, node.y, radius, ctx.palette.primary, node.energy);
        surface.fill_circle(node.x, node.y, 1.5, ctx.palette.secondary.with_alpha(0.9));
    }
}

fn node_glow(surface: &mut Surface, x: f64, y: f64, radius: f64, color: Color, energy: f64) {
    let hex = color.to_rgb_hex();
    let alpha = (color.a as f64 * (0.2 + 0.5 * energy)).round().clamp(0.0, 255.0) as u8;
    let built = RadialGradient::new(x, y, 0.0, radius).and_then(|mut g| {
        g.add_stop(0.0, &format!("{hex}{alpha:02x}"))?;
        g.add_stop(1.0, &format!("{hex}00"))?;
        Ok(g)
    });
    match built {
        Ok(g) => surface.fill_radial(&g),
        Err(e) => {
            debug!("node glow fell back to flat fill: {e}");
            surface.fill_circle(x, y, radius * 0.5, color.with_alpha(0.3));
        }
    }
}
