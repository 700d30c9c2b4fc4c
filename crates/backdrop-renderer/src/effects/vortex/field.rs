use std::f64::consts::TAU;

use backdrop_common::SurfaceId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::node_count;
use crate::canvas::Surface;

/// Pairs closer than this are linked.
pub const CONNECTION_THRESHOLD: f64 = 180.0;
/// Velocity multiplier applied every step.
pub const DAMPING: f64 = 0.98;

const FORCE: f64 = 0.05;

/// One particle of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub energy: f64,
    pub phase: f64,
}

impl Node {
    fn random<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            vx: rng.gen_range(-0.5..0.5),
            vy: rng.gen_range(-0.5..0.5),
            energy: rng.gen_range(0.3..1.0),
            phase: rng.gen_range(0.0..TAU),
        }
    }
}

/// Link between two nodes for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub strength: f64,
}

/// Simulation state bound to one surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    surface: SurfaceId,
    nodes: Vec<Node>,
}

impl ParticleField {
    /// Scatter `node_count(density)` nodes over the surface.
    pub fn attach<R: Rng + ?Sized>(surface: &Surface, density: f64, rng: &mut R) -> Self {
        let (w, h) = (surface.width() as f64, surface.height() as f64);
        let nodes = (0..node_count(density))
            .map(|_| Node::random(w, h, rng))
            .collect();
        Self {
            surface: surface.id(),
            nodes,
        }
    }

    /// [`attach`](Self::attach) with a fixed seed.
    pub fn seeded(surface: &Surface, density: f64, seed: u64) -> Self {
        Self::attach(surface, density, &mut StdRng::seed_from_u64(seed))
    }

    pub fn from_nodes(surface: SurfaceId, nodes: Vec<Node>) -> Self {
        Self { surface, nodes }
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Grow or shrink to `count` nodes, keeping the existing ones.
    pub fn resize<R: Rng + ?Sized>(&mut self, count: usize, width: f64, height: f64, rng: &mut R) {
        if count <= self.nodes.len() {
            self.nodes.truncate(count);
            return;
        }
        let missing = count - self.nodes.len();
        self.nodes
            .extend((0..missing).map(|_| Node::random(width, height, rng)));
    }

    /// Advance one frame: apply the force field, damp, move and wrap.
    pub fn step(&mut self, width: f64, height: f64, time: f64) {
        for node in &mut self.nodes {
            let fx = (time * 0.5 + node.phase).sin() * FORCE;
            let fy = (time * 0.3 + node.phase * 1.3).cos() * FORCE;
            node.vx = (node.vx + fx) * DAMPING;
            node.vy = (node.vy + fy) * DAMPING;
            node.x = wrap(node.x + node.vx, width);
            node.y = wrap(node.y + node.vy, height);
            node.energy = 0.5 + 0.5 * (time * 2.0 + node.phase).sin();
        }
    }

    /// Every pair closer than [`CONNECTION_THRESHOLD`], recomputed from the
    /// current positions.
    pub fn connections(&self, time: f64) -> Vec<Connection> {
        let mut out = Vec::new();
        for (a, na) in self.nodes.iter().enumerate() {
            for (b, nb) in self.nodes.iter().enumerate().skip(a + 1) {
                let distance = (na.x - nb.x).hypot(na.y - nb.y);
                if distance >= CONNECTION_THRESHOLD {
                    continue;
                }
                let resonance = 0.5 + 0.5 * (time * 2.0 + distance * 0.02).sin();
                out.push(Connection {
                    a,
                    b,
                    distance,
                    strength: (1.0 - distance / CONNECTION_THRESHOLD) * resonance,
                });
            }
        }
        out
    }
}

/// Toroidal wrap into `[0, extent)`.
fn wrap(v: f64, extent: f64) -> f64 {
    if !v.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
