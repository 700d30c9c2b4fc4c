use backdrop_common::RenderError;
use backdrop_config::EffectType;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::{circuit, hologram, psychedelic, vortex, FrameContext, ParticleField};
use crate::canvas::Surface;

/// Per-surface generator state that outlives a single frame.
#[derive(Debug)]
pub struct EffectState {
    field: Option<ParticleField>,
    rng: StdRng,
}

impl EffectState {
    pub fn new() -> Self {
        Self {
            field: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible particle placement.
    pub fn seeded(seed: u64) -> Self {
        Self {
            field: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Drop the particle field; the next vortex frame attaches a new one.
    pub fn reset(&mut self) {
        if self.field.take().is_some() {
            debug!("particle field discarded");
        }
    }

    /// The field for `surface`, attached on first use or when the surface
    /// changed, and resized when the density asks for a different count.
    pub(super) fn field_for(&mut self, surface: &Surface, density: f64) -> &mut ParticleField {
        let wanted = vortex::node_count(density);
        let stale = self
            .field
            .as_ref()
            .map_or(true, |f| f.surface_id() != surface.id());
        if stale {
            debug!(surface = %surface.id(), nodes = wanted, "attaching particle field");
            self.field = Some(ParticleField::attach(surface, density, &mut self.rng));
        }
        let rng = &mut self.rng;
        let field = self
            .field
            .get_or_insert_with(|| ParticleField::attach(surface, density, rng));
        if field.len() != wanted {
            field.resize(wanted, surface.width() as f64, surface.height() as f64, rng);
        }
        field
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw one frame of the configured effect onto `surface`.
///
/// The surface is not cleared first. `EffectType::None` draws nothing.
pub fn render_effect(
    surface: &mut Surface,
    state: &mut EffectState,
    ctx: &FrameContext<'_>,
) -> Result<(), RenderError> {
    if !ctx.elapsed.is_finite() {
        return Err(RenderError::InvalidFrame(format!(
            "non-finite frame time {}",
            ctx.elapsed
        )));
    }
    let saved = surface.save();
    match ctx.config.effect {
        EffectType::Hologram => hologram::render(surface, ctx),
        EffectType::Circuit => circuit::render(surface, ctx),
        EffectType::Psychedelic => psychedelic::render(surface, ctx),
        EffectType::Vortex => {
            let field = state.field_for(surface, ctx.density());
            vortex::render(surface, field, ctx);
        }
        EffectType::None => {}
    }
    surface.restore(saved);
    Ok(())
}
