//! Software rendering of the animated backgrounds.

pub mod canvas;
pub mod driver;
pub mod effects;
pub mod export;
pub mod perf;

pub use canvas::{BlendMode, RadialGradient, Rgba, Surface};
pub use driver::{AnimationDriver, DriverState, FrameOutcome};
pub use effects::{element_count, render_effect, EffectState, FrameContext, ParticleField};
pub use export::export_png;
pub use perf::{DrawTimer, FpsMeter};
