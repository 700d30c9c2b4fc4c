//! Software 2D canvas.
//!
//! An owned RGBA pixel buffer with the handful of immediate-mode
//! primitives the effect generators need. Pixels are straight (not
//! premultiplied) alpha.

mod gradient;
mod surface;
mod types;


pub use gradient::RadialGradient;
pub use surface::{Surface, MAX_DIMENSION};
pub use types::{BlendMode, DrawState, Point, Rgba};
