mod capability;
mod color;
mod core;

pub use self::core::*;
pub use capability::*;
pub use color::*;
