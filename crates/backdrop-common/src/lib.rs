pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{BackdropError, ConfigError, PlatformError, RenderError, StorageError};
pub use events::{Event, EventBus};
pub use id::{new_id, SurfaceId};
pub use types::{CapabilityVerdict, Color, Hsl, Rect, Viewport};

pub type Result<T> = std::result::Result<T, BackdropError>;
