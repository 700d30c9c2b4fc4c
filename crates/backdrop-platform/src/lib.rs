//! Host integration: paths, device capability probing and the
//! reduced-motion signal.

pub mod capability;
pub mod motion;
pub mod paths;

pub use capability::{
    resolve_capability, CapabilityProber, DeviceSignals, FrameClock, SimulatedClock,
    SystemFrameClock,
};
pub use motion::MotionPreference;
pub use paths::{config_dir, data_dir, ensure_dirs, settings_file, storage_dir};
