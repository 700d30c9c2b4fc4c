//! Device capability probing.
//!
//! Decides once per device whether continuous animation is allowed. A
//! static score from hardware signals is combined with the frame rate
//! achieved during a short warm-up, and the verdict is cached in storage
//! under `animation-capability`.

mod cache;
mod clock;
mod gpu;
mod prober;
mod signals;

#[cfg(test)]
mod tests;

pub use cache::{cached_capability, clear_capability, resolve_capability};
pub use clock::{FrameClock, SimulatedClock, SystemFrameClock, FRAME_INTERVAL_60HZ};
pub use gpu::{FixedGpu, GpuProbe, WgpuProbe};
pub use prober::{decide, fps_bonus, static_score, CapabilityProber, ProbeReport, ProbeState};
pub use signals::{DeviceSignals, FormFactor};
