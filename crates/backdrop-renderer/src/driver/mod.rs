//! The render loop owner.
//!
//! [`AnimationDriver`] paces frames, gates drawing on visibility, measures
//! and broadcasts fps, and dispatches to the configured generator.

mod animation;


pub use animation::AnimationDriver;

/// Lifecycle of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Nothing scheduled. Either the effect is `none` or the loop was
    /// cancelled.
    Stopped,
    /// Frames are being scheduled.
    Running,
    /// One frame at time zero was drawn and nothing is scheduled.
    StaticFrame,
}

/// What a single scheduled tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Under the frame budget since the last draw.
    Throttled,
    /// Canvas entirely outside the viewport.
    Hidden,
    Drawn,
    /// The driver is not running; nothing further will be scheduled.
    Stopped,
}
