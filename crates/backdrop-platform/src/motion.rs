//! Reduced-motion preference source.
//!
//! The preference is read once from `BACKDROP_REDUCED_MOTION` and then
//! carried on a `watch` channel so it can change while the engine runs.

use tokio::sync::watch;
use tracing::debug;

pub const REDUCED_MOTION_ENV: &str = "BACKDROP_REDUCED_MOTION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPreference {
    reduced: bool,
}

impl MotionPreference {
    pub fn new(reduced: bool) -> Self {
        Self { reduced }
    }

    /// Poll the environment once.
    pub fn from_env() -> Self {
        let pref = Self::from_value(std::env::var(REDUCED_MOTION_ENV).ok().as_deref());
        debug!(reduced = pref.reduced, "motion preference from environment");
        pref
    }

    /// `1`, `true`, `yes` and `on` (any case) mean reduced motion.
    pub fn from_value(value: Option<&str>) -> Self {
        let reduced = value
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(false);
        Self { reduced }
    }

    pub fn reduced(&self) -> bool {
        self.reduced
    }

    /// Live channel seeded with the current preference.
    pub fn channel(&self) -> (watch::Sender<bool>, watch::Receiver<bool>) {
        watch::channel(self.reduced)
    }
}
