//! Frame clocks: where frame timestamps come from.

use std::time::{Duration, Instant};

/// One 60 Hz frame.
pub const FRAME_INTERVAL_60HZ: Duration = Duration::from_nanos(16_666_667);

/// Source of monotonically increasing frame timestamps in milliseconds.
pub trait FrameClock: Send {
    /// Timestamp of the next frame, waiting for it if needed.
    fn next_frame(&mut self) -> f64;

    /// Time left before the next frame is due.
    fn until_next(&self) -> Duration;
}

/// Real time, paced at a fixed cadence.
pub struct SystemFrameClock {
    start: Instant,
    interval: Duration,
    next_due: Instant,
}

impl SystemFrameClock {
    pub fn new(interval: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            interval,
            next_due: start + interval,
        }
    }
}

impl Default for SystemFrameClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_60HZ)
    }
}

impl FrameClock for SystemFrameClock {
    fn next_frame(&mut self) -> f64 {
        let now = Instant::now();
        if now < self.next_due {
            std::thread::sleep(self.next_due - now);
        }
        let now = Instant::now();
        // Skip missed slots instead of bursting to catch up.
        self.next_due = if now > self.next_due + self.interval {
            now + self.interval
        } else {
            self.next_due + self.interval
        };
        now.duration_since(self.start).as_secs_f64() * 1000.0
    }

    fn until_next(&self) -> Duration {
        self.next_due.saturating_duration_since(Instant::now())
    }
}

/// Deterministic clock stepping by a fixed interval.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    start_ms: f64,
    step_ms: f64,
    frames: u64,
}

impl SimulatedClock {
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            start_ms,
            step_ms,
            frames: 0,
        }
    }

    /// Clock that produces `fps` frames per second starting at 0.
    pub fn from_fps(fps: f64) -> Self {
        Self::new(0.0, 1000.0 / fps)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameClock for SimulatedClock {
    fn next_frame(&mut self) -> f64 {
        self.frames += 1;
        self.start_ms + self.frames as f64 * self.step_ms
    }

    fn until_next(&self) -> Duration {
        Duration::ZERO
    }
}
