//! Frame rate measurement.

use std::collections::VecDeque;
use std::time::Duration;

/// Counts frames over a rolling window of frame timestamps and reports the
/// rate once per window.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window_ms: f64,
    window_start: Option<f64>,
    frames: u32,
    last_fps: Option<u32>,
}

impl FpsMeter {
    pub fn new(window_ms: f64) -> Self {
        let window_ms = if window_ms.is_finite() && window_ms > 0.0 {
            window_ms
        } else {
            1000.0
        };
        Self {
            window_ms,
            window_start: None,
            frames: 0,
            last_fps: None,
        }
    }

    /// Feed one tick at `timestamp_ms`. `counted` says whether this tick
    /// adds to the frame count; uncounted ticks still close windows. The
    /// first tick after a reset only opens the window.
    ///
    /// Returns the rate when a window closes.
    pub fn record(&mut self, timestamp_ms: f64, counted: bool) -> Option<u32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(timestamp_ms);
            return None;
        };
        if counted {
            self.frames += 1;
        }
        let elapsed = timestamp_ms - start;
        if elapsed < self.window_ms {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
        self.window_start = Some(timestamp_ms);
        self.frames = 0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// The most recently reported rate.
    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }

    pub fn reset(&mut self) {
        self.window_start = None;
        self.frames = 0;
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

/// Rolling average of how long each draw took.
#[derive(Debug, Clone)]
pub struct DrawTimer {
    samples: VecDeque<Duration>,
    max_samples: usize,
}

impl DrawTimer {
    /// 120-sample rolling window.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            max_samples: 120,
        }
    }

    pub fn record(&mut self, took: Duration) {
        self.samples.push_back(took);
        if self.samples.len() > self.max_samples {
            self.samples.pop_front();
        }
    }

    /// Average draw time in milliseconds.
    pub fn average_ms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self.samples.iter().map(|d| d.as_secs_f64()).sum();
        (total / self.samples.len() as f64) * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Default for DrawTimer {
    fn default() -> Self {
        Self::new()
    }
}
