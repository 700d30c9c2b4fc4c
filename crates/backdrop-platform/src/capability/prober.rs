//! Capability scoring and the probe state machine.

use backdrop_common::CapabilityVerdict;
use backdrop_config::schema::CapabilitySettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::FrameClock;
use super::signals::DeviceSignals;

/// Cores assumed when the host does not report them.
const DEFAULT_CORES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    ScoringStatic,
    WarmingUp,
    Decided(CapabilityVerdict),
}

/// Everything that went into a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub static_score: u32,
    pub warmup_fps: f64,
    pub fps_bonus: u32,
    pub verdict: CapabilityVerdict,
}

/// Score hardware signals.
///
/// +2 for 8+ cores (+1 for 6+), +2 for a GPU, +2 for 6+ GB memory (+1 for
/// 4+), +2 on desktop (+1 otherwise). Hosts with `low_core_cap` cores or
/// fewer are capped at `low_core_cap` points.
pub fn static_score(signals: &DeviceSignals, settings: &CapabilitySettings) -> u32 {
    let cores = signals.cores.unwrap_or(DEFAULT_CORES);
    let memory = signals.memory_gb.unwrap_or(settings.default_memory_gb);

    let mut score = 0;
    score += match cores {
        c if c >= 8 => 2,
        c if c >= 6 => 1,
        _ => 0,
    };
    if signals.gpu_available {
        score += 2;
    }
    score += if memory >= 6.0 {
        2
    } else if memory >= 4.0 {
        1
    } else {
        0
    };
    score += if signals.form_factor.is_desktop() { 2 } else { 1 };

    if cores <= settings.low_core_cap as usize {
        score = score.min(settings.low_core_cap);
    }
    score
}

/// Bonus points for the warm-up frame rate.
pub fn fps_bonus(fps: f64, settings: &CapabilitySettings) -> u32 {
    if fps >= settings.bonus_high_fps {
        2
    } else if fps >= settings.bonus_mid_fps {
        1
    } else {
        0
    }
}

/// Combine the static score with the warm-up result.
///
/// Below `floor_fps` the answer is always static. At or above
/// `gpu_override_fps` with a GPU it is always animate. Otherwise the total
/// score must reach `capable_score`.
pub fn decide(
    score: u32,
    fps: f64,
    gpu_available: bool,
    settings: &CapabilitySettings,
) -> CapabilityVerdict {
    if !fps.is_finite() || fps < settings.floor_fps {
        return CapabilityVerdict::Static;
    }
    if gpu_available && fps >= settings.gpu_override_fps {
        return CapabilityVerdict::Animate;
    }
    CapabilityVerdict::from_animate(score + fps_bonus(fps, settings) >= settings.capable_score)
}

pub struct CapabilityProber {
    settings: CapabilitySettings,
    state: ProbeState,
    report: Option<ProbeReport>,
}

impl CapabilityProber {
    pub fn new(settings: CapabilitySettings) -> Self {
        Self {
            settings,
            state: ProbeState::Idle,
            report: None,
        }
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    pub fn report(&self) -> Option<&ProbeReport> {
        self.report.as_ref()
    }

    /// Score, warm up, decide. A prober that has already decided returns
    /// its verdict without probing again.
    pub fn run(&mut self, signals: &DeviceSignals, clock: &mut dyn FrameClock) -> CapabilityVerdict {
        if let ProbeState::Decided(verdict) = self.state {
            return verdict;
        }

        self.state = ProbeState::ScoringStatic;
        let score = static_score(signals, &self.settings);
        debug!(score, "static capability score");

        self.state = ProbeState::WarmingUp;
        let fps = self.warm_up(clock);
        let bonus = fps_bonus(fps, &self.settings);

        let verdict = decide(score, fps, signals.gpu_available, &self.settings);
        info!(score, fps, bonus, %verdict, "capability decided");

        self.report = Some(ProbeReport {
            static_score: score,
            warmup_fps: fps,
            fps_bonus: bonus,
            verdict,
        });
        self.state = ProbeState::Decided(verdict);
        verdict
    }

    /// Count frames until `warmup_ms` has elapsed; returns whole frames per
    /// second.
    fn warm_up(&self, clock: &mut dyn FrameClock) -> f64 {
        let start = clock.next_frame();
        let mut frames = 0u32;
        let mut elapsed = 0.0;
        while elapsed < self.settings.warmup_ms {
            let now = clock.next_frame();
            frames += 1;
            elapsed = now - start;
            if elapsed <= 0.0 && frames > 10_000 {
                // Clock is not advancing.
                return 0.0;
            }
        }
        (frames as f64 * 1000.0 / elapsed).round()
    }
}
