//! Hardware and form-factor signals.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use super::gpu::{GpuProbe, WgpuProbe};

static TABLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ipad|tablet|playbook|silk|kindle").unwrap());

static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mobi|iphone|ipod|blackberry|iemobile|opera mini|windows phone").unwrap()
});

static ANDROID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)android").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    Mobile,
    Tablet,
    Desktop,
}

impl FormFactor {
    /// Sniff a user-agent string. No user agent means a desktop host.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent else {
            return FormFactor::Desktop;
        };
        if TABLET_RE.is_match(ua) {
            return FormFactor::Tablet;
        }
        if MOBILE_RE.is_match(ua) {
            return FormFactor::Mobile;
        }
        // Android without "Mobile" is a tablet.
        if ANDROID_RE.is_match(ua) {
            return FormFactor::Tablet;
        }
        FormFactor::Desktop
    }

    pub fn is_desktop(&self) -> bool {
        matches!(self, FormFactor::Desktop)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSignals {
    /// Logical cores, if known.
    pub cores: Option<usize>,
    /// Total memory in GB, if known.
    pub memory_gb: Option<f64>,
    pub form_factor: FormFactor,
    pub gpu_available: bool,
}

impl DeviceSignals {
    /// Read signals from the running host, probing the GPU through wgpu.
    pub fn detect(user_agent: Option<&str>) -> Self {
        Self::detect_with(user_agent, &WgpuProbe)
    }

    pub fn detect_with(user_agent: Option<&str>, gpu: &dyn GpuProbe) -> Self {
        let signals = Self {
            cores: detect_cores(),
            memory_gb: detect_memory_gb(),
            form_factor: FormFactor::from_user_agent(user_agent),
            gpu_available: gpu.gpu_available(),
        };
        debug!(?signals, "device signals detected");
        signals
    }
}

fn detect_cores() -> Option<usize> {
    std::thread::available_parallelism().ok().map(|n| n.get())
}

#[cfg(target_os = "linux")]
fn detect_memory_gb() -> Option<f64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    parse_meminfo(&meminfo)
}

#[cfg(not(target_os = "linux"))]
fn detect_memory_gb() -> Option<f64> {
    None
}

/// Total memory in GB from `/proc/meminfo` content.
pub(crate) fn parse_meminfo(content: &str) -> Option<f64> {
    let line = content.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kb: f64 = line
        .trim_start_matches("MemTotal:")
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    Some(kb / (1024.0 * 1024.0))
}
