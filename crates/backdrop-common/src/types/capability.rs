use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether continuous animation is permitted on this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityVerdict {
    Animate,
    Static,
}

impl CapabilityVerdict {
    pub fn from_animate(animate: bool) -> Self {
        if animate {
            CapabilityVerdict::Animate
        } else {
            CapabilityVerdict::Static
        }
    }

    pub fn animates(&self) -> bool {
        matches!(self, CapabilityVerdict::Animate)
    }

    /// Persisted form: `"on"` or `"off"`.
    pub fn as_storage_str(&self) -> &'static str {
        match self {
            CapabilityVerdict::Animate => "on",
            CapabilityVerdict::Static => "off",
        }
    }

    /// Parse the persisted form. Anything else is treated as no cache.
    pub fn from_storage_str(s: &str) -> Option<Self> {
        match s.trim() {
            "on" => Some(CapabilityVerdict::Animate),
            "off" => Some(CapabilityVerdict::Static),
            _ => None,
        }
    }
}

impl fmt::Display for CapabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityVerdict::Animate => f.write_str("animate"),
            CapabilityVerdict::Static => f.write_str("static"),
        }
    }
}
