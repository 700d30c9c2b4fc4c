//! Verdict caching in persistent storage.

use backdrop_common::{CapabilityVerdict, StorageError};
use backdrop_config::storage::{KeyValueStore, CAPABILITY_KEY};
use tracing::{info, warn};

use super::clock::FrameClock;
use super::prober::CapabilityProber;
use super::signals::DeviceSignals;

/// The cached verdict, if one is stored and readable.
pub fn cached_capability(storage: &dyn KeyValueStore) -> Option<CapabilityVerdict> {
    match storage.get(CAPABILITY_KEY) {
        Ok(Some(raw)) => {
            let verdict = CapabilityVerdict::from_storage_str(&raw);
            if verdict.is_none() {
                warn!("ignoring unrecognised cached capability {raw:?}");
            }
            verdict
        }
        Ok(None) => None,
        Err(e) => {
            warn!("failed to read cached capability: {e}");
            None
        }
    }
}

/// Use the cached verdict, or probe and cache a new one.
pub fn resolve_capability(
    storage: &dyn KeyValueStore,
    prober: &mut CapabilityProber,
    signals: &DeviceSignals,
    clock: &mut dyn FrameClock,
) -> CapabilityVerdict {
    if let Some(verdict) = cached_capability(storage) {
        info!(%verdict, "using cached capability verdict");
        return verdict;
    }

    let verdict = prober.run(signals, clock);
    if let Err(e) = storage.set(CAPABILITY_KEY, verdict.as_storage_str()) {
        warn!("failed to cache capability verdict: {e}");
    }
    verdict
}

/// Forget the cached verdict so the next resolve probes again.
pub fn clear_capability(storage: &dyn KeyValueStore) -> Result<(), StorageError> {
    storage.remove(CAPABILITY_KEY)?;
    info!("cleared cached capability verdict");
    Ok(())
}
