//! [`BackgroundStore`] implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use backdrop_common::{CapabilityVerdict, Event, EventBus};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::motion::effective;
use crate::schema::{BackgroundConfig, ConfigPatch, EffectType};
use crate::storage::{self, KeyValueStore, CONFIG_KEY, LAST_WALLPAPER_KEY};

#[derive(Debug)]
struct StoreState {
    /// The user's own config. This is what gets persisted.
    user: BackgroundConfig,
    reduced: bool,
    last_wallpaper: Option<BackgroundConfig>,
}

/// Process-wide owner of the current [`BackgroundConfig`].
///
/// Mutations are serialized by an internal lock. Storage failures never
/// fail a mutation: the in-memory state always changes and the error is
/// logged.
///
/// Storage holds the user's choices. The published snapshot additionally
/// has the reduced-motion override applied, which is never persisted.
pub struct BackgroundStore {
    storage: Arc<dyn KeyValueStore>,
    tx: watch::Sender<BackgroundConfig>,
    state: Mutex<StoreState>,
    events: Option<EventBus>,
}

impl BackgroundStore {
    /// Restore the persisted config, or start from the default.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let config = match storage::load_config(storage.as_ref(), CONFIG_KEY) {
            Some(config) => {
                info!(effect = %config.effect, "restored background config");
                config
            }
            None => {
                info!("no stored background config, using defaults");
                BackgroundConfig::default_config()
            }
        };
        let last_wallpaper = storage::load_config(storage.as_ref(), LAST_WALLPAPER_KEY);
        let (tx, _rx) = watch::channel(config.clone());

        Self {
            storage,
            tx,
            state: Mutex::new(StoreState {
                user: config,
                reduced: false,
                last_wallpaper,
            }),
            events: None,
        }
    }

    /// Publish `Event::ConfigChanged` / `MotionPreferenceChanged` on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Current snapshot, with the reduced-motion override applied.
    pub fn get(&self) -> BackgroundConfig {
        self.tx.borrow().clone()
    }

    /// Receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<BackgroundConfig> {
        self.tx.subscribe()
    }

    /// Last config whose effect was not `none`, if any.
    pub fn last_wallpaper(&self) -> Option<BackgroundConfig> {
        self.lock().last_wallpaper.clone()
    }

    /// The user's config as persisted, without the reduced-motion override.
    pub fn user_config(&self) -> BackgroundConfig {
        self.lock().user.clone()
    }

    pub fn reduced_motion(&self) -> bool {
        self.lock().reduced
    }

    /// Merge `patch` into the current config and persist the result.
    pub fn update(&self, patch: &ConfigPatch) {
        let mut state = self.lock();
        let mut config = state.user.clone();
        config.apply(patch);
        self.commit(&mut state, config);
    }

    /// Switch between `none` and the last active wallpaper.
    pub fn toggle(&self) {
        let mut state = self.lock();
        let current = state.user.clone();

        let next = if current.is_active() {
            self.backup(&mut state, &current);
            BackgroundConfig {
                effect: EffectType::None,
                ..current
            }
        } else {
            match state.last_wallpaper.clone() {
                Some(config) => config,
                None => {
                    debug!("no wallpaper backup, restoring defaults");
                    BackgroundConfig::default_config()
                }
            }
        };

        info!(effect = %next.effect, "background toggled");
        self.commit(&mut state, next);
    }

    /// Feed the reduced-motion signal. The rule forces `is_animated` off
    /// in the published snapshot while the signal is set and the effect is
    /// active. Storage is not written.
    pub fn set_reduced_motion(&self, reduced: bool) {
        let mut state = self.lock();
        if state.reduced == reduced {
            return;
        }
        state.reduced = reduced;
        info!(reduced, "reduced motion preference changed");
        if let Some(bus) = &self.events {
            bus.publish(Event::MotionPreferenceChanged(reduced));
        }

        let snapshot = effective(&state.user, reduced);
        if snapshot != *self.tx.borrow() {
            self.publish(snapshot);
        }
    }

    /// Track a live preference channel until its sender is dropped.
    pub async fn follow_motion_preference(&self, mut rx: watch::Receiver<bool>) {
        let initial = *rx.borrow_and_update();
        self.set_reduced_motion(initial);
        while rx.changed().await.is_ok() {
            let reduced = *rx.borrow_and_update();
            self.set_reduced_motion(reduced);
        }
        debug!("motion preference channel closed");
    }

    /// Re-read the persisted config, for changes written by another process.
    ///
    /// Returns true when the in-memory config changed. Nothing is written
    /// back to storage.
    pub fn reload_from_storage(&self) -> bool {
        let mut state = self.lock();
        if let Some(backup) = storage::load_config(self.storage.as_ref(), LAST_WALLPAPER_KEY) {
            state.last_wallpaper = Some(backup);
        }
        let Some(config) = storage::load_config(self.storage.as_ref(), CONFIG_KEY) else {
            return false;
        };
        if config == state.user {
            return false;
        }
        info!(effect = %config.effect, "background config reloaded from storage");
        self.publish(effective(&config, state.reduced));
        state.user = config;
        true
    }

    /// Apply a capability verdict to `is_animated`.
    ///
    /// While reduced motion is active the verdict only reaches the stored
    /// config, and shows in the snapshot once the signal clears.
    pub fn record_capability(&self, verdict: &CapabilityVerdict) {
        if let Some(bus) = &self.events {
            bus.publish(Event::CapabilityDecided {
                animate: verdict.animates(),
            });
        }
        if self.reduced_motion() {
            debug!(%verdict, "reduced motion active, verdict applies once it clears");
        }
        self.update(&ConfigPatch::animated(verdict.animates()));
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn backup(&self, state: &mut StoreState, config: &BackgroundConfig) {
        if let Err(e) = storage::save_config(self.storage.as_ref(), LAST_WALLPAPER_KEY, config) {
            warn!("failed to persist wallpaper backup: {e}");
        }
        state.last_wallpaper = Some(config.clone());
    }

    fn commit(&self, state: &mut StoreState, config: BackgroundConfig) {
        if let Err(e) = storage::save_config(self.storage.as_ref(), CONFIG_KEY, &config) {
            warn!("failed to persist background config: {e}");
        }
        if config.is_active() {
            self.backup(state, &config);
        }
        self.publish(effective(&config, state.reduced));
        state.user = config;
    }

    fn publish(&self, config: BackgroundConfig) {
        self.tx.send_replace(config);
        if let Some(bus) = &self.events {
            bus.publish(Event::ConfigChanged);
        }
    }
}
