use super::*;
use crate::schema::{BackgroundConfig, ColorMode, ConfigPatch, EffectType};
use crate::storage::{
    load_config, FileStore, KeyValueStore, MemoryStore, CONFIG_KEY, LAST_WALLPAPER_KEY,
};
use backdrop_common::{CapabilityVerdict, Event, EventBus, StorageError};
use std::sync::Arc;
use tokio::sync::watch;

/// Storage that fails every call.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read {
            key: key.into(),
            reason: "disk on fire".into(),
        })
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only".into()))
    }
    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only".into()))
    }
}

fn memory_store() -> (Arc<MemoryStore>, BackgroundStore) {
    let storage = Arc::new(MemoryStore::new());
    let store = BackgroundStore::open(storage.clone());
    (storage, store)
}

fn sample_configs() -> Vec<BackgroundConfig> {
    EffectType::GENERATORS
        .iter()
        .enumerate()
        .map(|(i, effect)| BackgroundConfig {
            effect: *effect,
            opacity: 0.2 + 0.1 * i as f64,
            animation_speed: 1.0 + i as f64,
            density: 1.0,
            color_mode: ColorMode::ALL[i * 2],
            custom_color: "#abcdef".into(),
            is_animated: i % 2 == 0,
        })
        .collect()
}

// -- open / get --

#[test]
fn open_empty_storage_uses_defaults() {
    let (_, store) = memory_store();
    assert_eq!(store.get(), BackgroundConfig::default_config());
    assert!(store.last_wallpaper().is_none());
}

#[test]
fn open_restores_persisted_config() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::new(dir.path()));
    {
        let store = BackgroundStore::open(storage.clone());
        store.update(&ConfigPatch::effect(EffectType::Psychedelic));
    }
    let reopened = BackgroundStore::open(storage);
    assert_eq!(reopened.get().effect, EffectType::Psychedelic);
}

// -- update --

#[test]
fn update_merges_and_persists() {
    let (storage, store) = memory_store();
    store.update(&ConfigPatch {
        opacity: Some(0.3),
        color_mode: Some(ColorMode::Aurora),
        ..Default::default()
    });

    let config = store.get();
    assert!((config.opacity - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.color_mode, ColorMode::Aurora);
    assert_eq!(load_config(storage.as_ref(), CONFIG_KEY), Some(config.clone()));
    assert_eq!(
        load_config(storage.as_ref(), LAST_WALLPAPER_KEY),
        Some(config)
    );
}

#[test]
fn update_to_none_does_not_overwrite_backup() {
    let (storage, store) = memory_store();
    store.update(&ConfigPatch::effect(EffectType::Circuit));
    store.update(&ConfigPatch::effect(EffectType::None));

    let backup = load_config(storage.as_ref(), LAST_WALLPAPER_KEY).unwrap();
    assert_eq!(backup.effect, EffectType::Circuit);
    assert_eq!(store.get().effect, EffectType::None);
}

#[test]
fn update_publishes_on_watch_channel() {
    let (_, store) = memory_store();
    let mut rx = store.subscribe();
    store.update(&ConfigPatch::effect(EffectType::Vortex));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().effect, EffectType::Vortex);
}

#[test]
fn storage_failure_keeps_in_memory_state() {
    let store = BackgroundStore::open(Arc::new(BrokenStore));
    assert_eq!(store.get(), BackgroundConfig::default_config());

    store.update(&ConfigPatch::effect(EffectType::Vortex));
    assert_eq!(store.get().effect, EffectType::Vortex);

    store.toggle();
    assert_eq!(store.get().effect, EffectType::None);
    store.toggle();
    assert_eq!(store.get().effect, EffectType::Vortex);
}

// -- toggle --

#[test]
fn toggle_round_trip_restores_exact_config() {
    for config in sample_configs() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(CONFIG_KEY, &serde_json::to_string(&config).unwrap())
            .unwrap();
        let store = BackgroundStore::open(storage);
        assert_eq!(store.get(), config);

        store.toggle();
        assert_eq!(store.get().effect, EffectType::None);
        store.toggle();
        assert_eq!(store.get(), config);
    }
}

#[test]
fn toggle_from_none_without_backup_uses_default() {
    let storage = Arc::new(MemoryStore::new());
    let mut stored = BackgroundConfig::default_config();
    stored.effect = EffectType::None;
    stored.opacity = 0.8;
    storage
        .set(CONFIG_KEY, &serde_json::to_string(&stored).unwrap())
        .unwrap();

    let store = BackgroundStore::open(storage);
    store.toggle();
    assert_eq!(store.get(), BackgroundConfig::default_config());
}

#[test]
fn toggle_restores_backup_written_by_another_instance() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::new(dir.path()));
    let first = BackgroundStore::open(storage.clone());
    first.update(&ConfigPatch::effect(EffectType::Circuit));
    first.toggle();

    let second = BackgroundStore::open(storage);
    assert_eq!(second.get().effect, EffectType::None);
    second.toggle();
    assert_eq!(second.get().effect, EffectType::Circuit);
}

// -- reduced motion --

#[test]
fn reduced_motion_forces_static_and_restores() {
    let (_, store) = memory_store();
    assert!(store.get().is_animated);

    store.set_reduced_motion(true);
    assert!(!store.get().is_animated);

    store.set_reduced_motion(false);
    assert!(store.get().is_animated);
}

#[test]
fn reduced_motion_restores_previous_false() {
    let (_, store) = memory_store();
    store.update(&ConfigPatch::animated(false));
    store.set_reduced_motion(true);
    store.set_reduced_motion(false);
    assert!(!store.get().is_animated);
}

#[test]
fn reduced_motion_reapplies_when_type_changes() {
    let (_, store) = memory_store();
    store.update(&ConfigPatch::effect(EffectType::None));
    store.set_reduced_motion(true);
    // Inactive effect is left alone.
    assert!(store.get().is_animated);

    store.update(&ConfigPatch::effect(EffectType::Hologram));
    assert!(!store.get().is_animated);

    store.toggle();
    store.toggle();
    assert!(!store.get().is_animated);

    store.set_reduced_motion(false);
    assert!(store.get().is_animated);
}

#[test]
fn explicit_animate_while_reduced_is_deferred() {
    let (_, store) = memory_store();
    store.update(&ConfigPatch::animated(false));
    store.set_reduced_motion(true);
    store.update(&ConfigPatch::animated(true));
    assert!(!store.get().is_animated);
    store.set_reduced_motion(false);
    assert!(store.get().is_animated);
}

#[test]
fn reduced_motion_is_never_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::new(dir.path()));
    {
        let store = BackgroundStore::open(storage.clone());
        store.update(&ConfigPatch::effect(EffectType::Vortex));
        store.set_reduced_motion(true);
        assert!(!store.get().is_animated);
        store.update(&ConfigPatch {
            density: Some(2.0),
            ..Default::default()
        });
        assert!(store.user_config().is_animated);
    }
    let stored = load_config(storage.as_ref(), CONFIG_KEY).unwrap();
    assert!(stored.is_animated);
    let backup = load_config(storage.as_ref(), LAST_WALLPAPER_KEY).unwrap();
    assert!(backup.is_animated);

    // Next session starts without the signal.
    let reopened = BackgroundStore::open(storage);
    assert!(reopened.get().is_animated);
    reopened.set_reduced_motion(false);
    assert!(reopened.get().is_animated);
    assert_eq!(reopened.get().density, 2.0);
}

#[test]
fn reduced_motion_in_new_session_still_clears() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::new(dir.path()));
    BackgroundStore::open(storage.clone()).set_reduced_motion(true);

    let reopened = BackgroundStore::open(storage);
    reopened.set_reduced_motion(true);
    assert!(!reopened.get().is_animated);
    reopened.set_reduced_motion(false);
    assert!(reopened.get().is_animated);
}

#[tokio::test]
async fn follows_motion_preference_channel() {
    let (_, store) = memory_store();
    let store = Arc::new(store);
    let (tx, rx) = watch::channel(false);

    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.follow_motion_preference(rx).await })
    };

    tx.send(true).unwrap();
    let mut configs = store.subscribe();
    tokio::time::timeout(std::time::Duration::from_secs(2), async {
        while configs.borrow_and_update().is_animated {
            configs.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
    assert!(store.reduced_motion());

    drop(tx);
    task.await.unwrap();
}

// -- capability --

#[test]
fn record_capability_sets_is_animated() {
    let (_, store) = memory_store();
    store.record_capability(&CapabilityVerdict::Static);
    assert!(!store.get().is_animated);
    store.record_capability(&CapabilityVerdict::Animate);
    assert!(store.get().is_animated);
}

#[test]
fn record_capability_deferred_under_reduced_motion() {
    let (_, store) = memory_store();
    store.set_reduced_motion(true);
    store.record_capability(&CapabilityVerdict::Static);
    assert!(!store.get().is_animated);
    store.set_reduced_motion(false);
    assert!(!store.get().is_animated);
}

// -- reload --

#[test]
fn reload_picks_up_external_write() {
    let (storage, store) = memory_store();
    let mut external = BackgroundConfig::default_config();
    external.effect = EffectType::Psychedelic;
    storage
        .set(CONFIG_KEY, &serde_json::to_string(&external).unwrap())
        .unwrap();

    assert!(store.reload_from_storage());
    assert_eq!(store.get(), external);
    assert!(!store.reload_from_storage());
}

#[test]
fn reload_with_nothing_stored_is_noop() {
    let (_, store) = memory_store();
    assert!(!store.reload_from_storage());
}

// -- events --

#[tokio::test]
async fn publishes_events_on_bus() {
    let bus = EventBus::new(16);
    let mut rx = bus.subscribe();
    let store = BackgroundStore::open(Arc::new(MemoryStore::new())).with_events(bus);

    store.set_reduced_motion(true);
    assert!(matches!(
        rx.recv().await.unwrap(),
        Event::MotionPreferenceChanged(true)
    ));
    assert!(matches!(rx.recv().await.unwrap(), Event::ConfigChanged));
}
