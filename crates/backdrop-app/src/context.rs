//! Everything a command needs: engine settings, storage and the store.

use std::path::PathBuf;
use std::sync::Arc;

use backdrop_common::{BackdropError, EventBus};
use backdrop_config::storage::{KeyValueStore, CONFIG_KEY};
use backdrop_config::toml_loader;
use backdrop_config::{BackgroundStore, EngineSettings, FileStore, MemoryStore};
use backdrop_platform::MotionPreference;
use tracing::{info, warn};

use crate::cli::Args;

pub struct Session {
    pub settings: EngineSettings,
    pub storage: Arc<dyn KeyValueStore>,
    /// Directory behind `storage`; `None` when running on memory only.
    pub storage_dir: Option<PathBuf>,
    pub store: Arc<BackgroundStore>,
    pub events: EventBus,
}

impl Session {
    pub fn open(args: &Args) -> Result<Self, BackdropError> {
        let settings_path = match &args.settings {
            Some(path) => path.clone(),
            None => toml_loader::default_settings_path()?,
        };
        let settings = toml_loader::load_or_create(&settings_path).unwrap_or_else(|e| {
            warn!("settings load failed, using defaults: {e}");
            EngineSettings::default()
        });

        let storage_dir = match &args.storage {
            Some(dir) => Some(dir.clone()),
            None => backdrop_platform::storage_dir(&settings)
                .map_err(|e| warn!("no storage directory: {e}"))
                .ok(),
        }
        .and_then(|dir| match std::fs::create_dir_all(&dir) {
            Ok(()) => Some(dir),
            Err(e) => {
                warn!("cannot create {}: {e}", dir.display());
                None
            }
        });

        let storage: Arc<dyn KeyValueStore> = match &storage_dir {
            Some(dir) => {
                info!("using storage at {}", dir.display());
                Arc::new(FileStore::new(dir.clone()))
            }
            None => {
                warn!("storage unavailable, this session keeps state in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let events = EventBus::default();
        let store = Arc::new(BackgroundStore::open(storage.clone()).with_events(events.clone()));

        let motion = if args.reduced_motion {
            MotionPreference::new(true)
        } else {
            MotionPreference::from_env()
        };
        store.set_reduced_motion(motion.reduced());

        Ok(Self {
            settings,
            storage,
            storage_dir,
            store,
            events,
        })
    }

    /// File the current config is persisted to, when storage is on disk.
    pub fn config_file(&self) -> Option<PathBuf> {
        self.storage_dir
            .as_deref()
            .map(|dir| FileStore::new(dir).path_for(CONFIG_KEY))
    }
}
