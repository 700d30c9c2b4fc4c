//! One function per subcommand.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use backdrop_common::{BackdropError, CapabilityVerdict, Event, Viewport};
use backdrop_config::palette::AverageMethod;
use backdrop_config::storage::KeyValueStore;
use backdrop_config::{
    average_colors, config_to_json, resolve_palette, BackgroundStore, ResolvedPalette,
    StorageWatcher,
};
use backdrop_platform::capability::{clear_capability, ProbeReport};
use backdrop_platform::{resolve_capability, CapabilityProber, DeviceSignals, SystemFrameClock};
use backdrop_renderer::{
    export_png, render_effect, AnimationDriver, EffectState, FrameContext, Surface,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::cli::{Command, SetArgs};
use crate::context::Session;

pub async fn dispatch(session: Session, command: Command) -> Result<(), BackdropError> {
    match command {
        Command::Show => show(&session),
        Command::Set(args) => set(&session, &args),
        Command::Toggle => {
            session.store.toggle();
            show(&session)
        }
        Command::Probe { force, user_agent } => probe(&session, force, user_agent).await,
        Command::Render {
            out,
            time,
            width,
            height,
        } => render(&session, &out, time, width, height),
        Command::Run { seconds, out } => run(&session, seconds, out.as_deref()).await,
        Command::Average {
            method,
            include_background,
        } => average(&session, method, include_background),
    }
}

fn show(session: &Session) -> Result<(), BackdropError> {
    println!("{}", config_to_json(&session.store.get()));
    Ok(())
}

fn set(session: &Session, args: &SetArgs) -> Result<(), BackdropError> {
    let patch = args.to_patch();
    if patch.is_empty() {
        return Err(BackdropError::Other("nothing to set".into()));
    }
    session.store.update(&patch);
    show(session)
}

/// Resolve the verdict on a blocking thread; the warm-up sleeps between
/// frames. The report is `None` when the verdict came from the cache.
async fn probe_verdict(
    session: &Session,
    user_agent: Option<String>,
) -> Result<(CapabilityVerdict, Option<ProbeReport>), BackdropError> {
    let storage: Arc<dyn KeyValueStore> = session.storage.clone();
    let thresholds = session.settings.capability.clone();
    tokio::task::spawn_blocking(move || {
        let signals = DeviceSignals::detect(user_agent.as_deref());
        let mut prober = CapabilityProber::new(thresholds);
        let mut clock = SystemFrameClock::default();
        let verdict = resolve_capability(storage.as_ref(), &mut prober, &signals, &mut clock);
        (verdict, prober.report().cloned())
    })
    .await
    .map_err(|e| BackdropError::Other(format!("capability probe failed: {e}")))
}

/// Write a freshly derived verdict into the config. A cached verdict was
/// applied when it was first derived and is not re-applied over the
/// user's later choices.
fn apply_verdict(
    store: &BackgroundStore,
    verdict: &CapabilityVerdict,
    report: Option<&ProbeReport>,
) -> bool {
    if report.is_none() {
        debug!(%verdict, "cached capability verdict, config left as is");
        return false;
    }
    store.record_capability(verdict);
    true
}

async fn probe(
    session: &Session,
    force: bool,
    user_agent: Option<String>,
) -> Result<(), BackdropError> {
    if force {
        clear_capability(session.storage.as_ref())?;
    }
    let (verdict, report) = probe_verdict(session, user_agent).await?;
    match &report {
        Some(report) => println!(
            "{}",
            serde_json::to_string_pretty(report)
                .map_err(|e| BackdropError::Other(e.to_string()))?
        ),
        None => println!("{verdict} (cached)"),
    }
    apply_verdict(&session.store, &verdict, report.as_ref());
    Ok(())
}

fn render(
    session: &Session,
    out: &Path,
    time: f64,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<(), BackdropError> {
    let display = &session.settings.display;
    let config = session.store.get();
    if config.effect.is_none() {
        warn!("effect is none, writing a transparent frame");
    }
    let palette = ResolvedPalette::resolve(config.color_mode, &config.custom_color, display.dark_mode);
    let mut surface = Surface::new(
        width.unwrap_or(display.width),
        height.unwrap_or(display.height),
    )?;
    let mut effects = EffectState::new();
    render_effect(
        &mut surface,
        &mut effects,
        &FrameContext::new(&config, &palette, time),
    )?;
    export_png(&surface, config.opacity, out)?;
    println!("{}", out.display());
    Ok(())
}

async fn run(
    session: &Session,
    seconds: Option<f64>,
    out: Option<&Path>,
) -> Result<(), BackdropError> {
    let (verdict, report) = probe_verdict(session, None).await?;
    apply_verdict(&session.store, &verdict, report.as_ref());

    let mut tasks = Vec::new();

    match session.config_file() {
        Some(path) => {
            let watcher = StorageWatcher::new(path)?;
            let (changed_tx, mut changed_rx) = broadcast::channel::<()>(8);
            tasks.push(tokio::spawn(async move {
                if let Err(e) = watcher.watch(changed_tx).await {
                    warn!("storage watcher stopped: {e}");
                }
            }));
            let store = session.store.clone();
            tasks.push(tokio::spawn(async move {
                while changed_rx.recv().await.is_ok() {
                    store.reload_from_storage();
                }
            }));
        }
        None => debug!("in-memory storage, not watching for external changes"),
    }

    let mut events = session.events.subscribe();
    tasks.push(tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(Event::FpsMeasured(fps)) => info!(fps, "frame rate"),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }));

    let display = &session.settings.display;
    let mut driver = AnimationDriver::new(
        session.store.subscribe(),
        session.events.clone(),
        Viewport::new(display.width, display.height),
        session.settings.driver.clone(),
        display.dark_mode,
    )?;

    let shutdown = driver.shutdown_token();
    tasks.push(tokio::spawn(async move {
        let deadline = async {
            match seconds {
                Some(s) if s.is_finite() && s > 0.0 => {
                    tokio::time::sleep(Duration::from_secs_f64(s)).await
                }
                _ => std::future::pending().await,
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("interrupted"),
            _ = deadline => info!("run time elapsed"),
        }
        shutdown.cancel();
    }));

    info!("animation loop starting");
    driver.serve(&mut SystemFrameClock::default()).await;
    info!(
        frames = driver.frames_drawn(),
        average_draw_ms = driver.average_draw_ms(),
        "animation loop stopped"
    );
    session.events.publish(Event::Shutdown);

    for task in tasks {
        task.abort();
    }

    if let Some(path) = out {
        export_png(driver.surface(), driver.config().opacity, path)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn average(
    session: &Session,
    method: AverageMethod,
    include_background: bool,
) -> Result<(), BackdropError> {
    let config = session.store.get();
    let palette = resolve_palette(
        config.color_mode,
        &config.custom_color,
        session.settings.display.dark_mode,
    );
    println!("{}", average_colors(&palette, method, include_background));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use backdrop_config::storage::CAPABILITY_KEY;
    use backdrop_config::{ConfigPatch, EffectType, MemoryStore};
    use clap::Parser;

    fn session(dir: &Path, extra: &[&str]) -> (Session, Command) {
        let settings = dir.join("settings.toml");
        let storage = dir.join("state");
        let mut argv = vec![
            "backdrop".to_string(),
            "--settings".into(),
            settings.display().to_string(),
            "--storage".into(),
            storage.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        let args = Args::try_parse_from(argv).unwrap();
        (Session::open(&args).unwrap(), args.command)
    }

    #[tokio::test]
    async fn set_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let (s, cmd) = session(dir.path(), &["set", "--effect", "circuit", "--opacity", "0.4"]);
        dispatch(s, cmd).await.unwrap();

        let (s, _) = session(dir.path(), &["show"]);
        let config = s.store.get();
        assert_eq!(config.effect, EffectType::Circuit);
        assert_eq!(config.opacity, 0.4);
        assert!(dir.path().join("settings.toml").exists());
    }

    #[tokio::test]
    async fn empty_set_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (s, cmd) = session(dir.path(), &["set"]);
        assert!(dispatch(s, cmd).await.is_err());
    }

    #[tokio::test]
    async fn toggle_off_and_back_on() {
        let dir = tempfile::tempdir().unwrap();
        let (s, cmd) = session(dir.path(), &["set", "--effect", "psychedelic"]);
        dispatch(s, cmd).await.unwrap();

        let (s, cmd) = session(dir.path(), &["toggle"]);
        dispatch(s, cmd).await.unwrap();
        let (s, cmd) = session(dir.path(), &["toggle"]);
        assert_eq!(s.store.get().effect, EffectType::None);
        dispatch(s, cmd).await.unwrap();

        let (s, _) = session(dir.path(), &["show"]);
        assert_eq!(s.store.get().effect, EffectType::Psychedelic);
    }

    #[tokio::test]
    async fn render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frame.png");
        let out_arg = out.display().to_string();
        let (s, cmd) = session(
            dir.path(),
            &["render", "--out", &out_arg, "--width", "64", "--height", "48", "--time", "2"],
        );
        dispatch(s, cmd).await.unwrap();
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }

    #[tokio::test]
    async fn reduced_motion_flag_stops_animation() {
        let dir = tempfile::tempdir().unwrap();
        let (s, _) = session(dir.path(), &["--reduced-motion", "show"]);
        assert!(s.store.reduced_motion());
        assert!(!s.store.get().is_animated);
    }

    #[test]
    fn only_fresh_verdicts_touch_the_config() {
        let store = BackgroundStore::open(Arc::new(MemoryStore::new()));
        store.update(&ConfigPatch::animated(false));

        assert!(!apply_verdict(&store, &CapabilityVerdict::Animate, None));
        assert!(!store.get().is_animated);

        let report = ProbeReport {
            static_score: 9,
            warmup_fps: 60.0,
            fps_bonus: 2,
            verdict: CapabilityVerdict::Animate,
        };
        assert!(apply_verdict(&store, &CapabilityVerdict::Animate, Some(&report)));
        assert!(store.get().is_animated);
    }

    #[tokio::test]
    async fn cached_verdict_does_not_override_user_choice() {
        let dir = tempfile::tempdir().unwrap();
        let (s, cmd) = session(dir.path(), &["set", "--animated", "false"]);
        dispatch(s, cmd).await.unwrap();

        let (s, cmd) = session(dir.path(), &["probe"]);
        s.storage.set(CAPABILITY_KEY, "on").unwrap();
        dispatch(s, cmd).await.unwrap();

        let (s, _) = session(dir.path(), &["show"]);
        assert!(!s.store.get().is_animated);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn run_with_cached_verdict_keeps_user_choice() {
        let dir = tempfile::tempdir().unwrap();
        let (s, cmd) = session(dir.path(), &["set", "--animated", "false"]);
        dispatch(s, cmd).await.unwrap();

        let (s, cmd) = session(dir.path(), &["run", "--seconds", "0.2"]);
        s.storage.set(CAPABILITY_KEY, "on").unwrap();
        tokio::time::timeout(Duration::from_secs(10), dispatch(s, cmd))
            .await
            .unwrap()
            .unwrap();

        let (s, _) = session(dir.path(), &["show"]);
        assert!(!s.store.get().is_animated);
    }

    #[tokio::test]
    async fn unusable_storage_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let args = Args::try_parse_from([
            "backdrop".to_string(),
            "--settings".into(),
            dir.path().join("settings.toml").display().to_string(),
            "--storage".into(),
            blocker.join("state").display().to_string(),
            "set".into(),
            "--effect".into(),
            "vortex".into(),
        ])
        .unwrap();

        let s = Session::open(&args).unwrap();
        assert!(s.storage_dir.is_none());
        assert!(s.config_file().is_none());
        let store = s.store.clone();
        dispatch(s, args.command).await.unwrap();
        assert_eq!(store.get().effect, EffectType::Vortex);
    }
}
