//! Tests for capability probing.

use super::*;
use backdrop_common::CapabilityVerdict;
use backdrop_config::schema::CapabilitySettings;
use backdrop_config::storage::{KeyValueStore, MemoryStore, CAPABILITY_KEY};

fn strong_signals() -> DeviceSignals {
    DeviceSignals {
        cores: Some(16),
        memory_gb: Some(32.0),
        form_factor: FormFactor::Desktop,
        gpu_available: true,
    }
}

fn weak_signals() -> DeviceSignals {
    DeviceSignals {
        cores: Some(2),
        memory_gb: Some(2.0),
        form_factor: FormFactor::Mobile,
        gpu_available: false,
    }
}

// -- form factor --

#[test]
fn form_factor_sniffing() {
    assert_eq!(FormFactor::from_user_agent(None), FormFactor::Desktop);
    assert_eq!(
        FormFactor::from_user_agent(Some(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148"
        )),
        FormFactor::Mobile
    );
    assert_eq!(
        FormFactor::from_user_agent(Some("Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)")),
        FormFactor::Tablet
    );
    assert_eq!(
        FormFactor::from_user_agent(Some(
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile Safari/537.36"
        )),
        FormFactor::Mobile
    );
    assert_eq!(
        FormFactor::from_user_agent(Some(
            "Mozilla/5.0 (Linux; Android 13; SM-X710) Chrome/120.0 Safari/537.36"
        )),
        FormFactor::Tablet
    );
    assert_eq!(
        FormFactor::from_user_agent(Some(
            "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/121.0"
        )),
        FormFactor::Desktop
    );
}

#[test]
fn parse_meminfo_total() {
    let content = "MemTotal:       16384000 kB\nMemFree:         1000 kB\n";
    let gb = signals::parse_meminfo(content).unwrap();
    assert!((gb - 15.625).abs() < 1e-9);
    assert!(signals::parse_meminfo("nothing here").is_none());
}

#[test]
fn detect_with_fixed_gpu() {
    let signals = DeviceSignals::detect_with(None, &FixedGpu(true));
    assert!(signals.gpu_available);
    assert_eq!(signals.form_factor, FormFactor::Desktop);
    assert!(signals.cores.unwrap_or(1) >= 1);
}

// -- static score --

#[test]
fn static_score_maxes_at_eight() {
    let settings = CapabilitySettings::default();
    assert_eq!(static_score(&strong_signals(), &settings), 8);
}

#[test]
fn static_score_partial_points() {
    let settings = CapabilitySettings::default();
    let signals = DeviceSignals {
        cores: Some(6),
        memory_gb: Some(4.0),
        form_factor: FormFactor::Tablet,
        gpu_available: false,
    };
    assert_eq!(static_score(&signals, &settings), 1 + 1 + 1);
}

#[test]
fn low_core_hosts_are_capped() {
    let settings = CapabilitySettings::default();
    let signals = DeviceSignals {
        cores: Some(4),
        ..strong_signals()
    };
    // gpu 2 + memory 2 + desktop 2 = 6, capped to 4
    assert_eq!(static_score(&signals, &settings), 4);
}

#[test]
fn unknown_memory_uses_default() {
    let settings = CapabilitySettings::default();
    let signals = DeviceSignals {
        memory_gb: None,
        ..strong_signals()
    };
    // default 4 GB gives +1 instead of +2
    assert_eq!(static_score(&signals, &settings), 7);
}

// -- fps bonus and decision --

#[test]
fn fps_bonus_thresholds() {
    let settings = CapabilitySettings::default();
    assert_eq!(fps_bonus(60.0, &settings), 2);
    assert_eq!(fps_bonus(59.0, &settings), 1);
    assert_eq!(fps_bonus(45.0, &settings), 1);
    assert_eq!(fps_bonus(44.0, &settings), 0);
}

#[test]
fn floor_overrides_any_score() {
    let settings = CapabilitySettings::default();
    for fps in [0.0, 5.0, 17.0, 17.9] {
        for score in 0..=8 {
            for gpu in [true, false] {
                assert_eq!(
                    decide(score, fps, gpu, &settings),
                    CapabilityVerdict::Static,
                    "score {score} fps {fps} gpu {gpu}"
                );
            }
        }
    }
}

#[test]
fn gpu_override_makes_capable() {
    let settings = CapabilitySettings::default();
    assert_eq!(decide(0, 36.0, true, &settings), CapabilityVerdict::Animate);
    assert_eq!(decide(0, 36.0, false, &settings), CapabilityVerdict::Static);
}

#[test]
fn total_score_threshold() {
    let settings = CapabilitySettings::default();
    assert_eq!(decide(6, 60.0, false, &settings), CapabilityVerdict::Animate);
    assert_eq!(decide(6, 45.0, false, &settings), CapabilityVerdict::Static);
    assert_eq!(decide(7, 45.0, false, &settings), CapabilityVerdict::Animate);
    assert_eq!(decide(8, 20.0, false, &settings), CapabilityVerdict::Animate);
}

#[test]
fn thresholds_are_configurable() {
    let settings = CapabilitySettings {
        floor_fps: 30.0,
        ..Default::default()
    };
    assert_eq!(decide(8, 25.0, true, &settings), CapabilityVerdict::Static);
}

#[test]
fn nan_fps_is_static() {
    let settings = CapabilitySettings::default();
    assert_eq!(decide(8, f64::NAN, true, &settings), CapabilityVerdict::Static);
}

// -- prober state machine --

#[test]
fn prober_walks_states_to_decided() {
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    assert_eq!(prober.state(), ProbeState::Idle);

    let mut clock = SimulatedClock::from_fps(60.0);
    let verdict = prober.run(&strong_signals(), &mut clock);
    assert_eq!(verdict, CapabilityVerdict::Animate);
    assert_eq!(prober.state(), ProbeState::Decided(CapabilityVerdict::Animate));

    let report = prober.report().unwrap();
    assert_eq!(report.static_score, 8);
    assert!((report.warmup_fps - 60.0).abs() < 1.0);
    assert_eq!(report.fps_bonus, 2);
}

#[test]
fn warm_up_runs_for_configured_duration() {
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::from_fps(50.0);
    prober.run(&weak_signals(), &mut clock);
    // start frame + ~50 frames over one second
    assert!((50..=53).contains(&clock.frames()), "{}", clock.frames());
}

#[test]
fn slow_warm_up_is_static_even_with_max_score() {
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::from_fps(15.0);
    assert_eq!(
        prober.run(&strong_signals(), &mut clock),
        CapabilityVerdict::Static
    );
}

#[test]
fn decided_prober_does_not_probe_again() {
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::from_fps(60.0);
    prober.run(&weak_signals(), &mut clock);
    let frames = clock.frames();
    prober.run(&strong_signals(), &mut clock);
    assert_eq!(clock.frames(), frames);
}

#[test]
fn stalled_clock_gives_static() {
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::new(0.0, 0.0);
    assert_eq!(
        prober.run(&strong_signals(), &mut clock),
        CapabilityVerdict::Static
    );
}

// -- cache --

#[test]
fn resolve_caches_verdict() {
    let storage = MemoryStore::new();
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::from_fps(60.0);

    let verdict = resolve_capability(&storage, &mut prober, &weak_signals(), &mut clock);
    assert_eq!(verdict, CapabilityVerdict::Static);
    assert_eq!(storage.get(CAPABILITY_KEY).unwrap().as_deref(), Some("off"));
}

#[test]
fn resolve_uses_cache_without_probing() {
    let storage = MemoryStore::new();
    storage.set(CAPABILITY_KEY, "on").unwrap();
    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::from_fps(10.0);

    let verdict = resolve_capability(&storage, &mut prober, &weak_signals(), &mut clock);
    assert_eq!(verdict, CapabilityVerdict::Animate);
    assert_eq!(clock.frames(), 0);
    assert_eq!(prober.state(), ProbeState::Idle);
}

#[test]
fn clear_then_resolve_probes_again() {
    let storage = MemoryStore::new();
    storage.set(CAPABILITY_KEY, "on").unwrap();
    clear_capability(&storage).unwrap();
    assert!(cached_capability(&storage).is_none());

    let mut prober = CapabilityProber::new(CapabilitySettings::default());
    let mut clock = SimulatedClock::from_fps(10.0);
    let verdict = resolve_capability(&storage, &mut prober, &strong_signals(), &mut clock);
    assert_eq!(verdict, CapabilityVerdict::Static);
    assert!(clock.frames() > 0);
}

#[test]
fn garbage_cache_value_is_ignored() {
    let storage = MemoryStore::new();
    storage.set(CAPABILITY_KEY, "yes please").unwrap();
    assert!(cached_capability(&storage).is_none());
}
