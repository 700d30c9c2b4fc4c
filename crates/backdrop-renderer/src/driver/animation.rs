use std::time::Instant;

use backdrop_common::{Event, EventBus, Rect, RenderError, Viewport};
use backdrop_config::{BackgroundConfig, DriverSettings, FpsSource, ResolvedPalette};
use backdrop_platform::FrameClock;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{DriverState, FrameOutcome};
use crate::canvas::Surface;
use crate::effects::{render_effect, EffectState, FrameContext};
use crate::perf::{DrawTimer, FpsMeter};

/// Owns the surface and the loop that paints it.
///
/// The config snapshot is re-read from the store's watch channel at the top
/// of every tick. A change of effect or of `is_animated` re-activates the
/// driver; other changes are simply picked up by the next draw.
pub struct AnimationDriver {
    surface: Surface,
    effects: EffectState,
    config_rx: watch::Receiver<BackgroundConfig>,
    config: BackgroundConfig,
    palette: ResolvedPalette,
    dark_mode: bool,
    settings: DriverSettings,
    meter: FpsMeter,
    draw_timer: DrawTimer,
    events: EventBus,
    viewport: Viewport,
    canvas_rect: Rect,
    shutdown: CancellationToken,
    cancel: CancellationToken,
    state: DriverState,
    started_at: Option<f64>,
    last_drawn: Option<f64>,
    frames_drawn: u64,
}

impl AnimationDriver {
    pub fn new(
        mut config_rx: watch::Receiver<BackgroundConfig>,
        events: EventBus,
        viewport: Viewport,
        settings: DriverSettings,
        dark_mode: bool,
    ) -> Result<Self, RenderError> {
        let surface = Surface::new(viewport.width, viewport.height)?;
        let config = config_rx.borrow_and_update().clone();
        let palette = ResolvedPalette::resolve(config.color_mode, &config.custom_color, dark_mode);
        let shutdown = CancellationToken::new();
        let cancel = shutdown.child_token();
        Ok(Self {
            surface,
            effects: EffectState::new(),
            config_rx,
            config,
            palette,
            dark_mode,
            meter: FpsMeter::new(settings.fps_window_ms),
            settings,
            draw_timer: DrawTimer::new(),
            events,
            viewport,
            canvas_rect: viewport.rect(),
            shutdown,
            cancel,
            state: DriverState::Stopped,
            started_at: None,
            last_drawn: None,
            frames_drawn: 0,
        })
    }

    /// Replace the generator state, e.g. with a seeded one.
    pub fn with_effect_state(mut self, effects: EffectState) -> Self {
        self.effects = effects;
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn effect_state(&self) -> &EffectState {
        &self.effects
    }

    /// Snapshot used for the last tick.
    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn last_fps(&self) -> Option<u32> {
        self.meter.last_fps()
    }

    pub fn average_draw_ms(&self) -> f64 {
        self.draw_timer.average_ms()
    }

    /// Token that stops [`serve`](Self::serve) and any running loop when
    /// cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Start from the current config: cancel any pending loop, resize the
    /// canvas to the viewport, then draw one static frame or mark the loop
    /// as running.
    pub fn activate(&mut self) {
        self.cancel.cancel();
        self.cancel = self.shutdown.child_token();
        self.sync_config();

        if let Err(e) = self.surface.resize(self.viewport.width, self.viewport.height) {
            warn!("canvas resize failed: {e}");
        }
        self.canvas_rect = self.viewport.rect();
        self.meter.reset();
        self.started_at = None;
        self.last_drawn = None;

        if !self.config.is_active() {
            self.state = DriverState::Stopped;
            info!("background disabled, driver stopped");
        } else if !self.config.is_animated {
            self.draw(0.0);
            self.state = DriverState::StaticFrame;
            info!(effect = %self.config.effect, "static frame drawn");
        } else {
            self.state = DriverState::Running;
            info!(effect = %self.config.effect, "animation started");
        }
    }

    /// Handle one scheduled tick at `timestamp_ms`.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameOutcome {
        if self.cancel.is_cancelled() {
            self.state = DriverState::Stopped;
        }
        if self.state != DriverState::Running {
            return FrameOutcome::Stopped;
        }
        if self.config_rx.has_changed().unwrap_or(false) && self.sync_config() {
            debug!("effect or animation flag changed, re-activating");
            self.activate();
            if self.state != DriverState::Running {
                return FrameOutcome::Stopped;
            }
        }

        let every_tick = self.settings.fps_source == FpsSource::Schedule;
        let started = *self.started_at.get_or_insert(timestamp_ms);

        if let Some(last) = self.last_drawn {
            if timestamp_ms - last < self.settings.frame_budget_ms {
                self.tick_meter(timestamp_ms, every_tick);
                return FrameOutcome::Throttled;
            }
        }
        if !self.canvas_rect.intersects(&self.viewport.rect()) {
            self.tick_meter(timestamp_ms, every_tick);
            return FrameOutcome::Hidden;
        }

        self.draw((timestamp_ms - started) / 1000.0);
        self.last_drawn = Some(timestamp_ms);
        self.tick_meter(timestamp_ms, true);
        FrameOutcome::Drawn
    }

    /// Stop scheduling. A frame already drawn stays on the surface.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if self.state != DriverState::Stopped {
            info!("animation cancelled");
        }
        self.state = DriverState::Stopped;
    }

    /// Follow a viewport resize. Destructive: the canvas is cleared and
    /// repainted on the next frame, or immediately when showing a static
    /// frame.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.surface.resize(width, height)?;
        self.viewport = Viewport::new(width, height);
        self.canvas_rect = self.viewport.rect();
        debug!(width, height, "canvas resized");
        if self.state == DriverState::StaticFrame {
            self.draw(0.0);
        }
        Ok(())
    }

    /// Where the canvas currently sits relative to the viewport.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Swap in a brand new canvas. Particle state tied to the old one is
    /// discarded.
    pub fn replace_surface(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.surface = Surface::new(width, height)?;
        self.effects.reset();
        self.viewport = Viewport::new(width, height);
        self.canvas_rect = self.viewport.rect();
        info!(surface = %self.surface.id(), "canvas replaced");
        if self.state == DriverState::StaticFrame {
            self.draw(0.0);
        }
        Ok(())
    }

    /// Drive frames from `clock` until cancelled or until the driver stops
    /// running.
    pub async fn run(&mut self, clock: &mut dyn FrameClock) {
        while self.state == DriverState::Running {
            let token = self.cancel.clone();
            tokio::select! {
                _ = token.cancelled() => {
                    self.cancel();
                    break;
                }
                _ = tokio::time::sleep(clock.until_next()) => {
                    let timestamp = clock.next_frame();
                    self.on_frame(timestamp);
                }
            }
        }
    }

    /// Activate, then keep running across config changes until the
    /// shutdown token fires or the config channel closes.
    pub async fn serve(&mut self, clock: &mut dyn FrameClock) {
        self.activate();
        while !self.shutdown.is_cancelled() {
            if self.state == DriverState::Running {
                self.run(clock).await;
                continue;
            }
            let shutdown = self.shutdown.clone();
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = self.config_rx.changed() => {
                    if changed.is_err() {
                        debug!("config channel closed");
                        break;
                    }
                    self.activate();
                }
            }
        }
        self.cancel();
    }

    /// Pull the latest config. True when the effect or the animation flag
    /// changed.
    fn sync_config(&mut self) -> bool {
        let next = self.config_rx.borrow_and_update().clone();
        if next == self.config {
            return false;
        }
        let restart =
            next.effect != self.config.effect || next.is_animated != self.config.is_animated;
        if next.color_mode != self.config.color_mode || next.custom_color != self.config.custom_color
        {
            self.palette =
                ResolvedPalette::resolve(next.color_mode, &next.custom_color, self.dark_mode);
        }
        self.config = next;
        restart
    }

    fn draw(&mut self, elapsed: f64) {
        let began = Instant::now();
        self.surface.clear();
        let ctx = FrameContext::new(&self.config, &self.palette, elapsed);
        if let Err(e) = render_effect(&mut self.surface, &mut self.effects, &ctx) {
            warn!(effect = %self.config.effect, "frame render failed: {e}");
        }
        self.draw_timer.record(began.elapsed());
        self.frames_drawn += 1;
    }

    fn tick_meter(&mut self, timestamp_ms: f64, counted: bool) {
        if let Some(fps) = self.meter.record(timestamp_ms, counted) {
            debug!(fps, "fps measured");
            self.events.publish(Event::FpsMeasured(fps));
        }
    }
}
