use crate::input::{InputEvent, InputState};
use crate::paint::Color;
use crate::render::{GraphicsApi, RenderSurface};
use crate::scene::{Scene, SceneCtx, SceneError, SceneRegistry, SceneSelector};
use crate::time::{Clock, FrameClock, FrameTime, SystemClock};

use super::{AppConfig, LoopPhase};

struct ActiveScene {
    selector: SceneSelector,
    scene: Box<dyn Scene>,
}

/// Frame loop state: active scene, input context, and frame timing.
///
/// A scene is only installed after its `init` succeeded, so `update` can
/// never reach an uninitialized scene.
pub struct Application<C: Clock = SystemClock> {
    config: AppConfig,
    registry: SceneRegistry,
    active: Option<ActiveScene>,
    input: InputState,
    clock: FrameClock<C>,

    /// Duration of the previous iteration; `None` until one has completed.
    dt: Option<f32>,
    phase: LoopPhase,
}

impl Application<SystemClock> {
    pub fn new(config: AppConfig, registry: SceneRegistry) -> Self {
        Self::with_clock(config, registry, SystemClock::new())
    }
}

impl<C: Clock> Application<C> {
    pub fn with_clock(config: AppConfig, registry: SceneRegistry, clock: C) -> Self {
        Self {
            config,
            registry,
            active: None,
            input: InputState::default(),
            clock: FrameClock::with_clock(clock),
            dt: None,
            phase: LoopPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn clear_color(&self) -> Color {
        self.config.clear_color
    }

    /// Sets the clear color; channels are clamped to `[0, 1]`.
    pub fn set_clear_color(&mut self, color: Color) {
        self.config.clear_color = color.clamped();
    }

    /// Selector of the active scene, if any.
    pub fn active_scene(&self) -> Option<SceneSelector> {
        self.active.as_ref().map(|a| a.selector)
    }

    /// Number of completed frames.
    pub fn frame_index(&self) -> u64 {
        self.clock.frame_index()
    }

    pub fn should_close(&self) -> bool {
        self.phase >= LoopPhase::ShuttingDown
    }

    /// Marks the start of surface/context creation.
    pub fn begin_init(&mut self) {
        if self.phase != LoopPhase::NotStarted {
            log::warn!("begin_init called while {}", self.phase);
            return;
        }
        self.phase = LoopPhase::Initializing;
        log::info!("initializing");
    }

    /// Activates the initial scene and enters the running phase.
    ///
    /// On error the application moves to `ShuttingDown`; the caller is
    /// expected to abort.
    pub fn start(&mut self, gfx: &mut dyn GraphicsApi) -> Result<(), SceneError> {
        if self.phase == LoopPhase::NotStarted {
            self.begin_init();
        }
        if self.phase != LoopPhase::Initializing {
            log::warn!("start called while {}", self.phase);
            return Ok(());
        }

        if let Err(err) = self.change_scene(self.config.initial_scene, gfx) {
            self.phase = LoopPhase::ShuttingDown;
            return Err(err);
        }

        self.clock.reset();
        self.dt = None;
        self.phase = LoopPhase::Running;
        log::info!("running");
        Ok(())
    }

    /// Builds, initializes and installs the scene for `selector`.
    ///
    /// On any error the previously active scene stays installed. A replaced
    /// scene is dropped; GPU resources it created are not released.
    pub fn change_scene(
        &mut self,
        selector: SceneSelector,
        gfx: &mut dyn GraphicsApi,
    ) -> Result<(), SceneError> {
        let mut scene = self.registry.create(selector).inspect_err(|err| {
            log::error!("cannot change scene: {err}");
        })?;

        if let Err(err) = scene.init(gfx) {
            log::error!("scene {selector} ({}) failed to initialize: {err}", scene.name());
            return Err(err);
        }

        log::info!("scene {selector} ({}) active", scene.name());
        if let Some(prev) = self.active.replace(ActiveScene { selector, scene }) {
            log::debug!("scene {} replaced", prev.selector);
        }
        Ok(())
    }

    /// Routes a device event into the input context.
    pub fn handle_input(&mut self, ev: InputEvent) {
        self.input.apply_event(ev);
    }

    /// Runs one loop iteration: clear, update, present, close the input frame,
    /// measure `dt`.
    ///
    /// The first iteration after `start` does not update the scene because no
    /// frame duration is known yet. Does nothing outside `Running`.
    pub fn frame<G>(&mut self, gfx: &mut G)
    where
        G: RenderSurface + GraphicsApi,
    {
        if !self.phase.is_running() {
            log::trace!("frame skipped while {}", self.phase);
            return;
        }

        gfx.clear(self.config.clear_color);

        if let (Some(dt), Some(active)) = (self.dt, self.active.as_mut()) {
            let mut ctx = SceneCtx {
                time: FrameTime {
                    dt,
                    frame_index: self.clock.frame_index(),
                },
                input: &self.input,
                gfx: &mut *gfx,
            };
            active.scene.update(&mut ctx);
        }

        gfx.present();
        self.input.end_frame();
        self.dt = Some(self.clock.tick().dt);
    }

    /// Requests shutdown; the runtime tears down the surface next.
    pub fn request_close(&mut self) {
        if matches!(self.phase, LoopPhase::Initializing | LoopPhase::Running) {
            log::info!("close requested");
            self.phase = LoopPhase::ShuttingDown;
        }
    }

    /// Final transition after the surface and event loop are gone.
    pub fn finish(&mut self) {
        self.active = None;
        self.phase = LoopPhase::Terminated;
        log::info!("terminated");
    }
}
