use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{Application, LoopPhase};
use crate::device::GpuInit;
use crate::input::platform::winit::translate_window_event;
use crate::render::Graphics;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,

    /// Pace presentation to the display refresh.
    pub vsync: bool,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(1920.0, 1080.0),
            resizable: true,
            vsync: true,
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs the frame loop until the window closes, and
    /// tears everything down.
    ///
    /// Fatal startup errors (window, GPU, initial scene) are returned after
    /// the event loop has exited.
    pub fn run(config: RuntimeConfig, app: Application) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, app);

        let result = event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error");

        state.app.finish();
        result?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gfx: Graphics<'this>,
}

struct RuntimeState {
    config: RuntimeConfig,
    app: Application,

    /// Present between a successful startup and shutdown.
    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl RuntimeState {
    fn new(config: RuntimeConfig, app: Application) -> Self {
        Self {
            config,
            app,
            entry: None,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        // Hidden until the first scene is ready.
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable)
            .with_visible(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu.clone().with_vsync(self.config.vsync);

        let mut entry = WindowEntryTryBuilder {
            window,
            gfx_builder: |w| {
                pollster::block_on(Graphics::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()?;

        let app = &mut self.app;
        entry
            .with_gfx_mut(|gfx| app.start(gfx))
            .context("failed to activate initial scene")?;

        entry.with_window(|w| {
            w.set_visible(true);
            w.request_redraw();
        });
        Ok(entry)
    }

    /// Drops graphics and window (destroying the surface) and leaves the loop.
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.app.request_close();
        if self.entry.take().is_some() {
            log::info!("window closed");
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.shut_down(event_loop);
    }
}

impl ApplicationHandler for RuntimeState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.phase() != LoopPhase::NotStarted {
            return;
        }

        self.app.begin_init();
        match self.create_window_entry(event_loop) {
            Ok(entry) => self.entry = Some(entry),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.should_close() {
            event_loop.exit();
            return;
        }

        // Continuous redraw: one loop iteration per event-loop pass.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(ev) = entry.with_window(|w| translate_window_event(w, &event)) {
            self.app.handle_input(ev);
        }

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gfx_mut(|gfx| gfx.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gfx_mut(|gfx| gfx.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                entry.with_gfx_mut(|gfx| app.frame(gfx));

                if entry.with_gfx(|gfx| gfx.is_lost()) {
                    log::error!("surface lost; shutting down");
                    self.shut_down(event_loop);
                }
            }

            _ => {}
        }
    }
}
