//! Scene abstraction.
//!
//! A scene is a swappable unit of per-frame behavior that owns its GPU
//! resources. The application keeps at most one active scene and drives it
//! through exactly two hooks:
//! - `init` once, when the scene is activated
//! - `update` once per frame afterwards
//!
//! Scenes are built by a `SceneRegistry` from a `SceneSelector`.

mod error;
mod registry;
mod selector;

pub use error::SceneError;
pub use registry::{SceneFactory, SceneRegistry};
pub use selector::SceneSelector;

use crate::input::InputState;
use crate::render::GraphicsApi;
use crate::time::FrameTime;

/// Per-frame context handed to `Scene::update`.
pub struct SceneCtx<'a> {
    pub time: FrameTime,
    pub input: &'a InputState,
    pub gfx: &'a mut dyn GraphicsApi,
}

impl SceneCtx<'_> {
    /// Seconds since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }
}

/// Scene lifecycle contract.
pub trait Scene {
    /// One-time setup (shader programs, static geometry).
    ///
    /// Called exactly once, before the first `update`. An error keeps the
    /// scene from being activated.
    fn init(&mut self, gfx: &mut dyn GraphicsApi) -> Result<(), SceneError>;

    /// Per-frame logic and draw submission.
    fn update(&mut self, ctx: &mut SceneCtx<'_>);

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "scene"
    }
}
