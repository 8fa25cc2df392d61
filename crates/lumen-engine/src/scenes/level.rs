use crate::render::GraphicsApi;
use crate::scene::{Scene, SceneCtx, SceneError};

/// Gameplay scene placeholder. Owns no GPU resources yet.
#[derive(Debug, Default)]
pub struct LevelScene {
    elapsed: f32,
    frames: u64,
}

impl LevelScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds accumulated over all updates.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Scene for LevelScene {
    fn init(&mut self, _gfx: &mut dyn GraphicsApi) -> Result<(), SceneError> {
        log::debug!("level scene ready");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneCtx<'_>) {
        self.elapsed += ctx.dt();
        self.frames += 1;
    }

    fn name(&self) -> &str {
        "level"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::render::testing::RecordingGraphics;
    use crate::time::FrameTime;

    #[test]
    fn accumulates_frame_time() {
        let mut scene = LevelScene::new();
        let mut gfx = RecordingGraphics::default();
        let input = InputState::default();
        scene.init(&mut gfx).unwrap();

        for i in 0..4 {
            let mut ctx = SceneCtx {
                time: FrameTime { dt: 0.25, frame_index: i },
                input: &input,
                gfx: &mut gfx,
            };
            scene.update(&mut ctx);
        }

        assert_eq!(scene.elapsed(), 1.0);
        assert_eq!(scene.frames(), 4);
        assert!(gfx.calls.is_empty());
    }
}
