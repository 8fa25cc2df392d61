use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};
use crate::input::MouseState;
use crate::render::{
    BufferHandle, BufferKind, DrawIndexed, GraphicsApi, Primitive, ProgramDesc, ProgramHandle,
    ShaderStage, VertexLayout,
};
use crate::scene::{Scene, SceneCtx, SceneError};

const VERTEX_SHADER: &str = include_str!("shaders/default.vert.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/default.frag.wgsl");

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 10.0;
const ZOOM_PER_LINE: f32 = 0.1;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}

const fn v(x: f32, y: f32, color: [f32; 4]) -> Vertex {
    Vertex { position: [x, y, 0.0], color }
}

const QUAD: [Vertex; 4] = [
    v(0.5, -0.5, [1.0, 0.0, 0.0, 1.0]),  // bottom right
    v(-0.5, 0.5, [0.0, 1.0, 0.0, 1.0]),  // top left
    v(0.5, 0.5, [0.0, 0.0, 1.0, 1.0]),   // top right
    v(-0.5, -0.5, [1.0, 1.0, 0.0, 1.0]), // bottom left
];

// Counter-clockwise winding.
const INDICES: [u32; 6] = [2, 1, 0, 0, 1, 3];

struct Resources {
    program: ProgramHandle,
    vertices: BufferHandle,
    indices: BufferHandle,
}

/// Editor scene: a colored quad the user can pan (drag) and zoom (scroll).
pub struct EditorScene {
    resources: Option<Resources>,

    /// Quad center in clip space.
    offset: Vec2,
    zoom: f32,

    /// Geometry changed since the last upload.
    dirty: bool,
}

impl EditorScene {
    pub fn new() -> Self {
        Self {
            resources: None,
            offset: Vec2::zero(),
            zoom: 1.0,
            dirty: false,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    fn vertices(&self) -> [Vertex; 4] {
        QUAD.map(|mut vert| {
            vert.position[0] = vert.position[0] * self.zoom + self.offset.x;
            vert.position[1] = vert.position[1] * self.zoom + self.offset.y;
            vert
        })
    }

    /// Applies this frame's pointer state to the view.
    fn apply_input(&mut self, mouse: &MouseState, viewport: Viewport) {
        if mouse.is_dragging() {
            // Deltas are previous - current; the quad follows the pointer.
            let moved = Vec2::new(-mouse.dx(), -mouse.dy());
            if !moved.is_zero() {
                self.offset += viewport.pixels_to_ndc(moved);
                self.dirty = true;
            }
        }

        let scroll = mouse.scroll_y();
        if scroll != 0.0 {
            let zoom = (self.zoom * (1.0 + ZOOM_PER_LINE * scroll)).clamp(MIN_ZOOM, MAX_ZOOM);
            if zoom != self.zoom {
                self.zoom = zoom;
                self.dirty = true;
            }
        }
    }
}

impl Default for EditorScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for EditorScene {
    fn init(&mut self, gfx: &mut dyn GraphicsApi) -> Result<(), SceneError> {
        let vertex = gfx.compile_shader(ShaderStage::Vertex, VERTEX_SHADER)?;
        let fragment = gfx.compile_shader(ShaderStage::Fragment, FRAGMENT_SHADER)?;

        let program = gfx.link_program(&ProgramDesc {
            vertex,
            fragment,
            // position: vec3, color: vec4
            layout: VertexLayout::packed_f32(&[3, 4]),
            primitive: Primitive::Triangles,
        })?;

        let vertices = gfx.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&self.vertices()));
        let indices = gfx.create_buffer(BufferKind::Index, bytemuck::cast_slice(&INDICES));

        self.resources = Some(Resources {
            program,
            vertices,
            indices,
        });
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneCtx<'_>) {
        self.apply_input(&ctx.input.mouse, ctx.gfx.viewport());

        let Some(res) = &self.resources else { return };

        if self.dirty {
            ctx.gfx.upload(res.vertices, bytemuck::cast_slice(&self.vertices()));
            self.dirty = false;
        }

        ctx.gfx.draw_indexed(&DrawIndexed {
            program: res.program,
            vertices: res.vertices,
            indices: res.indices,
            index_count: INDICES.len() as u32,
        });
    }

    fn name(&self) -> &str {
        "level-editor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::render::ShaderError;
    use crate::render::testing::{Call, RecordingGraphics};
    use crate::time::FrameTime;

    fn frame(scene: &mut EditorScene, input: &InputState, gfx: &mut RecordingGraphics) {
        let mut ctx = SceneCtx {
            time: FrameTime { dt: 1.0 / 60.0, frame_index: 1 },
            input,
            gfx,
        };
        scene.update(&mut ctx);
    }

    fn initialized() -> (EditorScene, RecordingGraphics) {
        let mut scene = EditorScene::new();
        let mut gfx = RecordingGraphics::default();
        scene.init(&mut gfx).unwrap();
        gfx.calls.clear();
        (scene, gfx)
    }

    #[test]
    fn vertex_is_28_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(VertexLayout::packed_f32(&[3, 4]).stride, 28);
    }

    #[test]
    fn init_builds_program_and_uploads_geometry() {
        let mut scene = EditorScene::new();
        let mut gfx = RecordingGraphics::default();
        scene.init(&mut gfx).unwrap();

        assert_eq!(gfx.calls[0], Call::CompileShader(ShaderStage::Vertex));
        assert_eq!(gfx.calls[1], Call::CompileShader(ShaderStage::Fragment));
        assert_eq!(gfx.calls[2], Call::LinkProgram);
        assert_eq!(
            gfx.calls[3],
            Call::CreateBuffer(BufferKind::Vertex, bytemuck::cast_slice(&QUAD).to_vec())
        );
        assert_eq!(
            gfx.calls[4],
            Call::CreateBuffer(BufferKind::Index, bytemuck::cast_slice(&INDICES).to_vec())
        );
    }

    #[test]
    fn compile_failure_aborts_init() {
        let mut scene = EditorScene::new();
        let mut gfx = RecordingGraphics::failing_compile(ShaderStage::Fragment);

        let err = scene.init(&mut gfx).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Shader(ShaderError::Compile { stage: ShaderStage::Fragment, .. })
        ));
        assert!(!gfx.calls.contains(&Call::LinkProgram));
    }

    #[test]
    fn link_failure_aborts_init() {
        let mut scene = EditorScene::new();
        let mut gfx = RecordingGraphics::failing_link();

        let err = scene.init(&mut gfx).unwrap_err();
        assert!(matches!(err, SceneError::Shader(ShaderError::Link { .. })));
        assert!(!gfx.calls.iter().any(|c| matches!(c, Call::CreateBuffer(..))));
    }

    #[test]
    fn update_draws_six_indices() {
        let (mut scene, mut gfx) = initialized();
        frame(&mut scene, &InputState::default(), &mut gfx);

        let draws = gfx.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].index_count, 6);
        assert_eq!(gfx.uploads(), 0);
    }

    #[test]
    fn drag_pans_the_quad() {
        let (mut scene, mut gfx) = initialized();
        let mut input = InputState::default();
        input.mouse.on_pointer_move(100.0, 100.0);
        input.mouse.on_button_event(0, true);
        input.mouse.on_pointer_move(196.0, 154.0);

        frame(&mut scene, &input, &mut gfx);

        // 96 px right, 54 px down on a 1920x1080 viewport.
        assert_eq!(scene.offset(), Vec2::new(0.1, -0.1));
        assert_eq!(gfx.uploads(), 1);
        assert_eq!(gfx.draws().len(), 1);
    }

    #[test]
    fn pointer_motion_without_drag_is_ignored() {
        let (mut scene, mut gfx) = initialized();
        let mut input = InputState::default();
        input.mouse.on_pointer_move(100.0, 100.0);
        input.mouse.on_pointer_move(300.0, 100.0);

        frame(&mut scene, &input, &mut gfx);

        assert_eq!(scene.offset(), Vec2::zero());
        assert_eq!(gfx.uploads(), 0);
    }

    #[test]
    fn scroll_zooms_within_bounds() {
        let (mut scene, mut gfx) = initialized();
        let mut input = InputState::default();

        input.mouse.on_scroll(0.0, 5.0);
        frame(&mut scene, &input, &mut gfx);
        assert_eq!(scene.zoom(), 1.5);

        input.mouse.on_scroll(0.0, 1000.0);
        frame(&mut scene, &input, &mut gfx);
        assert_eq!(scene.zoom(), MAX_ZOOM);

        input.mouse.on_scroll(0.0, -1000.0);
        frame(&mut scene, &input, &mut gfx);
        assert_eq!(scene.zoom(), MIN_ZOOM);

        assert_eq!(gfx.uploads(), 3);
    }

    #[test]
    fn update_before_init_draws_nothing() {
        let mut scene = EditorScene::new();
        let mut gfx = RecordingGraphics::default();
        frame(&mut scene, &InputState::default(), &mut gfx);
        assert!(gfx.calls.is_empty());
    }
}
