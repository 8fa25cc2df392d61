use std::fmt;

use crate::coords::Viewport;
use crate::paint::Color;

/// Opaque handle to a compiled shader stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderHandle(u32);

/// Opaque handle to a linked program (vertex + fragment + vertex layout).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramHandle(u32);

/// Opaque handle to a GPU buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferHandle(u32);

macro_rules! raw_handle {
    ($($ty:ident),*) => {$(
        impl $ty {
            /// Wraps a backend-defined slot index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    )*};
}

raw_handle!(ShaderHandle, ProgramHandle, BufferHandle);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    /// Interleaved vertex data.
    Vertex,
    /// `u32` element indices.
    Index,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Primitive {
    #[default]
    Triangles,
    Lines,
    Points,
}

/// One `f32` vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components (1–4).
    pub components: u32,
    /// Byte offset inside one vertex.
    pub offset: u64,
}

/// Interleaved vertex buffer layout.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    /// Size of one vertex in bytes.
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Builds a tightly packed layout from per-attribute component counts.
    ///
    /// Locations are assigned in order starting at 0.
    pub fn packed_f32(components: &[u32]) -> Self {
        let mut offset = 0u64;
        let attributes = components
            .iter()
            .enumerate()
            .map(|(location, &n)| {
                let attr = VertexAttribute {
                    location: location as u32,
                    components: n,
                    offset,
                };
                offset += u64::from(n) * F32_SIZE;
                attr
            })
            .collect();

        Self { stride: offset, attributes }
    }
}

const F32_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// Inputs to `GraphicsApi::link_program`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramDesc {
    pub vertex: ShaderHandle,
    pub fragment: ShaderHandle,
    pub layout: VertexLayout,
    pub primitive: Primitive,
}

/// One indexed draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawIndexed {
    pub program: ProgramHandle,
    pub vertices: BufferHandle,
    pub indices: BufferHandle,
    pub index_count: u32,
}

/// Shader build failure carrying the backend's diagnostic log.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed:\n{log}")
            }
            ShaderError::Link { log } => write!(f, "shader program linking failed:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Graphics pipeline operations available to scenes.
///
/// Handles returned here are owned by the scene that created them; the
/// application never inspects them.
pub trait GraphicsApi {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle, ShaderError>;

    fn link_program(&mut self, desc: &ProgramDesc) -> Result<ProgramHandle, ShaderError>;

    /// Creates a buffer initialized with `contents`.
    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferHandle;

    /// Overwrites a buffer's contents from offset 0.
    fn upload(&mut self, buffer: BufferHandle, contents: &[u8]);

    /// Records an indexed draw into the current frame.
    fn draw_indexed(&mut self, draw: &DrawIndexed);

    /// Drawable size in logical pixels.
    fn viewport(&self) -> Viewport;
}

/// Frame boundary operations used by the application loop.
pub trait RenderSurface {
    /// Starts a frame and clears the color target.
    fn clear(&mut self, color: Color);

    /// Submits and presents the frame. May block on display pacing.
    fn present(&mut self);
}
