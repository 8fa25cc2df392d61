//! Graphics collaborators.
//!
//! `RenderSurface` is the frame boundary the application loop drives (clear,
//! present). `GraphicsApi` is what scenes build and draw with. `Graphics`
//! implements both on top of wgpu.

mod api;
mod graphics;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    BufferHandle, BufferKind, DrawIndexed, GraphicsApi, Primitive, ProgramDesc, ProgramHandle,
    RenderSurface, ShaderError, ShaderHandle, ShaderStage, VertexAttribute, VertexLayout,
};
pub use graphics::Graphics;
