//! In-memory graphics double for unit tests.

use crate::coords::Viewport;
use crate::paint::Color;

use super::api::{
    BufferHandle, BufferKind, DrawIndexed, GraphicsApi, ProgramDesc, ProgramHandle, RenderSurface,
    ShaderError, ShaderHandle, ShaderStage,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Clear(Color),
    Present,
    CompileShader(ShaderStage),
    LinkProgram,
    CreateBuffer(BufferKind, Vec<u8>),
    Upload(BufferHandle, Vec<u8>),
    Draw(DrawIndexed),
}

/// Records every call; compilation and linking can be told to fail.
#[derive(Debug)]
pub(crate) struct RecordingGraphics {
    pub calls: Vec<Call>,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,
    pub viewport: Viewport,
    next_handle: u32,
}

impl Default for RecordingGraphics {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            fail_compile: None,
            fail_link: false,
            viewport: Viewport::new(1920.0, 1080.0),
            next_handle: 0,
        }
    }
}

impl RecordingGraphics {
    /// Fails every compilation of `stage`.
    pub fn failing_compile(stage: ShaderStage) -> Self {
        Self {
            fail_compile: Some(stage),
            ..Self::default()
        }
    }

    /// Fails every program link.
    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    fn next(&mut self) -> u32 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }

    pub fn draws(&self) -> Vec<DrawIndexed> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Upload(..))).count()
    }

    pub fn clear_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Clear(_))).count()
    }
}

impl GraphicsApi for RecordingGraphics {
    fn compile_shader(&mut self, stage: ShaderStage, _source: &str) -> Result<ShaderHandle, ShaderError> {
        self.calls.push(Call::CompileShader(stage));
        if self.fail_compile == Some(stage) {
            return Err(ShaderError::Compile {
                stage,
                log: "error: expected ';'".into(),
            });
        }
        Ok(ShaderHandle::from_raw(self.next()))
    }

    fn link_program(&mut self, _desc: &ProgramDesc) -> Result<ProgramHandle, ShaderError> {
        self.calls.push(Call::LinkProgram);
        if self.fail_link {
            return Err(ShaderError::Link { log: "location mismatch".into() });
        }
        Ok(ProgramHandle::from_raw(self.next()))
    }

    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferHandle {
        self.calls.push(Call::CreateBuffer(kind, contents.to_vec()));
        BufferHandle::from_raw(self.next())
    }

    fn upload(&mut self, buffer: BufferHandle, contents: &[u8]) {
        self.calls.push(Call::Upload(buffer, contents.to_vec()));
    }

    fn draw_indexed(&mut self, draw: &DrawIndexed) {
        self.calls.push(Call::Draw(*draw));
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl RenderSurface for RecordingGraphics {
    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }
}
