use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::paint::Color;

use super::api::{
    BufferHandle, BufferKind, DrawIndexed, GraphicsApi, Primitive, ProgramDesc, ProgramHandle,
    RenderSurface, ShaderError, ShaderHandle, ShaderStage, VertexLayout,
};

struct ShaderSlot {
    stage: ShaderStage,
    module: wgpu::ShaderModule,
}

struct BufferSlot {
    kind: BufferKind,
    buffer: wgpu::Buffer,
}

/// wgpu-backed graphics for one window.
///
/// Resources live in append-only tables indexed by the handles given out to
/// scenes. Nothing is freed before the `Graphics` itself is dropped.
pub struct Graphics<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,

    shaders: Vec<ShaderSlot>,
    programs: Vec<wgpu::RenderPipeline>,
    buffers: Vec<BufferSlot>,

    /// Frame between `clear` and `present`.
    frame: Option<GpuFrame>,
    lost: bool,
}

impl<'w> Graphics<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window, init).await?;
        Ok(Self {
            window,
            gpu,
            shaders: Vec::new(),
            programs: Vec::new(),
            buffers: Vec::new(),
            frame: None,
            lost: false,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    /// True after an unrecoverable surface error.
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    fn shader(&self, handle: ShaderHandle, expected: ShaderStage) -> Result<&ShaderSlot, ShaderError> {
        let slot = self.shaders.get(handle.index()).ok_or_else(|| ShaderError::Link {
            log: format!("unknown shader handle {}", handle.raw()),
        })?;

        if slot.stage != expected {
            return Err(ShaderError::Link {
                log: format!("shader {} is a {} shader, expected {expected}", handle.raw(), slot.stage),
            });
        }
        Ok(slot)
    }

    fn buffer(&self, handle: BufferHandle) -> Option<&BufferSlot> {
        let slot = self.buffers.get(handle.index());
        if slot.is_none() {
            log::warn!("unknown buffer handle {}", handle.raw());
        }
        slot
    }
}

impl GraphicsApi for Graphics<'_> {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle, ShaderError> {
        let label = format!("lumen {stage} shader");
        let (module, error) = capture_validation(self.gpu.device(), |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        });

        if let Some(log) = error {
            return Err(ShaderError::Compile { stage, log });
        }

        let handle = ShaderHandle::from_raw(self.shaders.len() as u32);
        self.shaders.push(ShaderSlot { stage, module });
        Ok(handle)
    }

    fn link_program(&mut self, desc: &ProgramDesc) -> Result<ProgramHandle, ShaderError> {
        let vertex = &self.shader(desc.vertex, ShaderStage::Vertex)?.module;
        let fragment = &self.shader(desc.fragment, ShaderStage::Fragment)?.module;
        let attributes = vertex_attributes(&desc.layout)?;
        let format = self.gpu.surface_format();

        let (pipeline, error) = capture_validation(self.gpu.device(), |device| {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("lumen program layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("lumen program"),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: vertex,
                    entry_point: None,
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: desc.layout.stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &attributes,
                    }],
                },

                fragment: Some(wgpu::FragmentState {
                    module: fragment,
                    entry_point: None,
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: topology(desc.primitive),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        });

        if let Some(log) = error {
            return Err(ShaderError::Link { log });
        }

        let handle = ProgramHandle::from_raw(self.programs.len() as u32);
        self.programs.push(pipeline);
        Ok(handle)
    }

    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferHandle {
        let (label, usage) = match kind {
            BufferKind::Vertex => ("lumen vbo", wgpu::BufferUsages::VERTEX),
            BufferKind::Index => ("lumen ibo", wgpu::BufferUsages::INDEX),
        };

        let buffer = self
            .gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        let handle = BufferHandle::from_raw(self.buffers.len() as u32);
        self.buffers.push(BufferSlot { kind, buffer });
        handle
    }

    fn upload(&mut self, buffer: BufferHandle, contents: &[u8]) {
        let Some(slot) = self.buffer(buffer) else { return };

        let len = contents.len() as u64;
        if len % wgpu::COPY_BUFFER_ALIGNMENT != 0 || len > slot.buffer.size() {
            log::warn!(
                "upload of {len} bytes into buffer {} (size {}) rejected",
                buffer.raw(),
                slot.buffer.size()
            );
            return;
        }

        self.gpu.queue().write_buffer(&slot.buffer, 0, contents);
    }

    fn draw_indexed(&mut self, draw: &DrawIndexed) {
        let Some(pipeline) = self.programs.get(draw.program.index()) else {
            log::warn!("unknown program handle {}", draw.program.raw());
            return;
        };
        let (Some(vbo), Some(ibo)) = (self.buffers.get(draw.vertices.index()), self.buffers.get(draw.indices.index())) else {
            log::warn!("draw references unknown buffers");
            return;
        };
        if vbo.kind != BufferKind::Vertex || ibo.kind != BufferKind::Index {
            log::warn!("draw buffers bound with the wrong kind; skipped");
            return;
        }

        // No acquired frame (skipped after a surface error).
        let Some(frame) = self.frame.as_mut() else { return };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.buffer.slice(..));
        rpass.set_index_buffer(ibo.buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..draw.index_count, 0, 0..1);
    }

    fn viewport(&self) -> Viewport {
        let logical = self.gpu.size().to_logical::<f32>(self.window.scale_factor());
        Viewport::new(logical.width, logical.height)
    }
}

impl RenderSurface for Graphics<'_> {
    fn clear(&mut self, color: Color) {
        if self.frame.take().is_some() {
            log::warn!("clear called twice without present; previous frame discarded");
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("surface lost; shutting down");
                    self.lost = true;
                }
                return;
            }
        };

        // Clear pass; dropped before the encoder is used again.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumen clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(color.r),
                            g: f64::from(color.g),
                            b: f64::from(color.b),
                            a: f64::from(color.a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.frame = Some(frame);
    }

    fn present(&mut self) {
        let Some(frame) = self.frame.take() else { return };
        self.window.pre_present_notify();
        self.gpu.submit(frame);
    }
}

/// Runs `f` inside a validation error scope and returns the captured error
/// text, if any.
fn capture_validation<T>(
    device: &wgpu::Device,
    f: impl FnOnce(&wgpu::Device) -> T,
) -> (T, Option<String>) {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f(device);
    let error = pollster::block_on(scope.pop());
    (value, error.map(|e| e.to_string()))
}

fn vertex_attributes(layout: &VertexLayout) -> Result<Vec<wgpu::VertexAttribute>, ShaderError> {
    layout
        .attributes
        .iter()
        .map(|a| {
            let format = match a.components {
                1 => wgpu::VertexFormat::Float32,
                2 => wgpu::VertexFormat::Float32x2,
                3 => wgpu::VertexFormat::Float32x3,
                4 => wgpu::VertexFormat::Float32x4,
                n => {
                    return Err(ShaderError::Link {
                        log: format!("attribute {} has {n} components (1-4 supported)", a.location),
                    });
                }
            };
            Ok(wgpu::VertexAttribute {
                format,
                offset: a.offset,
                shader_location: a.location,
            })
        })
        .collect()
}

fn topology(primitive: Primitive) -> wgpu::PrimitiveTopology {
    match primitive {
        Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
        Primitive::Lines => wgpu::PrimitiveTopology::LineList,
        Primitive::Points => wgpu::PrimitiveTopology::PointList,
    }
}
