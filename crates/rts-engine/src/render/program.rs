use crate::error::GraphicsError;
use crate::geometry::StaticMesh;
use crate::shader::{ProgramInterface, ShaderProgram};

use super::uniforms::{ColorUniform, MvpUniform};
use super::{RenderCtx, UniformArena};

/// GPU side of a linked [`ShaderProgram`]: pipeline plus uniform bindings.
pub struct GpuProgram {
    label: String,
    interface: ProgramInterface,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GpuProgram {
    /// Builds the render pipeline for `program` against the current surface,
    /// with its uniforms bound to `arena`.
    pub fn new(
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        arena: &UniformArena,
    ) -> Result<Self, GraphicsError> {
        let interface = program.interface();
        if interface.mvp.group != 0 || interface.color.group != 0 {
            return Err(GraphicsError::ProgramLink {
                label: program.label().to_string(),
                log: "uniforms must be declared in bind group 0".to_string(),
            });
        }

        let vertex = program.vertex();
        let fragment = program.fragment();

        let vs_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rts vertex shader"),
            source: wgpu::ShaderSource::Wgsl(vertex.code.as_str().into()),
        });
        let fs_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rts fragment shader"),
            source: wgpu::ShaderSource::Wgsl(fragment.code.as_str().into()),
        });

        let uniform_entry = |binding, visibility, size| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(size),
            },
            count: None,
        };

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("rts program bgl"),
                entries: &[
                    uniform_entry(
                        interface.mvp.binding,
                        wgpu::ShaderStages::VERTEX_FRAGMENT,
                        MvpUniform::SIZE,
                    ),
                    uniform_entry(
                        interface.color.binding,
                        wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ColorUniform::SIZE,
                    ),
                ],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("rts program pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let attributes = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: interface.position_location,
        }];

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(program.label()),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vs_module,
                    entry_point: Some(vertex.entry_point.as_str()),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: StaticMesh::vertex_stride(),
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &attributes,
                    }],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fs_module,
                    entry_point: Some(fragment.entry_point.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: ctx.depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            });

        let bind_group = create_bind_group(ctx, &bind_group_layout, interface, arena);

        log::debug!("pipeline '{}' created", program.label());

        Ok(Self {
            label: program.label().to_string(),
            interface,
            pipeline,
            bind_group_layout,
            bind_group,
        })
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn interface(&self) -> ProgramInterface {
        self.interface
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Rebinds the uniforms after the arena replaced its buffers.
    pub fn rebind_uniforms(&mut self, ctx: &RenderCtx<'_>, arena: &UniformArena) {
        self.bind_group = create_bind_group(ctx, &self.bind_group_layout, self.interface, arena);
    }

    /// Dynamic offsets for a slot at `offset`, ordered by binding number.
    #[inline]
    pub fn dynamic_offsets(&self, offset: u32) -> [u32; 2] {
        // Both buffers share the slot stride, so the two offsets are equal.
        [offset, offset]
    }
}

fn create_bind_group(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::BindGroupLayout,
    interface: ProgramInterface,
    arena: &UniformArena,
) -> wgpu::BindGroup {
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("rts program bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: interface.mvp.binding,
                resource: uniform_slot(arena.mvp_buffer(), MvpUniform::SIZE),
            },
            wgpu::BindGroupEntry {
                binding: interface.color.binding,
                resource: uniform_slot(arena.color_buffer(), ColorUniform::SIZE),
            },
        ],
    })
}

/// One uniform slot of `size` bytes; the slot is selected by dynamic offset.
fn uniform_slot(buffer: &wgpu::Buffer, size: u64) -> wgpu::BindingResource<'_> {
    wgpu::BindingResource::Buffer(wgpu::BufferBinding {
        buffer,
        offset: 0,
        size: wgpu::BufferSize::new(size),
    })
}
