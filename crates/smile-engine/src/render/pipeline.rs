use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::assets::{AssetSource, TextureSlot};
use crate::coords::ViewportRect;
use crate::render::{RenderCtx, RenderTarget};

use super::shader::{self, ShaderBindings, FS_ENTRY, VS_ENTRY};
use super::texture::SceneTexture;
use super::vertex::{Quad, Vertex, QUAD_VERTICES};

/// Byte stride between per-quad matrix slots; covers the default
/// `min_uniform_buffer_offset_alignment`.
const MATRIX_SLOT_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MatrixUniform {
    matrix: [[f32; 4]; 4],
}

impl From<Mat4> for MatrixUniform {
    fn from(m: Mat4) -> Self {
        Self { matrix: m.to_cols_array_2d() }
    }
}

/// GPU objects for the two textured quads.
///
/// Built once per surface creation. Each quad owns one slot of the matrix uniform
/// buffer so both transforms survive until the frame is submitted.
pub struct QuadPipeline {
    bindings: ShaderBindings,
    pipeline: wgpu::RenderPipeline,

    vertex_buffer: wgpu::Buffer,

    matrix_ubo: wgpu::Buffer,
    matrix_bind_group: wgpu::BindGroup,

    texture_bind_groups: [wgpu::BindGroup; 2],
}

impl QuadPipeline {
    /// Validates the shader, resolves bindings, and uploads geometry and textures.
    pub fn new(ctx: &RenderCtx<'_>, assets: &dyn AssetSource) -> Result<Self> {
        let source = assets.shader_source().context("failed to load shader source")?;
        let bindings = shader::build(&source)?;
        log::debug!("resolved shader bindings: {bindings:?}");

        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("smile quad shader"),
            source: wgpu::ShaderSource::Wgsl(source.as_ref().into()),
        });

        let matrix_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("smile matrix bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: bindings.matrix.binding,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<MatrixUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("smile texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: bindings.texture_unit.binding,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: bindings.sampler.binding,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // check_layout() guarantees the two groups are 0 and 1.
        let group_layouts = if bindings.matrix.group == 0 {
            [&matrix_bgl, &texture_bgl]
        } else {
            [&texture_bgl, &matrix_bgl]
        };

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("smile quad pipeline layout"),
            bind_group_layouts: &group_layouts,
            immediate_size: 0,
        });

        let attributes = Vertex::attributes(&bindings);
        let depth_stencil = ctx.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("smile quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout(&attributes)],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("smile quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let matrix_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("smile matrix ubo"),
            size: MATRIX_SLOT_STRIDE * Quad::ALL.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let matrix_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("smile matrix bind group"),
            layout: &matrix_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: bindings.matrix.binding,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &matrix_ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<MatrixUniform>() as u64),
                }),
            }],
        });

        let load = |slot: TextureSlot| -> Result<SceneTexture> {
            let bytes = assets
                .image_bytes(slot)
                .with_context(|| format!("failed to load {slot:?} image"))?;
            SceneTexture::from_encoded(ctx.device, ctx.queue, slot.file_name(), &bytes)
        };
        let textures = [load(TextureSlot::Background)?, load(TextureSlot::Sprite)?];

        let texture_bind_groups = textures.each_ref().map(|tex| {
            ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("smile texture bind group"),
                layout: &texture_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: bindings.texture_unit.binding,
                        resource: wgpu::BindingResource::TextureView(&tex.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: bindings.sampler.binding,
                        resource: wgpu::BindingResource::Sampler(&tex.sampler),
                    },
                ],
            })
        });

        log::info!(
            "quad pipeline ready (surface {:?}, depth {:?})",
            ctx.surface_format,
            ctx.depth_format
        );

        Ok(Self {
            bindings,
            pipeline,
            vertex_buffer,
            matrix_ubo,
            matrix_bind_group,
            texture_bind_groups,
        })
    }

    /// Uploads the combined transform for `quad`.
    pub fn upload_transform(&self, queue: &wgpu::Queue, quad: Quad, matrix: Mat4) {
        let offset = MATRIX_SLOT_STRIDE * quad.index() as u64;
        queue.write_buffer(
            &self.matrix_ubo,
            offset,
            bytemuck::bytes_of(&MatrixUniform::from(matrix)),
        );
    }

    /// Clears color and depth, then draws both quads inside `viewport`.
    ///
    /// Transforms must already be uploaded with [`upload_transform`](Self::upload_transform).
    pub fn draw(&self, target: &mut RenderTarget<'_>, viewport: ViewportRect, clear: wgpu::Color) {
        let depth_stencil_attachment =
            target.depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("smile quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for quad in Quad::ALL {
            let offset = (MATRIX_SLOT_STRIDE * quad.index() as u64) as u32;
            rpass.set_bind_group(self.bindings.matrix.group, &self.matrix_bind_group, &[offset]);
            rpass.set_bind_group(
                self.bindings.texture_unit.group,
                &self.texture_bind_groups[quad.index()],
                &[],
            );
            rpass.draw(quad.vertices(), 0..1);
        }
    }
}
