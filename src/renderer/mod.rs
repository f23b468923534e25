//! Display renderer: MSAA mesh pass plus reference-line pass.
//!
//! All per-part state (model matrix and pick id color) lives in one
//! uniform buffer addressed with dynamic offsets, so both the display
//! and picking passes draw every part with a single bind group.

pub mod picking;

use glam::Mat4;

use crate::camera::controller::CameraController;
use crate::gpu::mesh::{vertex_buffer_layout, LineBuffers, MeshBuffers};
use crate::gpu::render_context::RenderContext;
use crate::renderer::picking::pick_map;
use crate::scene::mesh_gen;
use crate::scene::part::Part;
use crate::scene::selection::SelectionState;
use crate::scene::transform::WorldTransforms;

/// MSAA sample count for the display pass.
const SAMPLE_COUNT: u32 = 4;

/// Dynamic-offset stride; the default uniform offset alignment limit.
const UNIFORM_STRIDE: u64 = 256;

/// Slot 0 holds the identity transform for the reference lines; parts
/// occupy slots `1..=Part::COUNT`.
const SLOT_COUNT: u64 = 1 + Part::COUNT as u64;

/// Background clear color for the display pass (dark blue).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.2,
    a: 1.0,
};

/// Per-draw uniform: model matrix plus the flat color the picking pass
/// writes for this draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct PartUniform {
    model: [[f32; 4]; 4],
    pick_color: [f32; 4],
}

/// One uniform buffer holding a 256-byte slot per draw, bound once with
/// per-draw dynamic offsets.
pub struct PartBindings {
    buffer: wgpu::Buffer,
    /// Bind group layout (group 1 of every pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group referencing the slotted uniform buffer.
    pub bind_group: wgpu::BindGroup,
}

impl PartBindings {
    /// Create the slotted uniform buffer and its bind group.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Part Uniform Buffer"),
            size: UNIFORM_STRIDE * SLOT_COUNT,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Part Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            size_of::<PartUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Part Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(
                        size_of::<PartUniform>() as u64,
                    ),
                }),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    /// Dynamic offset of a part's slot.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn part_offset(part: Part) -> u32 {
        (UNIFORM_STRIDE as u32) * (1 + part.index() as u32)
    }

    /// Dynamic offset of the identity slot used by the reference lines.
    #[must_use]
    pub const fn identity_offset() -> u32 {
        0
    }

    /// Write the frame's transforms and selection-aware pick colors.
    ///
    /// Both render passes read the buffer written here, so display and
    /// picking always agree on the same pose snapshot.
    pub fn upload(
        &self,
        queue: &wgpu::Queue,
        world: &WorldTransforms,
        selection: &SelectionState,
    ) {
        let identity = PartUniform {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            pick_color: [0.0; 4],
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&identity));

        for part in Part::ALL {
            let code = pick_map::encode(part, selection.is_selected(part));
            let uniform = PartUniform {
                model: world.get(part).to_cols_array_2d(),
                pick_color: [f32::from(code) / 255.0, 0.0, 0.0, 1.0],
            };
            queue.write_buffer(
                &self.buffer,
                u64::from(Self::part_offset(part)),
                bytemuck::bytes_of(&uniform),
            );
        }
    }
}

/// Both color variants of one part's geometry, uploaded once.
struct PartMeshes {
    normal: MeshBuffers,
    highlighted: MeshBuffers,
}

/// Renders the articulated model and the reference grid to the surface.
pub struct SceneRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    msaa_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    part_meshes: [PartMeshes; Part::COUNT],
    lines: LineBuffers,
    /// Per-draw uniform slots shared with the picking pass.
    pub parts: PartBindings,
}

impl SceneRenderer {
    /// Build pipelines, upload all part geometry, and size the render
    /// targets to the current surface.
    #[must_use]
    pub fn new(context: &RenderContext, camera: &CameraController) -> Self {
        let device = &context.device;
        let parts = PartBindings::new(device);

        let mesh_shader =
            device.create_shader_module(wgpu::include_wgsl!("shaders/scene.wgsl"));
        let line_shader =
            device.create_shader_module(wgpu::include_wgsl!("shaders/lines.wgsl"));

        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[&camera.layout, &parts.layout],
                push_constant_ranges: &[],
            });

        let mesh_pipeline = create_pipeline(
            device,
            "Scene Mesh Pipeline",
            &layout,
            &mesh_shader,
            context.format(),
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = create_pipeline(
            device,
            "Scene Line Pipeline",
            &layout,
            &line_shader,
            context.format(),
            wgpu::PrimitiveTopology::LineList,
        );

        let part_meshes = std::array::from_fn(|i| {
            let part = Part::ALL[i];
            let normal = mesh_gen::part_mesh(part, false);
            let highlighted = mesh_gen::part_mesh(part, true);
            PartMeshes {
                normal: MeshBuffers::upload(
                    device,
                    part.label(),
                    &normal.vertices,
                    &normal.indices,
                ),
                highlighted: MeshBuffers::upload(
                    device,
                    &format!("{} Highlight", part.label()),
                    &highlighted.vertices,
                    &highlighted.indices,
                ),
            }
        });

        let lines =
            LineBuffers::upload(device, "Reference", &mesh_gen::reference_lines());

        let (msaa_view, depth_view) = create_targets(
            device,
            context.format(),
            context.config.width,
            context.config.height,
        );

        Self {
            mesh_pipeline,
            line_pipeline,
            msaa_view,
            depth_view,
            part_meshes,
            lines,
            parts,
        }
    }

    /// Recreate the MSAA and depth targets for a new surface size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (msaa_view, depth_view) = create_targets(
            &context.device,
            context.format(),
            context.config.width,
            context.config.height,
        );
        self.msaa_view = msaa_view;
        self.depth_view = depth_view;
    }

    /// Encode the display pass, resolving MSAA into `frame_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
        camera: &CameraController,
        selection: &SelectionState,
    ) {
        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Display Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(frame_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

        render_pass.set_pipeline(&self.line_pipeline);
        render_pass.set_bind_group(0, &camera.bind_group, &[]);
        render_pass.set_bind_group(
            1,
            &self.parts.bind_group,
            &[PartBindings::identity_offset()],
        );
        self.lines.draw(&mut render_pass);

        render_pass.set_pipeline(&self.mesh_pipeline);
        self.draw_parts(&mut render_pass, selection);
    }

    /// Draw every part at its uniform slot, choosing the highlighted
    /// mesh for the selected part.
    ///
    /// The caller has already set a pipeline and the camera bind group;
    /// the picking pass reuses this with its own pipeline.
    pub fn draw_parts(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        selection: &SelectionState,
    ) {
        for part in Part::ALL {
            render_pass.set_bind_group(
                1,
                &self.parts.bind_group,
                &[PartBindings::part_offset(part)],
            );
            let meshes = &self.part_meshes[part.index()];
            if selection.is_selected(part) {
                meshes.highlighted.draw(render_pass);
            } else {
                meshes.normal.draw(render_pass);
            }
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_buffer_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: SAMPLE_COUNT,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

fn create_targets(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::TextureView, wgpu::TextureView) {
    let msaa = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("MSAA Color Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Display Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    (
        msaa.create_view(&wgpu::TextureViewDescriptor::default()),
        depth.create_view(&wgpu::TextureViewDescriptor::default()),
    )
}
