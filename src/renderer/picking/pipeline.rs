//! Offscreen picking pass and synchronous pixel readback.
//!
//! Parts are re-rendered flat into a single-sample color target, with
//! each part's fragment color carrying its id code in the red channel.
//! A click copies the one pixel under the cursor to a staging buffer
//! and blocks until it maps, so the caller gets the byte immediately.

use std::fmt;
use std::sync::mpsc;

use crate::camera::controller::CameraController;
use crate::gpu::mesh::vertex_buffer_layout;
use crate::gpu::render_context::RenderContext;
use crate::renderer::picking::pick_map::{self, PickTarget, BACKGROUND_CODE};
use crate::renderer::SceneRenderer;
use crate::scene::selection::SelectionState;

/// Errors from the pick readback path.
#[derive(Debug)]
pub enum PickingError {
    /// The device failed while waiting for the readback to complete.
    DeviceWait,
    /// The staging buffer could not be mapped for reading.
    BufferMap,
}

impl fmt::Display for PickingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceWait => {
                write!(f, "device error while waiting for pick readback")
            }
            Self::BufferMap => {
                write!(f, "failed to map pick staging buffer")
            }
        }
    }
}

impl std::error::Error for PickingError {}

/// GPU resources for the picking pass.
pub struct Picking {
    pipeline: wgpu::RenderPipeline,
    texture: wgpu::Texture,
    texture_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    staging: wgpu::Buffer,
    width: u32,
    height: u32,
}

impl Picking {
    /// Create the picking pipeline and targets sized to the current
    /// surface.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        part_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let device = &context.device;
        let width = context.config.width;
        let height = context.config.height;

        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../shaders/picking.wgsl"));

        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Picking Pipeline Layout"),
                bind_group_layouts: &[camera_layout, part_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Picking Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
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
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Picking Staging Buffer"),
            size: 256,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let (texture, texture_view) = create_color_target(device, width, height);
        let depth_view = create_depth_target(device, width, height);

        Self {
            pipeline,
            texture,
            texture_view,
            depth_view,
            staging,
            width,
            height,
        }
    }

    /// Recreate the picking targets for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        let (texture, texture_view) = create_color_target(device, width, height);
        self.texture = texture;
        self.texture_view = texture_view;
        self.depth_view = create_depth_target(device, width, height);
    }

    /// Render the picking pass for the current uniform snapshot and
    /// read back the id byte under `cursor`.
    ///
    /// The caller must have uploaded this frame's part uniforms first,
    /// so the pick sees exactly the pose and highlight state that the
    /// display pass drew. A cursor outside the surface reads as
    /// background without touching the GPU.
    ///
    /// # Errors
    ///
    /// Returns [`PickingError`] if the device fails while waiting for
    /// the readback or the staging buffer cannot be mapped.
    pub fn pick(
        &self,
        context: &RenderContext,
        renderer: &SceneRenderer,
        camera: &CameraController,
        selection: &SelectionState,
        cursor: (u32, u32),
    ) -> Result<PickTarget, PickingError> {
        let (x, y) = cursor;
        if x >= self.width || y >= self.height {
            return Ok(pick_map::resolve(BACKGROUND_CODE));
        }

        let mut encoder = context.create_encoder();
        self.encode_pass(&mut encoder, renderer, camera, selection);

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(256),
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        context.submit(encoder);

        let code = self.read_staging(&context.device)?;
        Ok(pick_map::resolve(code))
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        renderer: &SceneRenderer,
        camera: &CameraController,
        selection: &SelectionState,
    ) {
        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Picking Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // White clear: the red channel reads back as
                        // the background code (255).
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
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

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &camera.bind_group, &[]);
        renderer.draw_parts(&mut render_pass, selection);
    }

    /// Block until the staging buffer maps, then read the red byte.
    fn read_staging(&self, device: &wgpu::Device) -> Result<u8, PickingError> {
        let slice = self.staging.slice(..4);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(|_| PickingError::DeviceWait)?;

        receiver
            .recv()
            .map_err(|_| PickingError::BufferMap)?
            .map_err(|_| PickingError::BufferMap)?;

        let code = {
            let data = slice.get_mapped_range();
            data[0]
        };
        self.staging.unmap();
        Ok(code)
    }
}

/// Convert a cursor position in physical pixels to a pick texel.
///
/// Negative coordinates clamp to the near edge; coordinates past the
/// far edge are caught by the bounds check in [`Picking::pick`] and
/// resolve to background.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cursor_texel(x: f32, y: f32) -> (u32, u32) {
    (x.max(0.0) as u32, y.max(0.0) as u32)
}

fn create_color_target(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Picking Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_depth_target(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Picking Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::cursor_texel;

    #[test]
    fn cursor_texel_truncates_fractional_pixels() {
        assert_eq!(cursor_texel(12.7, 3.2), (12, 3));
    }

    #[test]
    fn cursor_texel_clamps_negative_coordinates() {
        assert_eq!(cursor_texel(-5.0, -0.1), (0, 0));
    }
}
