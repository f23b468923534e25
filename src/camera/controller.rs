//! Orbit camera controller and its GPU resources.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;

/// Orbit radius: the rest eye sits at (10, 10, 10) looking at the
/// origin, matching the scene's 10x10 grid scale.
const ORBIT_DISTANCE: f32 = 17.320_508; // |(10, 10, 10)|

/// Per-frame orbit step while a camera direction key is held.
pub const ORBIT_STEP: f32 = 0.05;

/// Free-orbit camera around the scene origin, driven by two unclamped
/// angles, plus the uniform buffer and bind group the render passes
/// consume.
pub struct CameraController {
    /// Azimuth about the world Y axis (Left/Right keys). Unclamped.
    azimuth: f32,
    /// Elevation about the world X axis (Up/Down keys). Unclamped.
    elevation: f32,

    /// Current derived camera.
    pub camera: Camera,
    /// CPU copy of the camera uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 0 of every pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group referencing the uniform buffer.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the controller with the rest orbit pose and upload the
    /// initial uniform.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(context: &RenderContext) -> Self {
        let camera = Camera {
            eye: Vec3::new(10.0, 10.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: context.config.width as f32 / context.config.height as f32,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            azimuth: 0.0,
            elevation: 0.0,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Apply an orbit delta. Angles are free (no clamping): the camera
    /// may orbit all the way around and over the top.
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation += d_elevation;
        self.update_eye();
    }

    /// Current orbit angles `(azimuth, elevation)`.
    #[must_use]
    pub const fn angles(&self) -> (f32, f32) {
        (self.azimuth, self.elevation)
    }

    /// Recompute the eye position from the orbit angles: the rest eye
    /// direction (1, 1, 1)/√3 rotated about X by the elevation, then
    /// about Y by the azimuth, at fixed distance.
    fn update_eye(&mut self) {
        let rest_dir = Vec3::ONE.normalize();
        let rotated = Mat4::from_rotation_y(self.azimuth)
            * Mat4::from_rotation_x(self.elevation)
            * rest_dir.extend(0.0);
        self.camera.eye = rotated.truncate() * ORBIT_DISTANCE;
    }

    /// Push the current camera state to the GPU uniform buffer.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Update the projection aspect ratio for a new surface size.
    #[allow(clippy::cast_precision_loss)]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_distance_constant() {
        let rest = Vec3::new(10.0, 10.0, 10.0);
        assert!((rest.length() - ORBIT_DISTANCE).abs() < 1e-3);

        let mut azimuth = 0.0_f32;
        let mut elevation = 0.0_f32;
        for _ in 0..100 {
            azimuth += ORBIT_STEP;
            elevation -= ORBIT_STEP;
        }
        let eye = (Mat4::from_rotation_y(azimuth)
            * Mat4::from_rotation_x(elevation)
            * Vec3::ONE.normalize().extend(0.0))
        .truncate()
            * ORBIT_DISTANCE;
        assert!((eye.length() - ORBIT_DISTANCE).abs() < 1e-2);
    }
}
