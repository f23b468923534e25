//! GPU vertex format and buffer upload helpers.

use wgpu::util::DeviceExt;

/// One mesh vertex: position, normal, and baked color.
///
/// Color lives on the vertex (not a material uniform) so a part's two
/// variants are just two uploads of the same geometry with different
/// tints.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in the part's local frame.
    pub position: [f32; 3],
    /// Outward surface normal (unit length).
    pub normal: [f32; 3],
    /// Baked RGBA color.
    pub color: [f32; 4],
}

/// Vertex buffer layout shared by the mesh, line, and picking pipelines.
#[must_use]
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
    ];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// An uploaded indexed triangle mesh.
pub struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    /// Upload vertex and index data as static buffers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Self {
        let vertex =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex,
            index,
            index_count: indices.len() as u32,
        }
    }

    /// Bind this mesh and issue its indexed draw.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex.slice(..));
        render_pass
            .set_index_buffer(self.index.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// An uploaded line-list vertex buffer (no indices).
pub struct LineBuffers {
    vertex: wgpu::Buffer,
    vertex_count: u32,
}

impl LineBuffers {
    /// Upload line vertices (consecutive pairs form segments).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
    ) -> Self {
        let vertex =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Line Buffer")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        Self {
            vertex,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Bind and draw the full line list.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}
