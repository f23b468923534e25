//! Procedural geometry for the model parts, grid, and axes.
//!
//! The two variants of a part (normal tint, highlight tint) are built
//! from one geometry function, so their positions, normals, and indices
//! are always identical. Only the baked vertex color differs, which is
//! the property that keeps the display and picking passes congruent.

use glam::Vec3;

use super::part::Part;
use crate::gpu::mesh::Vertex;

/// Tint of every part's highlighted (selected) variant.
pub const HIGHLIGHT_COLOR: [f32; 4] = [1.0, 0.9, 0.2, 1.0];

/// Half-extent of the ground grid in world units.
pub const GRID_EXTENT: f32 = 5.0;

/// Length of each coordinate axis line.
pub const AXIS_LENGTH: f32 = 5.0;

/// CPU-side indexed triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex array.
    pub vertices: Vec<Vertex>,
    /// Triangle index array.
    pub indices: Vec<u32>,
}

/// The mesh for one part variant.
#[must_use]
pub fn part_mesh(part: Part, highlighted: bool) -> MeshData {
    let color = if highlighted {
        HIGHLIGHT_COLOR
    } else {
        part_color(part)
    };
    match part {
        Part::Base => cuboid(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.5, 1.0),
            color,
        ),
        Part::Top => cylinder(0.6, 0.0, 0.4, 24, color),
        Part::Arm1 => cuboid(
            Vec3::new(-0.15, 0.0, -0.15),
            Vec3::new(0.15, 1.6, 0.15),
            color,
        ),
        Part::Joint => cylinder(0.28, -0.2, 0.2, 16, color),
        Part::Arm2 => cuboid(
            Vec3::new(-0.125, 0.0, -0.125),
            Vec3::new(0.125, 1.4, 0.125),
            color,
        ),
        Part::Pen => cylinder(0.08, 0.0, 0.9, 16, color),
        Part::Button => cuboid(
            Vec3::new(-0.15, -0.15, -0.15),
            Vec3::new(0.15, 0.15, 0.15),
            color,
        ),
    }
}

/// Normal-variant tint for `part`.
#[must_use]
pub const fn part_color(part: Part) -> [f32; 4] {
    match part {
        Part::Base => [0.75, 0.2, 0.2, 1.0],
        Part::Top => [0.8, 0.5, 0.2, 1.0],
        Part::Arm1 => [0.25, 0.55, 0.8, 1.0],
        Part::Joint => [0.6, 0.6, 0.65, 1.0],
        Part::Arm2 => [0.3, 0.7, 0.45, 1.0],
        Part::Pen => [0.55, 0.35, 0.75, 1.0],
        Part::Button => [0.85, 0.25, 0.55, 1.0],
    }
}

/// Grid lines on the XZ plane plus the three colored coordinate axes,
/// as one line list. Not pickable; drawn only by the display pass.
#[must_use]
pub fn reference_lines() -> Vec<Vertex> {
    let white = [1.0, 1.0, 1.0, 1.0];
    let up = [0.0, 1.0, 0.0];
    let e = GRID_EXTENT;
    let mut verts = Vec::with_capacity(50);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lines_per_axis = (2.0 * e) as i32;
    for i in 0..=lines_per_axis {
        #[allow(clippy::cast_precision_loss)]
        let j = i as f32 - e;
        // Parallel to Z, then parallel to X.
        verts.push(line_vertex([j, 0.0, -e], up, white));
        verts.push(line_vertex([j, 0.0, e], up, white));
        verts.push(line_vertex([-e, 0.0, j], up, white));
        verts.push(line_vertex([e, 0.0, j], up, white));
    }

    let origin = [0.0, 0.0, 0.0];
    let red = [1.0, 0.0, 0.0, 1.0];
    let green = [0.0, 1.0, 0.0, 1.0];
    let blue = [0.0, 0.0, 1.0, 1.0];
    verts.push(line_vertex(origin, up, red));
    verts.push(line_vertex([AXIS_LENGTH, 0.0, 0.0], up, red));
    verts.push(line_vertex(origin, up, green));
    verts.push(line_vertex([0.0, AXIS_LENGTH, 0.0], up, green));
    verts.push(line_vertex(origin, up, blue));
    verts.push(line_vertex([0.0, 0.0, AXIS_LENGTH], up, blue));

    verts
}

const fn line_vertex(
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 4],
) -> Vertex {
    Vertex {
        position,
        normal,
        color,
    }
}

/// Axis-aligned box between `min` and `max` with flat per-face normals.
#[allow(clippy::cast_possible_truncation)]
fn cuboid(min: Vec3, max: Vec3, color: [f32; 4]) -> MeshData {
    // One quad per face, 4 vertices each, so normals stay flat.
    let faces: [([f32; 3], [Vec3; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(min.x, max.y, max.z),
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(max.x, max.y, min.z),
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(max.x, max.y, max.z),
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(min.x, max.y, min.z),
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(min.x, max.y, min.z),
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(min.x, min.y, max.z),
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let start = vertices.len() as u32;
        for corner in corners {
            vertices.push(Vertex {
                position: corner.to_array(),
                normal,
                color,
            });
        }
        indices.extend_from_slice(&[
            start,
            start + 1,
            start + 2,
            start,
            start + 2,
            start + 3,
        ]);
    }
    MeshData { vertices, indices }
}

/// Closed cylinder along +Y between `y0` and `y1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn cylinder(
    radius: f32,
    y0: f32,
    y1: f32,
    segments: u32,
    color: [f32; 4],
) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let tau = std::f32::consts::TAU;

    // Side wall: two rings of vertices with radial normals.
    for i in 0..=segments {
        let angle = tau * i as f32 / segments as f32;
        let (sin, cos) = angle.sin_cos();
        let normal = [cos, 0.0, sin];
        for y in [y0, y1] {
            vertices.push(Vertex {
                position: [radius * cos, y, radius * sin],
                normal,
                color,
            });
        }
    }
    for i in 0..segments {
        let a = 2 * i;
        indices.extend_from_slice(&[a, a + 1, a + 3, a, a + 3, a + 2]);
    }

    // Caps: center fan with axial normals.
    for (y, normal_y) in [(y0, -1.0), (y1, 1.0)] {
        let center = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, normal_y, 0.0],
            color,
        });
        for i in 0..=segments {
            let angle = tau * i as f32 / segments as f32;
            let (sin, cos) = angle.sin_cos();
            vertices.push(Vertex {
                position: [radius * cos, y, radius * sin],
                normal: [0.0, normal_y, 0.0],
                color,
            });
        }
        for i in 0..segments {
            let rim = center + 1 + i;
            if normal_y > 0.0 {
                indices.extend_from_slice(&[center, rim + 1, rim]);
            } else {
                indices.extend_from_slice(&[center, rim, rim + 1]);
            }
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The dual-pass identity requires a part's two variants to be the
    /// same geometry; only the baked tint may differ.
    #[test]
    fn variants_share_identical_geometry() {
        for part in Part::ALL {
            let normal = part_mesh(part, false);
            let selected = part_mesh(part, true);
            assert_eq!(normal.indices, selected.indices);
            assert_eq!(normal.vertices.len(), selected.vertices.len());
            for (a, b) in normal.vertices.iter().zip(&selected.vertices) {
                assert_eq!(a.position, b.position);
                assert_eq!(a.normal, b.normal);
            }
        }
    }

    #[test]
    fn highlight_tint_differs_from_every_part_tint() {
        for part in Part::ALL {
            assert_ne!(part_color(part), HIGHLIGHT_COLOR);
        }
    }

    #[test]
    fn meshes_are_non_empty_and_triangulated() {
        for part in Part::ALL {
            let mesh = part_mesh(part, false);
            assert!(!mesh.vertices.is_empty());
            assert_eq!(mesh.indices.len() % 3, 0);
            let max = *mesh.indices.iter().max().unwrap_or(&0);
            assert!((max as usize) < mesh.vertices.len());
        }
    }

    #[test]
    fn side_normals_are_unit_length() {
        let mesh = part_mesh(Part::Pen, false);
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn reference_lines_form_pairs() {
        let lines = reference_lines();
        assert_eq!(lines.len() % 2, 0);
        // 11 + 11 grid lines plus 3 axes.
        assert_eq!(lines.len(), (11 + 11 + 3) * 2);
    }
}
