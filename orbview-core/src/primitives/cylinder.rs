//! Capped cylinder around the Y axis.

use std::f32::consts::PI;

use nalgebra::{Point3, Vector3};

use super::{require_positive, require_segments, vertex_budget, ShapeKind};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Cylinder centered at the origin, `height` along Y.
///
/// Vertex layout:
/// - `0..=n`: top ring at `y = +height/2`, normal `+Y`
/// - `n+1..=2n+1`: bottom ring at `y = -height/2`, normal `-Y`
/// - `2n+2`: top cap center, `2n+3`: bottom cap center
///
/// where `n = radial_segments`. Each ring repeats its first point at the end;
/// faces wrap with `(i + 1) % n` and never touch the duplicate. Side vertices
/// share the cap normals, so the side shades flat.
pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> Result<Mesh, MeshError> {
    let vertex_count = check(radius, height, radial_segments)?;
    let n = radial_segments as usize;
    let mut mesh = Mesh::with_capacity(vertex_count, 12 * n);
    let half = height / 2.0;

    for (y, normal) in [(half, Vector3::y()), (-half, -Vector3::y())] {
        for i in 0..=n {
            let angle = i as f32 * 2.0 * PI / n as f32;
            let (sin, cos) = angle.sin_cos();
            mesh.push_vertex(Point3::new(radius * cos, y, radius * sin), normal)?;
        }
    }
    let top_center = mesh.push_vertex(Point3::new(0.0, half, 0.0), Vector3::y())?;
    let bottom_center = mesh.push_vertex(Point3::new(0.0, -half, 0.0), -Vector3::y())?;

    let ring = radial_segments as u16 + 1;
    let segments = radial_segments as u16;
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (top, top_next) = (i, next);
        let (bottom, bottom_next) = (ring + i, ring + next);

        mesh.push_triangle(top, bottom, top_next);
        mesh.push_triangle(bottom, bottom_next, top_next);
        mesh.push_triangle(top_center, top, top_next);
        mesh.push_triangle(bottom_center, bottom_next, bottom);
    }

    Ok(mesh)
}

/// Validate parameters, returning the vertex count.
pub(super) fn check(radius: f32, height: f32, radial_segments: u32) -> Result<usize, MeshError> {
    require_positive(ShapeKind::Cylinder, "radius", radius)?;
    require_positive(ShapeKind::Cylinder, "height", height)?;
    require_segments(ShapeKind::Cylinder, "radial segments", radial_segments, 3)?;

    vertex_budget(2 * u64::from(radial_segments) + 4)
}
