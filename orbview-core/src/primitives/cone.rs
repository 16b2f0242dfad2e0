//! Cone with its apex on +Y.

use std::f32::consts::PI;

use nalgebra::{Point3, Vector3};

use super::{require_positive, require_segments, vertex_budget, ShapeKind};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Cone centered at the origin: apex at `y = +height/2`, base at `-height/2`.
///
/// Vertex layout, with `n = radial_segments`:
/// - `0`: apex, normal `+Y`
/// - `1..=n+1`: base ring, normal `-Y`, last point repeats the first
/// - `n+2`: base center
///
/// The side fans from the apex around the ring, wrapping back to index 1.
/// The base fans from the center in the opposite direction: `n - 1`
/// triangles over consecutive ring points, then one closing triangle from
/// the last ring point back to index 1.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Result<Mesh, MeshError> {
    let vertex_count = check(radius, height, radial_segments)?;
    let n = radial_segments as usize;
    let mut mesh = Mesh::with_capacity(vertex_count, 6 * n);
    let half = height / 2.0;

    let apex = mesh.push_vertex(Point3::new(0.0, half, 0.0), Vector3::y())?;
    for i in 0..=n {
        let angle = i as f32 * 2.0 * PI / n as f32;
        let (sin, cos) = angle.sin_cos();
        mesh.push_vertex(Point3::new(radius * cos, -half, radius * sin), -Vector3::y())?;
    }
    // Index equals the number of vertices emitted so far.
    let center = mesh.push_vertex(Point3::new(0.0, -half, 0.0), -Vector3::y())?;

    let segments = radial_segments as u16;
    for i in 1..=segments {
        let next = if i + 1 > segments { 1 } else { i + 1 };
        mesh.push_triangle(apex, i, next);
    }

    for i in 1..segments {
        mesh.push_triangle(center, i + 1, i);
    }
    mesh.push_triangle(center, 1, segments);

    Ok(mesh)
}

/// Validate parameters, returning the vertex count.
pub(super) fn check(radius: f32, height: f32, radial_segments: u32) -> Result<usize, MeshError> {
    require_positive(ShapeKind::Cone, "radius", radius)?;
    require_positive(ShapeKind::Cone, "height", height)?;
    require_segments(ShapeKind::Cone, "radial segments", radial_segments, 3)?;

    vertex_budget(u64::from(radial_segments) + 3)
}
