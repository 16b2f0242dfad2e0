//! UV sphere from latitude/longitude bands.

use std::f32::consts::PI;

use nalgebra::{Point3, Vector3};

use super::{require_positive, require_segments, vertex_budget, ShapeKind};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Sphere centered at the origin.
///
/// Produces `(latitude_bands + 1) * (longitude_bands + 1)` vertices in
/// latitude-major order, starting at the north pole (`theta = 0`). Pole and
/// seam vertices are duplicated so every band has its own ring. Normals are
/// the unit position vectors.
///
/// Each cell emits `(first, second, first + 1)` and
/// `(second, second + 1, first + 1)`.
pub fn sphere(radius: f32, latitude_bands: u32, longitude_bands: u32) -> Result<Mesh, MeshError> {
    let vertex_count = check(radius, latitude_bands, longitude_bands)?;
    let columns = longitude_bands as usize + 1;
    // Bounded by the vertex budget checked above.
    let index_count = 6 * latitude_bands as usize * longitude_bands as usize;
    let mut mesh = Mesh::with_capacity(vertex_count, index_count);

    for lat in 0..=latitude_bands {
        let theta = lat as f32 * PI / latitude_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=longitude_bands {
            let phi = lon as f32 * 2.0 * PI / longitude_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let unit = Vector3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            mesh.push_vertex(Point3::from(unit * radius), unit)?;
        }
    }

    // Fits in u16: vertex_count was checked against the budget above.
    let stride = columns as u16;
    for lat in 0..latitude_bands as u16 {
        for lon in 0..longitude_bands as u16 {
            let first = lat * stride + lon;
            let second = first + stride;
            mesh.push_triangle(first, second, first + 1);
            mesh.push_triangle(second, second + 1, first + 1);
        }
    }

    Ok(mesh)
}

/// Validate parameters, returning the vertex count.
pub(super) fn check(radius: f32, latitude_bands: u32, longitude_bands: u32) -> Result<usize, MeshError> {
    require_positive(ShapeKind::Sphere, "radius", radius)?;
    require_segments(ShapeKind::Sphere, "latitude bands", latitude_bands, 1)?;
    require_segments(ShapeKind::Sphere, "longitude bands", longitude_bands, 1)?;

    let rows = u64::from(latitude_bands) + 1;
    let columns = u64::from(longitude_bands) + 1;
    vertex_budget(rows.checked_mul(columns).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts() {
        for lat in 1..6 {
            for lon in 1..6 {
                let mesh = sphere(1.0, lat, lon).unwrap();
                assert_eq!(mesh.vertex_count(), ((lat + 1) * (lon + 1)) as usize);
                assert_eq!(mesh.indices.len(), (6 * lat * lon) as usize);
                assert!(mesh.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_positions_on_surface() {
        let radius = 2.5;
        let mesh = sphere(radius, 12, 16).unwrap();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert_relative_eq!(p.coords.norm(), radius, epsilon = 1e-5);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(*n, p.coords / radius, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_poles() {
        let mesh = sphere(0.5, 2, 4).unwrap();
        assert_relative_eq!(mesh.positions[0], Point3::new(0.0, 0.5, 0.0));
        let south = mesh.positions[mesh.vertex_count() - 1];
        assert_relative_eq!(south, Point3::new(0.0, -0.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_first_cell_indices() {
        let mesh = sphere(1.0, 3, 4).unwrap();
        // longitude_bands + 1 = 5 vertices per ring
        assert_eq!(&mesh.indices[..6], &[0, 5, 1, 5, 6, 1]);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            sphere(0.0, 4, 4),
            Err(MeshError::NonPositive { .. })
        ));
        assert!(matches!(
            sphere(1.0, 0, 4),
            Err(MeshError::TooFewSegments { parameter: "latitude bands", .. })
        ));
        assert!(matches!(
            sphere(1.0, 4, 0),
            Err(MeshError::TooFewSegments { parameter: "longitude bands", .. })
        ));
    }
}
