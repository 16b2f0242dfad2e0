//! Literal vertex tables for the unit cube and pyramid.

use crate::mesh::Mesh;

const H: f32 = 0.5;

/// 4 vertices per face, listed counter-clockwise seen from outside.
const CUBE_POSITIONS: [[f32; 3]; 24] = [
    // front
    [-H, -H, H],
    [H, -H, H],
    [H, H, H],
    [-H, H, H],
    // back
    [H, -H, -H],
    [-H, -H, -H],
    [-H, H, -H],
    [H, H, -H],
    // top
    [-H, H, H],
    [H, H, H],
    [H, H, -H],
    [-H, H, -H],
    // bottom
    [-H, -H, -H],
    [H, -H, -H],
    [H, -H, H],
    [-H, -H, H],
    // right
    [H, -H, H],
    [H, -H, -H],
    [H, H, -H],
    [H, H, H],
    // left
    [-H, -H, -H],
    [-H, -H, H],
    [-H, H, H],
    [-H, H, -H],
];

const CUBE_FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 2, 1,    0, 3, 2,
    4, 6, 5,    4, 7, 6,
    8, 10, 9,   8, 11, 10,
    12, 14, 13, 12, 15, 14,
    16, 18, 17, 16, 19, 18,
    20, 22, 21, 20, 23, 22,
];

/// Apex, then the base corners going front-left, front-right, back-right,
/// back-left.
const PYRAMID_POSITIONS: [[f32; 3]; 5] = [
    [0.0, H, 0.0],
    [-H, -H, H],
    [H, -H, H],
    [H, -H, -H],
    [-H, -H, -H],
];

#[rustfmt::skip]
const PYRAMID_INDICES: [u16; 18] = [
    // sides
    0, 2, 1,
    0, 3, 2,
    0, 4, 3,
    0, 1, 4,
    // base
    1, 2, 3,
    1, 3, 4,
];

/// Axis-aligned unit cube with per-face normals.
pub fn cube() -> Mesh {
    let mut normals = [[0.0; 3]; 24];
    for (i, normal) in normals.iter_mut().enumerate() {
        *normal = CUBE_FACE_NORMALS[i / 4];
    }
    Mesh::from_tables(&CUBE_POSITIONS, &normals, &CUBE_INDICES)
}

/// Square pyramid of unit height and base. Corners are shared between
/// faces, so each normal points along its vertex position.
pub fn pyramid() -> Mesh {
    let normals = PYRAMID_POSITIONS.map(|[x, y, z]| {
        let len = (x * x + y * y + z * z).sqrt();
        [x / len, y / len, z / len]
    });
    Mesh::from_tables(&PYRAMID_POSITIONS, &normals, &PYRAMID_INDICES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::assert_clockwise_from_outside;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate().is_ok());
        assert_clockwise_from_outside(&mesh);

        // every face normal is perpendicular to its face and points outward
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert_relative_eq!(p.coords.dot(n), 0.5);
        }
    }

    #[test]
    fn test_pyramid() {
        let mesh = pyramid();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.indices.len(), 18);
        assert!(mesh.validate().is_ok());
        assert_clockwise_from_outside(&mesh);
        for n in &mesh.normals {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
        }
    }
}
