//! Indexed triangle meshes and the vertex/triangle views used by renderers.

use nalgebra::{Point3, Vector3};

use crate::config::MAX_VERTICES;
use crate::error::MeshError;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle resolved from a mesh's index buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Geometric normal from the winding order (not normalized).
    pub fn face_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        (v1 - v0).cross(&(v2 - v0))
    }

    pub fn centroid(&self) -> Point3<f32> {
        let sum = self.vertices[0].position.coords
            + self.vertices[1].position.coords
            + self.vertices[2].position.coords;
        Point3::from(sum / 3.0)
    }
}

/// Floats per vertex in [`Mesh::interleaved`]: position then normal.
pub const FLOATS_PER_VERTEX: usize = 6;

/// Byte stride of one interleaved vertex.
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Indexed triangle mesh with one normal per position.
///
/// Invariants (checked by [`Mesh::validate`]):
/// - every index is below `positions.len()`
/// - `indices.len()` is a multiple of 3
/// - `normals.len() == positions.len()`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Build a mesh from literal tables. Does not validate.
    pub fn from_tables(positions: &[[f32; 3]], normals: &[[f32; 3]], indices: &[u16]) -> Self {
        Self {
            positions: positions.iter().map(|p| Point3::from(*p)).collect(),
            normals: normals.iter().map(|n| Vector3::from(*n)).collect(),
            indices: indices.to_vec(),
        }
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(
        &mut self,
        position: Point3<f32>,
        normal: Vector3<f32>,
    ) -> Result<u16, MeshError> {
        let index = u16::try_from(self.positions.len()).map_err(|_| {
            MeshError::TooManyVertices {
                count: self.positions.len() + 1,
                max: MAX_VERTICES,
            }
        })?;
        self.positions.push(position);
        self.normals.push(normal);
        Ok(index)
    }

    pub fn push_triangle(&mut self, a: u16, b: u16, c: u16) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, index: u16) -> Vertex {
        let i = index as usize;
        Vertex {
            position: self.positions[i],
            normal: self.normals[i],
        }
    }

    /// Iterate over the triangles described by the index buffer.
    ///
    /// Panics on out-of-range indices; call [`Mesh::validate`] first on
    /// meshes not produced by this crate.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| Triangle::new(self.vertex(t[0]), self.vertex(t[1]), self.vertex(t[2])))
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.indices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: self.positions.len(),
            });
        }
        Ok(())
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    /// `[px, py, pz, nx, ny, nz]` per vertex.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.positions.len() * FLOATS_PER_VERTEX);
        for (p, n) in self.positions.iter().zip(&self.normals) {
            data.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
        data
    }

    /// Interleaved vertex data as little-endian bytes, ready for upload.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        self.interleaved()
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect()
    }

    /// Index buffer as little-endian bytes, ready for upload.
    pub fn index_bytes(&self) -> Vec<u8> {
        self.indices.iter().flat_map(|i| i.to_le_bytes()).collect()
    }
}
