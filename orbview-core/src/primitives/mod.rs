//! Primitive solids.
//!
//! Sphere, cylinder and cone are tessellated from their parameters; cube and
//! pyramid come from literal tables. Every generator winds its triangles
//! clockwise as seen from outside the solid (the sphere's index order fixes
//! the convention), and carries orientation in the explicit normals.

mod cone;
mod cylinder;
mod sphere;
mod tables;

use std::fmt;
use std::str::FromStr;

use crate::config::{
    DEFAULT_HEIGHT, DEFAULT_LATITUDE_BANDS, DEFAULT_LONGITUDE_BANDS, DEFAULT_RADIAL_SEGMENTS,
    DEFAULT_RADIUS, MAX_VERTICES,
};
use crate::error::{DescriptorError, MeshError};
use crate::mesh::Mesh;

pub use cone::cone;
pub use cylinder::cylinder;
pub use sphere::sphere;
pub use tables::{cube, pyramid};

/// Which primitive to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Sphere,
    Cylinder,
    Cone,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive together with its tessellation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cube,
    Pyramid,
    Sphere {
        radius: f32,
        latitude_bands: u32,
        longitude_bands: u32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
}

impl Shape {
    /// The shape of the given kind with default parameters.
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Cube => Shape::Cube,
            ShapeKind::Pyramid => Shape::Pyramid,
            ShapeKind::Sphere => Shape::Sphere {
                radius: DEFAULT_RADIUS,
                latitude_bands: DEFAULT_LATITUDE_BANDS,
                longitude_bands: DEFAULT_LONGITUDE_BANDS,
            },
            ShapeKind::Cylinder => Shape::Cylinder {
                radius: DEFAULT_RADIUS,
                height: DEFAULT_HEIGHT,
                radial_segments: DEFAULT_RADIAL_SEGMENTS,
            },
            ShapeKind::Cone => Shape::Cone {
                radius: DEFAULT_RADIUS,
                height: DEFAULT_HEIGHT,
                radial_segments: DEFAULT_RADIAL_SEGMENTS,
            },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Cube => ShapeKind::Cube,
            Shape::Pyramid => ShapeKind::Pyramid,
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
            Shape::Cone { .. } => ShapeKind::Cone,
        }
    }

    /// Check parameters without generating anything.
    pub fn validate(&self) -> Result<(), MeshError> {
        match *self {
            Shape::Cube | Shape::Pyramid => Ok(()),
            Shape::Sphere {
                radius,
                latitude_bands,
                longitude_bands,
            } => sphere::check(radius, latitude_bands, longitude_bands).map(|_| ()),
            Shape::Cylinder {
                radius,
                height,
                radial_segments,
            } => cylinder::check(radius, height, radial_segments).map(|_| ()),
            Shape::Cone {
                radius,
                height,
                radial_segments,
            } => cone::check(radius, height, radial_segments).map(|_| ()),
        }
    }

    /// Generate the mesh for this shape.
    pub fn mesh(&self) -> Result<Mesh, MeshError> {
        let mesh = match *self {
            Shape::Cube => cube(),
            Shape::Pyramid => pyramid(),
            Shape::Sphere {
                radius,
                latitude_bands,
                longitude_bands,
            } => sphere(radius, latitude_bands, longitude_bands)?,
            Shape::Cylinder {
                radius,
                height,
                radial_segments,
            } => cylinder(radius, height, radial_segments)?,
            Shape::Cone {
                radius,
                height,
                radial_segments,
            } => cone(radius, height, radial_segments)?,
        };
        tracing::debug!(
            shape = %self.kind(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "generated mesh"
        );
        Ok(mesh)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Cube
    }
}

impl From<ShapeKind> for Shape {
    fn from(kind: ShapeKind) -> Self {
        Shape::default_for(kind)
    }
}

impl FromStr for Shape {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::descriptor::parse_shape(s)
    }
}

fn require_positive(shape: ShapeKind, parameter: &'static str, value: f32) -> Result<(), MeshError> {
    // Written so NaN fails too.
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::NonPositive {
            shape,
            parameter,
            value,
        })
    }
}

fn require_segments(
    shape: ShapeKind,
    parameter: &'static str,
    value: u32,
    min: u32,
) -> Result<(), MeshError> {
    if value >= min {
        Ok(())
    } else {
        Err(MeshError::TooFewSegments {
            shape,
            parameter,
            value,
            min,
        })
    }
}

/// Counts are computed in `u64` so they cannot wrap where `usize` is 32 bits.
fn vertex_budget(count: u64) -> Result<usize, MeshError> {
    match usize::try_from(count) {
        Ok(count) if count <= MAX_VERTICES => Ok(count),
        _ => Err(MeshError::TooManyVertices {
            count: usize::try_from(count).unwrap_or(usize::MAX),
            max: MAX_VERTICES,
        }),
    }
}
