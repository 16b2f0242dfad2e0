//! Error types for mesh generation, shader program setup and shape
//! descriptor parsing.

use thiserror::Error;

use crate::primitives::ShapeKind;
use crate::shader::ShaderStage;

/// Errors raised while generating or validating a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A length parameter was zero, negative or NaN.
    #[error("{shape} {parameter} must be positive, got {value}")]
    NonPositive {
        shape: ShapeKind,
        parameter: &'static str,
        value: f32,
    },

    /// Not enough tessellation segments to close the surface.
    #[error("{shape} {parameter} must be at least {min}, got {value}")]
    TooFewSegments {
        shape: ShapeKind,
        parameter: &'static str,
        value: u32,
        min: u32,
    },

    /// The mesh would not fit in a u16 index buffer.
    #[error("too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },

    #[error("index count {0} is not a multiple of 3")]
    RaggedIndices(usize),

    #[error("{normals} normals for {positions} positions")]
    NormalCountMismatch { positions: usize, normals: usize },
}

/// Shader program setup failures.
///
/// Both carry the diagnostic text reported by the graphics backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link program: {log}")]
    Link { log: String },
}

/// Errors from parsing a shape descriptor such as `sphere(0.5, 30, 30)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("malformed shape descriptor {input:?}")]
    Syntax { input: String },

    #[error("unknown shape {0:?}")]
    UnknownShape(String),

    #[error("{shape} takes at most {max} arguments, got {found}")]
    Arity {
        shape: ShapeKind,
        max: usize,
        found: usize,
    },

    #[error("{shape} {parameter} must be a whole number, got {value}")]
    NotAnInteger {
        shape: ShapeKind,
        parameter: &'static str,
        value: f32,
    },

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shading model {0:?}")]
pub struct UnknownShadingModel(pub String);
