//! orbview core library - procedural primitives and camera composition.
//!
//! Everything here is pure: mesh generation, the orbit/pan/zoom camera and
//! the matrices derived from it, shading models, the shader-program build
//! pipeline over an abstract graphics backend, and the frame loop that the
//! terminal and web front ends drive.

pub mod camera;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod input;
pub mod mesh;
pub mod primitives;
pub mod projection;
pub mod scene;
pub mod shader;
pub mod shading;
pub mod transform;

// Re-export commonly used types
pub use camera::{CameraState, TransformBundle};
pub use config::{ControlConfig, ProjectionConfig, ViewerConfig};
pub use descriptor::parse_shape;
pub use error::{DescriptorError, MeshError, ShaderError, UnknownShadingModel};
pub use input::{CameraController, InputEvent, Key, PointerButton};
pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::{Shape, ShapeKind};
pub use projection::{ScreenPoint, Viewport};
pub use scene::{Frame, FrameHandler, RenderLoop, SceneState, StopSignal};
pub use shader::{GraphicsBackend, ShaderProgram, ShaderStage, UniformLocations};
pub use shading::{Rgb, ShadingModel, SurfaceSample, Uniform};
pub use transform::{RotationState, Transform};
