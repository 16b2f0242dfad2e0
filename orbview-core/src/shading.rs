//! Shading models: GLSL sources for GPU front ends and an equivalent CPU
//! evaluation for the software rasterizer.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};

use crate::config::{AMBIENT, BASE_COLOR, LIGHT_DIRECTION, POINT_LIGHT_POSITION, SHININESS};
use crate::error::UnknownShadingModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingModel {
    /// One constant color, unlit.
    FlatColor,
    /// Color derived from the object-space normal, unlit.
    VertexColor,
    /// Ambient + Lambert + Blinn-Phong against a directional light.
    #[default]
    DiffuseSpecular,
    /// Ambient + Lambert against a point light.
    PointLight,
}

/// Uniforms a shading model may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Projection,
    ModelView,
    Normal,
    Color,
    LightDirection,
    LightPosition,
}

impl Uniform {
    pub fn name(self) -> &'static str {
        match self {
            Uniform::Projection => "uProjectionMatrix",
            Uniform::ModelView => "uModelViewMatrix",
            Uniform::Normal => "uNormalMatrix",
            Uniform::Color => "uColor",
            Uniform::LightDirection => "uLightDirection",
            Uniform::LightPosition => "uLightPosition",
        }
    }
}

/// Vertex attribute names shared by every vertex shader.
pub const POSITION_ATTRIBUTE: &str = "aPosition";
pub const NORMAL_ATTRIBUTE: &str = "aNormal";

const BASIC_VERTEX: &str = r#"
attribute vec3 aPosition;
uniform mat4 uProjectionMatrix;
uniform mat4 uModelViewMatrix;
void main() {
  gl_Position = uProjectionMatrix * uModelViewMatrix * vec4(aPosition, 1.0);
}
"#;

const VERTEX_COLOR_VERTEX: &str = r#"
attribute vec3 aPosition;
attribute vec3 aNormal;
uniform mat4 uProjectionMatrix;
uniform mat4 uModelViewMatrix;
varying vec3 vColor;
void main() {
  vColor = aNormal * 0.5 + 0.5;
  gl_Position = uProjectionMatrix * uModelViewMatrix * vec4(aPosition, 1.0);
}
"#;

const LIT_VERTEX: &str = r#"
attribute vec3 aPosition;
attribute vec3 aNormal;
uniform mat4 uProjectionMatrix;
uniform mat4 uModelViewMatrix;
uniform mat4 uNormalMatrix;
varying vec3 vNormal;
varying vec3 vPosition;
void main() {
  vec4 eye = uModelViewMatrix * vec4(aPosition, 1.0);
  vPosition = eye.xyz;
  vNormal = (uNormalMatrix * vec4(aNormal, 0.0)).xyz;
  gl_Position = uProjectionMatrix * eye;
}
"#;

const FLAT_FRAGMENT: &str = r#"
precision mediump float;
uniform vec3 uColor;
void main() {
  gl_FragColor = vec4(uColor, 1.0);
}
"#;

const VERTEX_COLOR_FRAGMENT: &str = r#"
precision mediump float;
varying vec3 vColor;
void main() {
  gl_FragColor = vec4(vColor, 1.0);
}
"#;

const DIFFUSE_SPECULAR_FRAGMENT: &str = r#"
precision mediump float;
uniform vec3 uColor;
uniform vec3 uLightDirection;
varying vec3 vNormal;
varying vec3 vPosition;
void main() {
  vec3 n = normalize(vNormal);
  vec3 l = normalize(uLightDirection);
  float diffuse = max(dot(n, l), 0.0);
  float specular = 0.0;
  if (diffuse > 0.0) {
    vec3 h = normalize(l + normalize(-vPosition));
    specular = pow(max(dot(n, h), 0.0), 32.0);
  }
  vec3 color = uColor * (0.2 + diffuse) + vec3(specular);
  gl_FragColor = vec4(min(color, vec3(1.0)), 1.0);
}
"#;

const POINT_LIGHT_FRAGMENT: &str = r#"
precision mediump float;
uniform vec3 uColor;
uniform vec3 uLightPosition;
varying vec3 vNormal;
varying vec3 vPosition;
void main() {
  vec3 n = normalize(vNormal);
  vec3 l = normalize(uLightPosition - vPosition);
  float diffuse = max(dot(n, l), 0.0);
  gl_FragColor = vec4(min(uColor * (0.2 + diffuse), vec3(1.0)), 1.0);
}
"#;

/// Linear RGB in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    fn from_vector(v: Vector3<f32>) -> Self {
        Self::new(v.x.min(1.0), v.y.min(1.0), v.z.min(1.0))
    }

    /// Rec. 709 luma.
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn to_u8(&self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// A point on a surface, as the shaders see it.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSample {
    pub normal_object: Vector3<f32>,
    pub normal_eye: Vector3<f32>,
    pub position_eye: Point3<f32>,
}

impl ShadingModel {
    pub const ALL: [ShadingModel; 4] = [
        ShadingModel::FlatColor,
        ShadingModel::VertexColor,
        ShadingModel::DiffuseSpecular,
        ShadingModel::PointLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShadingModel::FlatColor => "flat-color",
            ShadingModel::VertexColor => "vertex-color",
            ShadingModel::DiffuseSpecular => "diffuse-specular",
            ShadingModel::PointLight => "point-light",
        }
    }

    pub fn vertex_source(self) -> &'static str {
        match self {
            ShadingModel::FlatColor => BASIC_VERTEX,
            ShadingModel::VertexColor => VERTEX_COLOR_VERTEX,
            ShadingModel::DiffuseSpecular | ShadingModel::PointLight => LIT_VERTEX,
        }
    }

    pub fn fragment_source(self) -> &'static str {
        match self {
            ShadingModel::FlatColor => FLAT_FRAGMENT,
            ShadingModel::VertexColor => VERTEX_COLOR_FRAGMENT,
            ShadingModel::DiffuseSpecular => DIFFUSE_SPECULAR_FRAGMENT,
            ShadingModel::PointLight => POINT_LIGHT_FRAGMENT,
        }
    }

    /// Uniforms declared by this model's shaders.
    pub fn uniforms(self) -> &'static [Uniform] {
        use Uniform::*;
        match self {
            ShadingModel::FlatColor => &[Projection, ModelView, Color],
            ShadingModel::VertexColor => &[Projection, ModelView],
            ShadingModel::DiffuseSpecular => {
                &[Projection, ModelView, Normal, Color, LightDirection]
            }
            ShadingModel::PointLight => &[Projection, ModelView, Normal, Color, LightPosition],
        }
    }

    pub fn uses_normals(self) -> bool {
        !matches!(self, ShadingModel::FlatColor)
    }

    /// CPU equivalent of the fragment shader.
    pub fn shade(self, sample: &SurfaceSample) -> Rgb {
        let base = Vector3::from(BASE_COLOR);
        match self {
            ShadingModel::FlatColor => Rgb::from_vector(base),
            ShadingModel::VertexColor => {
                Rgb::from_vector(sample.normal_object.map(|c| c * 0.5 + 0.5))
            }
            ShadingModel::DiffuseSpecular => {
                let n = sample.normal_eye.normalize();
                let l = Vector3::from(LIGHT_DIRECTION).normalize();
                let diffuse = n.dot(&l).max(0.0);
                let specular = if diffuse > 0.0 {
                    let view = (-sample.position_eye.coords).normalize();
                    let h = (l + view).normalize();
                    n.dot(&h).max(0.0).powf(SHININESS)
                } else {
                    0.0
                };
                Rgb::from_vector(base * (AMBIENT + diffuse) + Vector3::repeat(specular))
            }
            ShadingModel::PointLight => {
                let n = sample.normal_eye.normalize();
                let l = (Point3::from(POINT_LIGHT_POSITION) - sample.position_eye).normalize();
                let diffuse = n.dot(&l).max(0.0);
                Rgb::from_vector(base * (AMBIENT + diffuse))
            }
        }
    }
}

impl fmt::Display for ShadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadingModel {
    type Err = UnknownShadingModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownShadingModel(s.to_string()))
    }
}
