//! Shader program setup against an abstract graphics backend.
//!
//! Compile and link failures abort setup with a typed [`ShaderError`];
//! there is no fallback program. Uniform locations are resolved once, right
//! after linking, and read by field afterwards.

use std::fmt;

use crate::error::ShaderError;
use crate::shading::{ShadingModel, Uniform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// The slice of a GPU API needed to build a program.
///
/// Errors are the backend's diagnostic text (info log).
pub trait GraphicsBackend {
    type Shader;
    type Program;
    type UniformLocation;

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    fn link_program(
        &mut self,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, String>;

    fn uniform_location(&mut self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
}

/// Uniform locations resolved at link time.
///
/// `None` either because the model does not declare the uniform or because
/// the driver optimized it away.
#[derive(Debug, Clone)]
pub struct UniformLocations<L> {
    pub projection: Option<L>,
    pub model_view: Option<L>,
    pub normal: Option<L>,
    pub color: Option<L>,
    pub light_direction: Option<L>,
    pub light_position: Option<L>,
}

impl<L> UniformLocations<L> {
    fn empty() -> Self {
        Self {
            projection: None,
            model_view: None,
            normal: None,
            color: None,
            light_direction: None,
            light_position: None,
        }
    }

    fn slot(&mut self, uniform: Uniform) -> &mut Option<L> {
        match uniform {
            Uniform::Projection => &mut self.projection,
            Uniform::ModelView => &mut self.model_view,
            Uniform::Normal => &mut self.normal,
            Uniform::Color => &mut self.color,
            Uniform::LightDirection => &mut self.light_direction,
            Uniform::LightPosition => &mut self.light_position,
        }
    }

    pub fn get(&self, uniform: Uniform) -> Option<&L> {
        match uniform {
            Uniform::Projection => self.projection.as_ref(),
            Uniform::ModelView => self.model_view.as_ref(),
            Uniform::Normal => self.normal.as_ref(),
            Uniform::Color => self.color.as_ref(),
            Uniform::LightDirection => self.light_direction.as_ref(),
            Uniform::LightPosition => self.light_position.as_ref(),
        }
    }
}

/// A linked program for one shading model.
#[derive(Debug)]
pub struct ShaderProgram<P, L> {
    pub model: ShadingModel,
    pub program: P,
    pub uniforms: UniformLocations<L>,
}

impl<P, L> ShaderProgram<P, L> {
    /// Compile both stages, link, and resolve the model's uniforms.
    pub fn build<B>(backend: &mut B, model: ShadingModel) -> Result<Self, ShaderError>
    where
        B: GraphicsBackend<Program = P, UniformLocation = L>,
    {
        let vertex = compile(backend, ShaderStage::Vertex, model.vertex_source())?;
        let fragment = compile(backend, ShaderStage::Fragment, model.fragment_source())?;

        let program = backend.link_program(&vertex, &fragment).map_err(|log| {
            tracing::error!(%model, %log, "error linking program");
            ShaderError::Link { log }
        })?;

        let mut uniforms = UniformLocations::empty();
        for &uniform in model.uniforms() {
            let location = backend.uniform_location(&program, uniform.name());
            if location.is_none() {
                tracing::warn!(%model, uniform = uniform.name(), "uniform not active in program");
            }
            *uniforms.slot(uniform) = location;
        }

        tracing::debug!(%model, "shader program ready");
        Ok(Self {
            model,
            program,
            uniforms,
        })
    }
}

fn compile<B: GraphicsBackend>(
    backend: &mut B,
    stage: ShaderStage,
    source: &str,
) -> Result<B::Shader, ShaderError> {
    backend.compile_shader(stage, source).map_err(|log| {
        tracing::error!(%stage, %log, "error compiling shader");
        ShaderError::Compile { stage, log }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out sequential ids and records every call.
    #[derive(Default)]
    struct RecordingBackend {
        fail_stage: Option<ShaderStage>,
        fail_link: bool,
        missing_uniform: Option<&'static str>,
        compiled: Vec<ShaderStage>,
        lookups: Vec<String>,
    }

    impl GraphicsBackend for RecordingBackend {
        type Shader = usize;
        type Program = &'static str;
        type UniformLocation = String;

        fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<usize, String> {
            assert!(source.contains("void main()"));
            if self.fail_stage == Some(stage) {
                return Err(format!("ERROR: 0:1: {stage} syntax error"));
            }
            self.compiled.push(stage);
            Ok(self.compiled.len())
        }

        fn link_program(&mut self, vertex: &usize, fragment: &usize) -> Result<&'static str, String> {
            assert_eq!((*vertex, *fragment), (1, 2));
            if self.fail_link {
                Err("varying vNormal not written by vertex shader".to_string())
            } else {
                Ok("program")
            }
        }

        fn uniform_location(&mut self, program: &&'static str, name: &str) -> Option<String> {
            assert_eq!(*program, "program");
            self.lookups.push(name.to_string());
            if self.missing_uniform == Some(name) {
                None
            } else {
                Some(format!("loc:{name}"))
            }
        }
    }

    #[test]
    fn test_build_caches_declared_uniforms() {
        let mut backend = RecordingBackend::default();
        let program = ShaderProgram::build(&mut backend, ShadingModel::DiffuseSpecular).unwrap();

        assert_eq!(backend.compiled, vec![ShaderStage::Vertex, ShaderStage::Fragment]);
        assert_eq!(backend.lookups.len(), ShadingModel::DiffuseSpecular.uniforms().len());
        assert_eq!(program.uniforms.normal.as_deref(), Some("loc:uNormalMatrix"));
        assert_eq!(
            program.uniforms.get(Uniform::LightDirection).map(String::as_str),
            Some("loc:uLightDirection")
        );
        assert!(program.uniforms.light_position.is_none());
    }

    #[test]
    fn test_compile_failure_is_typed() {
        let mut backend = RecordingBackend {
            fail_stage: Some(ShaderStage::Fragment),
            ..Default::default()
        };
        let err = ShaderProgram::build(&mut backend, ShadingModel::FlatColor).unwrap_err();
        assert_eq!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                log: "ERROR: 0:1: fragment syntax error".to_string()
            }
        );
        assert!(backend.lookups.is_empty());
    }

    #[test]
    fn test_link_failure_is_typed() {
        let mut backend = RecordingBackend {
            fail_link: true,
            ..Default::default()
        };
        let err = ShaderProgram::build(&mut backend, ShadingModel::PointLight).unwrap_err();
        assert!(matches!(err, ShaderError::Link { ref log } if log.contains("vNormal")));
        assert!(err.to_string().starts_with("failed to link program"));
    }

    #[test]
    fn test_inactive_uniform_is_tolerated() {
        let mut backend = RecordingBackend {
            missing_uniform: Some("uColor"),
            ..Default::default()
        };
        let program = ShaderProgram::build(&mut backend, ShadingModel::FlatColor).unwrap();
        assert!(program.uniforms.color.is_none());
        assert!(program.uniforms.projection.is_some());
    }
}
