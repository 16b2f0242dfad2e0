//! WebGL2 implementation of the core graphics backend, plus mesh upload.

use orbview_core::mesh::VERTEX_STRIDE;
use orbview_core::shading::{NORMAL_ATTRIBUTE, POSITION_ATTRIBUTE};
use orbview_core::{GraphicsBackend, Mesh, ShaderStage};
use wasm_bindgen::JsValue;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
};

pub struct WebGlBackend {
    gl: GL,
}

impl WebGlBackend {
    pub fn new(gl: GL) -> Self {
        Self { gl }
    }
}

impl GraphicsBackend for WebGlBackend {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type UniformLocation = WebGlUniformLocation;

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<WebGlShader, String> {
        let shader_type = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(shader_type)
            .ok_or_else(|| "Failed to create shader".to_string())?;

        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !compiled {
            let log = self
                .gl
                .get_shader_info_log(&shader)
                .unwrap_or_else(|| "Unknown error".to_string());
            self.gl.delete_shader(Some(&shader));
            return Err(log);
        }

        Ok(shader)
    }

    fn link_program(
        &mut self,
        vertex: &WebGlShader,
        fragment: &WebGlShader,
    ) -> Result<WebGlProgram, String> {
        let program = self
            .gl
            .create_program()
            .ok_or_else(|| "Failed to create program".to_string())?;

        self.gl.attach_shader(&program, vertex);
        self.gl.attach_shader(&program, fragment);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = self
                .gl
                .get_program_info_log(&program)
                .unwrap_or_else(|| "Unknown error".to_string());
            self.gl.delete_program(Some(&program));
            return Err(log);
        }

        Ok(program)
    }

    fn uniform_location(
        &mut self,
        program: &WebGlProgram,
        name: &str,
    ) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }
}

/// GPU copy of the current mesh.
pub struct MeshBuffers {
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
}

impl MeshBuffers {
    pub fn upload(gl: &GL, mesh: &Mesh) -> Result<Self, JsValue> {
        let vertex_buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("Failed to create vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, &mesh.vertex_bytes(), GL::STATIC_DRAW);

        let index_buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("Failed to create index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        gl.buffer_data_with_u8_array(
            GL::ELEMENT_ARRAY_BUFFER,
            &mesh.index_bytes(),
            GL::STATIC_DRAW,
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as i32,
        })
    }

    /// Bind both buffers and point the program's attributes at the
    /// interleaved position/normal layout.
    pub fn bind(&self, gl: &GL, program: &WebGlProgram) {
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.vertex_buffer));
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&self.index_buffer));

        let stride = VERTEX_STRIDE as i32;
        for (name, offset) in [(POSITION_ATTRIBUTE, 0), (NORMAL_ATTRIBUTE, 3 * 4)] {
            // -1 when the program has no such attribute
            let location = gl.get_attrib_location(program, name);
            if location >= 0 {
                let location = location as u32;
                gl.vertex_attrib_pointer_with_i32(location, 3, GL::FLOAT, false, stride, offset);
                gl.enable_vertex_attrib_array(location);
            }
        }
    }

    pub fn draw(&self, gl: &GL) {
        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
    }

    pub fn delete(&self, gl: &GL) {
        gl.delete_buffer(Some(&self.vertex_buffer));
        gl.delete_buffer(Some(&self.index_buffer));
    }
}
