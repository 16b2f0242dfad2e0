//! orbview Web - WASM/WebGL2 front end.
//!
//! JavaScript owns the canvas, the DOM events and `requestAnimationFrame`;
//! it forwards events to a [`WebRenderer`] and calls [`WebRenderer::frame`]
//! once per animation frame.

use orbview_core::config::{BASE_COLOR, LIGHT_DIRECTION, POINT_LIGHT_POSITION};
use orbview_core::{
    parse_shape, Frame, FrameHandler, InputEvent, Key, PointerButton, RenderLoop, SceneState,
    ShaderProgram, ShadingModel, Shape, Uniform, ViewerConfig, Viewport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlUniformLocation,
};

mod backend;

pub use backend::{MeshBuffers, WebGlBackend};

type Program = ShaderProgram<WebGlProgram, WebGlUniformLocation>;

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn build_program(backend: &mut WebGlBackend, model: ShadingModel) -> Result<Program, JsValue> {
    ShaderProgram::build(backend, model).map_err(|err| {
        let message = to_js(&err);
        console::error_1(&message);
        message
    })
}

/// Browser button numbering: 0 main, 2 secondary.
fn pointer_button(button: i16) -> PointerButton {
    match button {
        0 => PointerButton::Primary,
        2 => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

/// Map a `KeyboardEvent.key` value.
fn key_from_name(name: &str) -> Option<Key> {
    let key = match name {
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
    };
    Some(key)
}

/// Draws frames into the canvas's WebGL2 context.
struct CanvasHandler {
    gl: GL,
    program: Program,
    buffers: MeshBuffers,
    mesh_dirty: bool,
    viewport: Viewport,
    pending: Vec<InputEvent>,
}

impl CanvasHandler {
    fn set_uniforms(&self, frame: &Frame<'_>) {
        let gl = &self.gl;
        for &uniform in self.program.model.uniforms() {
            let location = self.program.uniforms.get(uniform);
            match uniform {
                Uniform::Projection => {
                    gl.uniform_matrix4fv_with_f32_array(
                        location,
                        false,
                        frame.transforms.projection.as_slice(),
                    );
                }
                Uniform::ModelView => {
                    gl.uniform_matrix4fv_with_f32_array(
                        location,
                        false,
                        frame.transforms.model_view.as_slice(),
                    );
                }
                Uniform::Normal => {
                    gl.uniform_matrix4fv_with_f32_array(
                        location,
                        false,
                        frame.transforms.normal.as_slice(),
                    );
                }
                Uniform::Color => {
                    let [r, g, b] = BASE_COLOR;
                    gl.uniform3f(location, r, g, b);
                }
                Uniform::LightDirection => {
                    let [x, y, z] = LIGHT_DIRECTION;
                    gl.uniform3f(location, x, y, z);
                }
                Uniform::LightPosition => {
                    let [x, y, z] = POINT_LIGHT_POSITION;
                    gl.uniform3f(location, x, y, z);
                }
            }
        }
    }
}

impl FrameHandler for CanvasHandler {
    type Error = JsValue;

    fn prepare(&mut self, scene: &mut SceneState) -> Result<Viewport, JsValue> {
        for event in self.pending.drain(..) {
            scene.handle_input(event);
        }
        Ok(self.viewport)
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), JsValue> {
        let gl = &self.gl;
        if self.mesh_dirty {
            let buffers = MeshBuffers::upload(gl, frame.mesh)?;
            self.buffers.delete(gl);
            self.buffers = buffers;
            self.mesh_dirty = false;
        }

        gl.viewport(
            0,
            0,
            frame.viewport.width as i32,
            frame.viewport.height as i32,
        );
        gl.clear_color(0.1, 0.1, 0.1, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program.program));
        self.set_uniforms(frame);
        self.buffers.bind(gl, &self.program.program);
        self.buffers.draw(gl);
        Ok(())
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    scene: SceneState,
    render_loop: RenderLoop,
    backend: WebGlBackend,
    handler: CanvasHandler,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the `<canvas>` with the given id and show the default cube.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id {canvas_id:?}")))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("Element {canvas_id:?} is not a canvas")))?;
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("WebGL2 is not supported"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Unexpected WebGL2 context type"))?;

        let scene = SceneState::new(Shape::default(), ViewerConfig::default()).map_err(to_js)?;
        let mut backend = WebGlBackend::new(gl.clone());
        let program = build_program(&mut backend, scene.shading)?;
        let buffers = MeshBuffers::upload(&gl, scene.mesh())?;

        gl.enable(GL::DEPTH_TEST);

        let viewport = Viewport::new(canvas.width(), canvas.height());
        Ok(WebRenderer {
            scene,
            render_loop: RenderLoop::new(),
            backend,
            handler: CanvasHandler {
                gl,
                program,
                buffers,
                mesh_dirty: false,
                viewport,
                pending: Vec::new(),
            },
        })
    }

    pub fn pointer_down(&mut self, button: i16) {
        self.handler.pending.push(InputEvent::PointerDown {
            button: pointer_button(button),
        });
    }

    pub fn pointer_move(&mut self, dx: f32, dy: f32) {
        self.handler.pending.push(InputEvent::PointerMove { dx, dy });
    }

    pub fn pointer_up(&mut self) {
        self.handler.pending.push(InputEvent::PointerUp);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.handler.pending.push(InputEvent::Wheel { delta_y });
    }

    /// Takes `KeyboardEvent.key`; unknown keys are ignored.
    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = key_from_name(key) {
            self.handler.pending.push(InputEvent::KeyDown(key));
        }
    }

    /// Switch to a shape descriptor such as `"sphere(0.5, 30, 30)"`. The
    /// current shape stays on screen if the descriptor is rejected.
    pub fn select_shape(&mut self, descriptor: &str) -> Result<(), JsValue> {
        let shape = parse_shape(descriptor).map_err(to_js)?;
        self.scene.select_shape(shape).map_err(to_js)?;
        self.handler.mesh_dirty = true;
        console::log_1(&JsValue::from_str(&format!(
            "orbview: showing {} ({} triangles)",
            shape.kind(),
            self.scene.mesh().triangle_count()
        )));
        Ok(())
    }

    /// Switch shading model by name, e.g. `"point-light"`.
    pub fn set_shading(&mut self, name: &str) -> Result<(), JsValue> {
        let model: ShadingModel = name.parse().map_err(to_js)?;
        let program = build_program(&mut self.backend, model)?;
        let previous = std::mem::replace(&mut self.handler.program, program);
        self.handler.gl.delete_program(Some(&previous.program));
        self.scene.shading = model;
        Ok(())
    }

    /// Draw one frame at the given drawing-buffer size. Returns `false` once
    /// the renderer has been stopped.
    pub fn frame(&mut self, width: u32, height: u32) -> Result<bool, JsValue> {
        self.handler.viewport = Viewport::new(width, height);
        self.render_loop.step(&mut self.scene, &mut self.handler)
    }

    pub fn stop(&mut self) {
        self.render_loop.stop_signal().stop();
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console::log_1(&JsValue::from_str("orbview web module loaded"));
    Ok(())
}
