//! Per-session scene state and the frame loop that drives a front end.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::camera::{CameraState, TransformBundle};
use crate::config::ViewerConfig;
use crate::error::MeshError;
use crate::input::{CameraController, InputEvent};
use crate::mesh::Mesh;
use crate::primitives::Shape;
use crate::projection::Viewport;
use crate::shading::ShadingModel;

/// Everything a front end renders from. Owned by the front end and passed
/// by reference; there is no global state.
#[derive(Debug, Clone)]
pub struct SceneState {
    shape: Shape,
    mesh: Mesh,
    pub shading: ShadingModel,
    camera: CameraState,
    controller: CameraController,
    config: ViewerConfig,
}

impl SceneState {
    pub fn new(shape: Shape, config: ViewerConfig) -> Result<Self, MeshError> {
        let mesh = shape.mesh()?;
        Ok(Self {
            shape,
            mesh,
            shading: ShadingModel::default(),
            camera: CameraState::from_config(&config),
            controller: CameraController::new(config.controls.clone()),
            config,
        })
    }

    pub fn with_shading(mut self, shading: ShadingModel) -> Self {
        self.shading = shading;
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Read-only: the camera changes only through [`SceneState::handle_input`].
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    /// Regenerate the mesh for `shape`. On error the current shape and mesh
    /// are kept. The camera is never reset.
    pub fn select_shape(&mut self, shape: Shape) -> Result<(), MeshError> {
        let mesh = shape.mesh()?;
        tracing::debug!(shape = %shape.kind(), "selected shape");
        self.shape = shape;
        self.mesh = mesh;
        Ok(())
    }

    /// Returns whether the camera changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.controller.handle(&mut self.camera, event)
    }

    pub fn frame(&self, index: u64, viewport: Viewport) -> Frame<'_> {
        Frame {
            index,
            viewport,
            transforms: self.camera.compose(viewport, &self.config),
            mesh: &self.mesh,
            shading: self.shading,
        }
    }
}

/// What to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub index: u64,
    pub viewport: Viewport,
    pub transforms: TransformBundle,
    pub mesh: &'a Mesh,
    pub shading: ShadingModel,
}

/// Cancellation token shared between a render loop and whoever stops it.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A front end driven by [`RenderLoop`].
pub trait FrameHandler {
    type Error;

    /// Drain pending input into the scene and report the current viewport.
    fn prepare(&mut self, scene: &mut SceneState) -> Result<Viewport, Self::Error>;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

/// Frame scheduler with an explicit stop signal and optional frame limit.
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    stop: StopSignal,
    frame_limit: Option<u64>,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.stop.is_stopped() || self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }

    /// Run a single frame. Returns `false` without drawing once the loop is
    /// finished, including when `prepare` raised the stop signal.
    pub fn step<H: FrameHandler>(
        &mut self,
        scene: &mut SceneState,
        handler: &mut H,
    ) -> Result<bool, H::Error> {
        if self.is_finished() {
            return Ok(false);
        }
        let viewport = handler.prepare(scene)?;
        if self.stop.is_stopped() {
            return Ok(false);
        }

        let frame = scene.frame(self.frames, viewport);
        handler.draw(&frame)?;
        self.frames += 1;
        Ok(true)
    }

    /// Run until stopped or the frame limit is reached. Returns the number
    /// of frames drawn.
    pub fn run<H: FrameHandler>(
        &mut self,
        scene: &mut SceneState,
        handler: &mut H,
    ) -> Result<u64, H::Error> {
        while self.step(scene, handler)? {}
        tracing::debug!(frames = self.frames, "render loop finished");
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZOOM_RANGE;
    use crate::input::{Key, PointerButton};
    use crate::primitives::ShapeKind;

    struct Recorder {
        events: Vec<InputEvent>,
        drawn: Vec<(u64, usize)>,
        stop_after: Option<(u64, StopSignal)>,
    }

    impl Recorder {
        fn new(events: Vec<InputEvent>) -> Self {
            Self {
                events,
                drawn: Vec::new(),
                stop_after: None,
            }
        }
    }

    impl FrameHandler for Recorder {
        type Error = &'static str;

        fn prepare(&mut self, scene: &mut SceneState) -> Result<Viewport, Self::Error> {
            for event in self.events.drain(..) {
                scene.handle_input(event);
            }
            if let Some((after, stop)) = &self.stop_after {
                if self.drawn.len() as u64 >= *after {
                    stop.stop();
                }
            }
            Ok(Viewport::new(80, 48))
        }

        fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
            self.drawn.push((frame.index, frame.mesh.vertex_count()));
            Ok(())
        }
    }

    struct Failing;

    impl FrameHandler for Failing {
        type Error = &'static str;

        fn prepare(&mut self, _scene: &mut SceneState) -> Result<Viewport, Self::Error> {
            Ok(Viewport::new(1, 1))
        }

        fn draw(&mut self, _frame: &Frame<'_>) -> Result<(), Self::Error> {
            Err("lost context")
        }
    }

    fn scene() -> SceneState {
        SceneState::new(Shape::Cube, ViewerConfig::default()).unwrap()
    }

    #[test]
    fn test_frame_limit() {
        let mut scene = scene();
        let mut handler = Recorder::new(Vec::new());
        let mut render_loop = RenderLoop::new().with_frame_limit(Some(3));

        assert_eq!(render_loop.run(&mut scene, &mut handler), Ok(3));
        assert_eq!(handler.drawn, vec![(0, 24), (1, 24), (2, 24)]);
        assert!(render_loop.is_finished());
        assert_eq!(render_loop.step(&mut scene, &mut handler), Ok(false));
    }

    #[test]
    fn test_stop_signal_from_prepare() {
        let mut scene = scene();
        let mut render_loop = RenderLoop::new();
        let mut handler = Recorder::new(Vec::new());
        handler.stop_after = Some((2, render_loop.stop_signal()));

        assert_eq!(render_loop.run(&mut scene, &mut handler), Ok(2));
        assert_eq!(handler.drawn.len(), 2);
    }

    #[test]
    fn test_stopped_before_start() {
        let mut render_loop = RenderLoop::new();
        render_loop.stop_signal().stop();
        let mut handler = Recorder::new(Vec::new());
        assert_eq!(render_loop.run(&mut scene(), &mut handler), Ok(0));
        assert!(handler.drawn.is_empty());
    }

    #[test]
    fn test_draw_error_propagates() {
        let mut render_loop = RenderLoop::new().with_frame_limit(Some(5));
        assert_eq!(render_loop.run(&mut scene(), &mut Failing), Err("lost context"));
        assert_eq!(render_loop.frames(), 0);
    }

    #[test]
    fn test_input_reaches_camera() {
        let mut scene = scene();
        let mut handler = Recorder::new(vec![
            InputEvent::PointerDown {
                button: PointerButton::Primary,
            },
            InputEvent::PointerMove { dx: 10.0, dy: 0.0 },
            InputEvent::PointerUp,
            InputEvent::KeyDown(Key::ArrowUp),
        ]);
        let mut render_loop = RenderLoop::new().with_frame_limit(Some(1));
        render_loop.run(&mut scene, &mut handler).unwrap();

        assert!((scene.camera().rotation.y - 0.1).abs() < 1e-6);
        assert!((scene.camera().rotation.x + 0.05).abs() < 1e-6);
        assert_eq!(scene.controller().dragging(), None);
    }

    #[test]
    fn test_select_shape() {
        let mut scene = scene();
        scene.handle_input(InputEvent::Wheel { delta_y: -200.0 });
        assert!((scene.camera().zoom + 5.0).abs() < 1e-6);
        let camera = *scene.camera();

        scene.select_shape(Shape::default_for(ShapeKind::Cone)).unwrap();
        assert_eq!(scene.shape().kind(), ShapeKind::Cone);
        assert_eq!(scene.mesh().vertex_count(), 32 + 3);
        assert_eq!(*scene.camera(), camera);

        let bad = Shape::Sphere {
            radius: 0.0,
            latitude_bands: 4,
            longitude_bands: 4,
        };
        assert!(scene.select_shape(bad).is_err());
        assert_eq!(scene.shape().kind(), ShapeKind::Cone);
        assert_eq!(scene.mesh().vertex_count(), 35);
    }

    #[test]
    fn test_camera_stays_within_zoom_range() {
        let mut scene = scene();
        for delta_y in [5_000.0, -5_000.0, 5_000.0] {
            scene.handle_input(InputEvent::Wheel { delta_y });
            assert!(ZOOM_RANGE.contains(&scene.camera().zoom));
        }
        assert_eq!(scene.camera().zoom, *ZOOM_RANGE.end());
    }

    #[test]
    fn test_camera_still_without_input() {
        let mut scene = scene();
        let initial = *scene.camera();
        let viewport = Viewport::new(80, 48);
        let first = scene.frame(0, viewport).transforms;

        let mut handler = Recorder::new(Vec::new());
        RenderLoop::new()
            .with_frame_limit(Some(10))
            .run(&mut scene, &mut handler)
            .unwrap();

        assert_eq!(*scene.camera(), initial);
        assert_eq!(scene.frame(10, viewport).transforms, first);
    }

    #[test]
    fn test_frame_uses_scene_state() {
        let scene = scene().with_shading(ShadingModel::PointLight);
        let viewport = Viewport::new(640, 480);
        let frame = scene.frame(7, viewport);

        assert_eq!(frame.index, 7);
        assert_eq!(frame.shading, ShadingModel::PointLight);
        assert_eq!(
            frame.transforms,
            scene.camera().compose(viewport, scene.config())
        );
    }
}
