use approx::assert_relative_eq;
use nalgebra::Point3;
use orbview_core::{
    primitives, CameraState, Frame, FrameHandler, InputEvent, PointerButton, RenderLoop,
    SceneState, Shape, ShapeKind, ViewerConfig, Viewport,
};

#[test]
fn small_sphere_layout() {
    let mesh = primitives::sphere(0.5, 2, 4).unwrap();
    assert_eq!(mesh.vertex_count(), 15);
    // 2·4 cells, two triangles each
    assert_eq!(mesh.indices.len(), 48);
    assert_eq!(mesh.triangle_count(), 16);
    assert_relative_eq!(mesh.positions[0], Point3::new(0.0, 0.5, 0.0));
}

#[test]
fn every_generator_stays_in_bounds() {
    let shapes = [
        Shape::Cube,
        Shape::Pyramid,
        "sphere(1, 7, 9)".parse().unwrap(),
        "cylinder(0.3, 2, 5)".parse().unwrap(),
        "cone(0.8, 0.4, 3)".parse().unwrap(),
    ];
    for shape in shapes {
        let mesh = shape.mesh().unwrap();
        assert_eq!(mesh.indices.len() % 3, 0, "{shape:?}");
        assert!(
            mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()),
            "{shape:?}"
        );
        for t in mesh.indices.chunks_exact(3) {
            assert!(t[0] != t[1] && t[1] != t[2] && t[0] != t[2], "{shape:?} {t:?}");
        }
    }
}

#[test]
fn cone_index_counts() {
    let n = 16;
    let mesh = primitives::cone(0.5, 1.0, n).unwrap();
    let side = 3 * n as usize;
    assert_eq!(mesh.indices.len(), 2 * side);
    let closing = &mesh.indices[mesh.indices.len() - 3..];
    assert_eq!(closing, &[n as u16 + 2, 1, n as u16]);
}

#[test]
fn drag_accumulates_across_gestures() {
    let mut scene = SceneState::new(Shape::Cube, ViewerConfig::default()).unwrap();
    let drag = [
        InputEvent::PointerDown {
            button: PointerButton::Primary,
        },
        InputEvent::PointerMove { dx: 10.0, dy: 0.0 },
        InputEvent::PointerUp,
    ];

    for event in drag {
        scene.handle_input(event);
    }
    assert_relative_eq!(scene.camera().rotation.y, 0.10, epsilon = 1e-6);

    // moves between gestures are ignored
    scene.handle_input(InputEvent::PointerMove { dx: 50.0, dy: 50.0 });
    for event in drag {
        scene.handle_input(event);
    }
    assert_relative_eq!(scene.camera().rotation.y, 0.20, epsilon = 1e-6);
    assert_relative_eq!(scene.camera().rotation.x, 0.0);
}

#[test]
fn wheel_zooms_and_clamps() {
    let mut scene = SceneState::new(Shape::Pyramid, ViewerConfig::default()).unwrap();
    assert_relative_eq!(scene.camera().zoom, -3.0);

    scene.handle_input(InputEvent::Wheel { delta_y: 100.0 });
    assert_relative_eq!(scene.camera().zoom, -2.0, epsilon = 1e-6);

    scene.handle_input(InputEvent::Wheel { delta_y: 10_000.0 });
    assert_relative_eq!(scene.camera().zoom, -1.0);

    scene.handle_input(InputEvent::Wheel { delta_y: -10_000.0 });
    assert_relative_eq!(scene.camera().zoom, -10.0);
}

#[test]
fn composition_is_deterministic() {
    let config = ViewerConfig::default();
    let mut camera = CameraState::from_config(&config);
    camera.rotation.x = 0.7;
    camera.rotation.y = -2.3;
    camera.pan_x = 0.15;

    let viewport = Viewport::new(1280, 720);
    let a = camera.compose(viewport, &config);
    let b = camera.compose(viewport, &config);
    for (x, y) in a
        .projection
        .iter()
        .chain(a.model_view.iter())
        .chain(a.normal.iter())
        .zip(b.projection.iter().chain(b.model_view.iter()).chain(b.normal.iter()))
    {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

struct Counter {
    vertex_counts: Vec<usize>,
}

impl FrameHandler for Counter {
    type Error = std::convert::Infallible;

    fn prepare(&mut self, scene: &mut SceneState) -> Result<Viewport, Self::Error> {
        if self.vertex_counts.len() == 2 {
            scene
                .select_shape(Shape::default_for(ShapeKind::Cylinder))
                .unwrap();
        }
        Ok(Viewport::new(120, 80))
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        self.vertex_counts.push(frame.mesh.vertex_count());
        Ok(())
    }
}

#[test]
fn bounded_render_loop() {
    let mut scene = SceneState::new(Shape::Cube, ViewerConfig::default()).unwrap();
    let mut handler = Counter {
        vertex_counts: Vec::new(),
    };
    let mut render_loop = RenderLoop::new().with_frame_limit(Some(4));

    let frames = render_loop.run(&mut scene, &mut handler).unwrap();
    assert_eq!(frames, 4);
    assert_eq!(handler.vertex_counts, vec![24, 24, 68, 68]);
}
