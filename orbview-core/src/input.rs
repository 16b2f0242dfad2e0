//! Input-to-camera policy.
//!
//! Front ends translate their native events into [`InputEvent`]s; the
//! [`CameraController`] is the only thing that mutates a [`CameraState`].

use crate::camera::CameraState;
use crate::config::ControlConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Orbit.
    Primary,
    /// Pan.
    Secondary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

/// Device-independent input, deltas in pixels (or cells).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton },
    PointerMove { dx: f32, dy: f32 },
    PointerUp,
    Wheel { delta_y: f32 },
    KeyDown(Key),
}

/// Applies input events to a camera according to a [`ControlConfig`].
#[derive(Debug, Clone)]
pub struct CameraController {
    config: ControlConfig,
    drag: Option<PointerButton>,
}

impl CameraController {
    pub fn new(config: ControlConfig) -> Self {
        Self { config, drag: None }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Button of the drag in progress, if any.
    pub fn dragging(&self) -> Option<PointerButton> {
        self.drag
    }

    /// Apply one event. Returns whether the camera changed.
    pub fn handle(&mut self, camera: &mut CameraState, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { button } => {
                self.drag = Some(button);
                false
            }
            InputEvent::PointerUp => {
                self.drag = None;
                false
            }
            InputEvent::PointerMove { dx, dy } => self.drag_by(camera, dx, dy),
            InputEvent::Wheel { delta_y } => self.zoom_by(camera, delta_y),
            InputEvent::KeyDown(key) => self.key(camera, key),
        }
    }

    fn drag_by(&self, camera: &mut CameraState, dx: f32, dy: f32) -> bool {
        match self.drag {
            Some(PointerButton::Primary) => {
                let k = self.config.rotate_sensitivity;
                camera.rotation.rotate(dy * k, dx * k, 0.0);
                true
            }
            Some(PointerButton::Secondary) => {
                let k = self.config.pan_sensitivity;
                camera.pan_x += dx * k;
                camera.pan_y -= dy * k;
                true
            }
            Some(PointerButton::Other) | None => false,
        }
    }

    fn zoom_by(&self, camera: &mut CameraState, delta_y: f32) -> bool {
        let zoom = self
            .config
            .clamp_zoom(camera.zoom + delta_y * self.config.zoom_sensitivity);
        let changed = zoom != camera.zoom;
        camera.zoom = zoom;
        changed
    }

    fn key(&self, camera: &mut CameraState, key: Key) -> bool {
        let step = self.config.key_step;
        let (dx, dy, dz) = match key {
            Key::ArrowUp => (-step, 0.0, 0.0),
            Key::ArrowDown => (step, 0.0, 0.0),
            Key::ArrowLeft => (0.0, -step, 0.0),
            Key::ArrowRight => (0.0, step, 0.0),
            Key::Char('q') | Key::Char('Q') if self.config.roll => (0.0, 0.0, -step),
            Key::Char('e') | Key::Char('E') if self.config.roll => (0.0, 0.0, step),
            Key::Char(_) => return false,
        };
        camera.rotation.rotate(dx, dy, dz);
        true
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(ControlConfig::default())
    }
}
