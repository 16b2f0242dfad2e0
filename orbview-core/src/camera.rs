//! Interactive camera state and the per-frame matrices derived from it.

use nalgebra::Matrix4;

use crate::config::{ProjectionConfig, ViewerConfig};
use crate::projection::{perspective, Viewport};
use crate::transform::{RotationState, Transform};

/// Orbit/pan/zoom state accumulated from input.
///
/// Only [`crate::input::CameraController`] mutates it during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub rotation: RotationState,
    pub pan_x: f32,
    pub pan_y: f32,
    /// Signed distance along the view axis; negative is in front of the eye.
    pub zoom: f32,
}

impl CameraState {
    pub fn new(zoom: f32) -> Self {
        Self {
            rotation: RotationState::zero(),
            pan_x: 0.0,
            pan_y: 0.0,
            zoom,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.controls.clamp_zoom(config.initial_zoom))
    }

    /// `T(pan_x, pan_y, zoom) · Rx · Ry [· Rz]`.
    pub fn model_view(&self, roll: bool) -> Matrix4<f32> {
        Transform::translation_matrix(self.pan_x, self.pan_y, self.zoom)
            * Transform::rotation_matrix(&self.rotation, roll)
    }

    /// Derive this frame's matrices.
    pub fn compose(&self, viewport: Viewport, config: &ViewerConfig) -> TransformBundle {
        TransformBundle::new(
            &config.projection,
            viewport.aspect(),
            self.model_view(config.controls.roll),
        )
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

/// Matrices handed to a renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformBundle {
    pub projection: Matrix4<f32>,
    pub model_view: Matrix4<f32>,
    /// Inverse-transpose of `model_view`.
    pub normal: Matrix4<f32>,
}

impl TransformBundle {
    pub fn new(projection: &ProjectionConfig, aspect: f32, model_view: Matrix4<f32>) -> Self {
        let normal = Transform::normal_matrix(&model_view).unwrap_or_else(|| {
            tracing::warn!("model-view matrix is singular, using identity normal matrix");
            Matrix4::identity()
        });

        Self {
            projection: perspective(projection, aspect),
            model_view,
            normal,
        }
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        self.projection * self.model_view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector4};

    fn posed() -> CameraState {
        let mut camera = CameraState::new(-4.0);
        camera.rotation = RotationState::new(0.4, -1.1, 0.25);
        camera.pan_x = 0.3;
        camera.pan_y = -0.2;
        camera
    }

    #[test]
    fn test_default_camera() {
        let camera = CameraState::default();
        assert_eq!(camera.zoom, crate::config::INITIAL_ZOOM);
        assert_eq!(camera.rotation, RotationState::zero());
    }

    #[test]
    fn test_model_view_translation_column() {
        let m = posed().model_view(true);
        assert_eq!(m.column(3), Vector4::new(0.3, -0.2, -4.0, 1.0));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let config = ViewerConfig::default();
        let viewport = Viewport::new(1280, 720);
        let a = posed().compose(viewport, &config);
        let b = posed().compose(viewport, &config);

        let bits = |m: &Matrix4<f32>| m.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.projection), bits(&b.projection));
        assert_eq!(bits(&a.model_view), bits(&b.model_view));
        assert_eq!(bits(&a.normal), bits(&b.normal));
    }

    #[test]
    fn test_normal_matrix_is_inverse_transpose() {
        let bundle = posed().compose(Viewport::new(640, 480), &ViewerConfig::default());
        let product = bundle.normal.transpose() * bundle.model_view;
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_projection_uses_aspect() {
        let config = ViewerConfig::default();
        let wide = CameraState::default().compose(Viewport::new(200, 100), &config);
        let square = CameraState::default().compose(Viewport::new(100, 100), &config);
        assert_relative_eq!(wide.projection[(0, 0)] * 2.0, square.projection[(0, 0)]);
        assert_relative_eq!(wide.projection[(1, 1)], square.projection[(1, 1)]);
    }

    #[test]
    fn test_pan_moves_model_in_eye_space() {
        let mut camera = CameraState::new(-3.0);
        camera.pan_x = 1.0;
        let eye = camera.model_view(true).transform_point(&Point3::origin());
        assert_relative_eq!(eye, Point3::new(1.0, 0.0, -3.0));
    }
}
