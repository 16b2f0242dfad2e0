//! Perspective projection and clip-to-screen mapping.

use nalgebra::{Matrix4, Point3};

use crate::config::ProjectionConfig;

/// Viewport size in pixels (or terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, or 1 for a collapsed viewport.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// A point projected onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// NDC depth in `[-1, 1]`, smaller is closer.
    pub depth: f32,
}

/// OpenGL-style perspective matrix (clip depth in `[-1, 1]`).
pub fn perspective(config: &ProjectionConfig, aspect: f32) -> Matrix4<f32> {
    Matrix4::new_perspective(aspect, config.fov_y, config.near, config.far)
}

/// Project a point through `mvp` to screen space.
///
/// Returns `None` for points behind the eye or outside the near/far range.
/// Points beside the view volume still project, landing outside
/// `0..width` or `0..height`; the caller clips them to the screen.
pub fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<ScreenPoint> {
    let clip = mvp * point.to_homogeneous();

    // Prevent division by near-zero or negative w
    if clip.w < 1e-6 {
        return None;
    }

    let ndc = clip.xyz() / clip.w;

    if !(-1.0..=1.0).contains(&ndc.z) {
        return None;
    }

    Some(ScreenPoint {
        x: (ndc.x + 1.0) * 0.5 * width as f32,
        y: (1.0 - ndc.y) * 0.5 * height as f32,
        depth: ndc.z,
    })
}
