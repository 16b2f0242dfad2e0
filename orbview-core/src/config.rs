//! Viewer configuration constants and defaults.
//!
//! Projection, input sensitivity, tessellation and lighting values used when
//! no override is supplied. `ViewerConfig::default()` bundles them.

use std::f32::consts::FRAC_PI_4;
use std::ops::RangeInclusive;

// =============================================================================
// PROJECTION
// =============================================================================

/// Vertical field of view in radians (45 degrees).
pub const FOV_Y: f32 = FRAC_PI_4;

/// Near clip plane distance.
pub const NEAR: f32 = 0.1;

/// Far clip plane distance.
pub const FAR: f32 = 100.0;

// =============================================================================
// CONTROLS
// =============================================================================

/// Radians of rotation per pixel of primary-button drag.
pub const ROTATE_SENSITIVITY: f32 = 0.01;

/// World units of pan per pixel of secondary-button drag.
pub const PAN_SENSITIVITY: f32 = 0.01;

/// Zoom change per unit of wheel delta.
///
/// Positive: scrolling down (positive `delta_y`) moves the object towards the
/// viewer, since zoom is a negative distance along the view axis.
pub const ZOOM_SENSITIVITY: f32 = 0.01;

/// Allowed zoom range. The object always stays in front of the camera.
pub const ZOOM_RANGE: RangeInclusive<f32> = -10.0..=-1.0;

/// Radians per arrow-key (or roll-key) press.
pub const KEY_ROTATION_STEP: f32 = 0.05;

/// Zoom at session start.
pub const INITIAL_ZOOM: f32 = -3.0;

// =============================================================================
// TESSELLATION
// =============================================================================

pub const DEFAULT_RADIUS: f32 = 0.5;
pub const DEFAULT_HEIGHT: f32 = 1.0;
pub const DEFAULT_LATITUDE_BANDS: u32 = 30;
pub const DEFAULT_LONGITUDE_BANDS: u32 = 30;
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 32;

/// Indices are `u16`, so a mesh can address at most this many vertices.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

// =============================================================================
// LIGHTING
// =============================================================================

/// Direction towards the directional light, eye space (not normalized).
pub const LIGHT_DIRECTION: [f32; 3] = [0.5, 0.7, 1.0];

/// Point light position, eye space.
pub const POINT_LIGHT_POSITION: [f32; 3] = [2.0, 2.0, 2.0];

pub const AMBIENT: f32 = 0.2;
pub const SHININESS: f32 = 32.0;

/// Base surface color (RGB) for the flat and lit shading models.
pub const BASE_COLOR: [f32; 3] = [0.2, 0.6, 0.9];

// =============================================================================
// CONFIG STRUCTS
// =============================================================================

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: FOV_Y,
            near: NEAR,
            far: FAR,
        }
    }
}

/// Input-to-camera policy parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    pub rotate_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
    /// `None` disables clamping.
    pub zoom_range: Option<RangeInclusive<f32>>,
    pub key_step: f32,
    /// Whether `q`/`e` roll the model around Z and the Z rotation is composed.
    pub roll: bool,
}

impl ControlConfig {
    pub fn with_zoom_range(mut self, range: Option<RangeInclusive<f32>>) -> Self {
        self.zoom_range = range;
        self
    }

    pub fn with_zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    pub fn with_roll(mut self, roll: bool) -> Self {
        self.roll = roll;
        self
    }

    /// Apply the configured zoom range, if any.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        match &self.zoom_range {
            Some(range) => zoom.clamp(*range.start(), *range.end()),
            None => zoom,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: ROTATE_SENSITIVITY,
            pan_sensitivity: PAN_SENSITIVITY,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            zoom_range: Some(ZOOM_RANGE),
            key_step: KEY_ROTATION_STEP,
            roll: true,
        }
    }
}

/// Everything a front end needs to set up a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub projection: ProjectionConfig,
    pub controls: ControlConfig,
    pub initial_zoom: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            controls: ControlConfig::default(),
            initial_zoom: INITIAL_ZOOM,
        }
    }
}
