//! Rotation state and the matrix builders behind camera composition.

use nalgebra::{Matrix4, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// `Rx · Ry [· Rz]`: the model is rolled first, then turned about Y,
    /// then tilted about X. The Z factor is left out entirely without roll.
    pub fn rotation_matrix(rotation: &RotationState, roll: bool) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));

        if roll {
            let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));
            rx * ry * rz
        } else {
            rx * ry
        }
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Inverse-transpose, for carrying normals through `matrix`.
    ///
    /// `None` if `matrix` is singular.
    pub fn normal_matrix(matrix: &Matrix4<f32>) -> Option<Matrix4<f32>> {
        matrix.try_inverse().map(|inverse| inverse.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation, true);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_order() {
        // Y is applied before X: +X turned a quarter about Y lands on -Z,
        // which a quarter about X takes to +Y.
        let rotation = RotationState::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        let m = Transform::rotation_matrix(&rotation, false);
        let v = m * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(v, Vector4::new(0.0, 1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_roll_ignored_when_disabled() {
        let rotation = RotationState::new(0.3, 0.4, 1.0);
        let without = Transform::rotation_matrix(&rotation, false);
        let flat = Transform::rotation_matrix(&RotationState::new(0.3, 0.4, 0.0), true);
        assert_relative_eq!(without, flat, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let m = Transform::rotation_matrix(&RotationState::new(0.2, -0.7, 0.4), true);
        let n = Transform::normal_matrix(&m).unwrap();
        assert_relative_eq!(n, m, epsilon = 1e-5);
        assert!(Transform::normal_matrix(&Matrix4::zeros()).is_none());
    }
}
