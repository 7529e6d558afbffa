/// 3D transformation matrices for scene nodes
use nalgebra::{Matrix4, Vector3};

/// Transform builder for node-local matrices
pub struct Transform;

impl Transform {
    /// Rotation around the vertical (Y) axis
    pub fn yaw_matrix(yaw: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, yaw, 0.0))
    }

    /// Rotation around the horizontal (X) axis
    pub fn pitch_matrix(pitch: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(pitch, 0.0, 0.0))
    }

    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }

    /// Local matrix for a node: translate, then pitch, then yaw
    pub fn node_matrix(position: &Vector3<f32>, yaw: f32, pitch: f32) -> Matrix4<f32> {
        Self::translation_matrix(position) * Self::pitch_matrix(pitch) * Self::yaw_matrix(yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_node_matrix() {
        let matrix = Transform::node_matrix(&Vector3::zeros(), 0.0, 0.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_yaw_rotates_x_toward_negative_z() {
        let matrix = Transform::yaw_matrix(FRAC_PI_2);
        let rotated = matrix.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_translation_applies_after_rotation() {
        let position = Vector3::new(0.5, 0.0, 0.0);
        let matrix = Transform::node_matrix(&position, FRAC_PI_2, 0.0);
        let point = matrix.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        // rotated to -z, then offset on x
        assert!((point.x - 0.5).abs() < 1e-6);
        assert!((point.z + 1.0).abs() < 1e-6);
    }
}
