//! Rigid poses extracted from transformation matrices.

use glam::{Mat4, Quat, Vec3};

/// Position and orientation, with scale discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Translation in world space (metres).
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Build a pose from parts.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Decompose `matrix` into rotation and translation.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (_scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self { position, rotation }
    }

    /// Recompose into a unit-scale matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposition_drops_scale() {
        let rotation = Quat::from_rotation_y(0.7);
        let position = Vec3::new(0.2, -1.1, 3.0);
        let matrix = Mat4::from_scale_rotation_translation(Vec3::splat(2.0), rotation, position);

        let pose = Pose::from_matrix(&matrix);
        assert!(pose.position.abs_diff_eq(position, 1e-5));
        assert!(pose.rotation.abs_diff_eq(rotation, 1e-5));
    }
}
