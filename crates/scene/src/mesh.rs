//! Scene meshes.

use glam::{Mat4, Quat, Vec3};

use crate::{MaterialId, Pose};

/// Index of a mesh inside its [`crate::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub(crate) usize);

/// Geometry primitive backing a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Flat disc lying in the local XZ plane.
    Disc {
        /// Disc radius.
        radius: f32,
        /// Number of rim segments.
        tessellation: u32,
    },
    /// Axis-aligned cube centred on the origin.
    Box {
        /// Edge length.
        size: f32,
    },
}

impl MeshShape {
    /// Extent along the local Y axis.
    pub fn height(&self) -> f32 {
        match self {
            MeshShape::Disc { .. } => 0.0,
            MeshShape::Box { size } => *size,
        }
    }

    /// Triangle count of the generated geometry.
    pub fn triangle_count(&self) -> usize {
        match self {
            MeshShape::Disc { tessellation, .. } => *tessellation as usize,
            MeshShape::Box { .. } => 12,
        }
    }
}

/// A named, posed, optionally visible primitive.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Debug name.
    pub name: String,
    /// Geometry.
    pub shape: MeshShape,
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
    /// Hidden meshes are skipped by [`crate::Scene::render`].
    pub is_visible: bool,
    /// Assigned material.
    pub material: Option<MaterialId>,
}

impl Mesh {
    pub(crate) fn new(name: impl Into<String>, shape: MeshShape) -> Self {
        Self {
            name: name.into(),
            shape,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            is_visible: true,
            material: None,
        }
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// Overwrite position and rotation.
    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }

    /// Decompose `matrix` straight onto this mesh's rotation and position.
    pub fn apply_transform(&mut self, matrix: &Mat4) {
        self.set_pose(Pose::from_matrix(matrix));
    }

    /// Model matrix built from the current pose.
    pub fn world_matrix(&self) -> Mat4 {
        self.pose().to_matrix()
    }
}
