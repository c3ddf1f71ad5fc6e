//! Scene graph container.

use tracing::{debug, trace};

use crate::{
    HemisphericLight, MaterialId, Mesh, MeshId, MeshShape, SceneError, StandardMaterial,
};

const DISC_TESSELLATION: u32 = 64;

/// A pointer press on the rendering surface, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Horizontal position from the left edge.
    pub x: f32,
    /// Vertical position from the top edge.
    pub y: f32,
}

/// Summary of one [`Scene::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Frames rendered so far, including this one.
    pub frame: u64,
    /// Visible meshes drawn this frame.
    pub visible_meshes: usize,
    /// Triangles submitted this frame.
    pub triangles: usize,
}

/// Owns every mesh, material and light for the lifetime of the app.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    materials: Vec<StandardMaterial>,
    lights: Vec<HemisphericLight>,
    frames_rendered: u64,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flat disc of the given radius.
    pub fn create_disc(&mut self, name: &str, radius: f32) -> Result<MeshId, SceneError> {
        check_dimension(name, "radius", radius)?;
        Ok(self.push_mesh(Mesh::new(
            name,
            MeshShape::Disc {
                radius,
                tessellation: DISC_TESSELLATION,
            },
        )))
    }

    /// Add a cube with the given edge length.
    pub fn create_box(&mut self, name: &str, size: f32) -> Result<MeshId, SceneError> {
        check_dimension(name, "size", size)?;
        Ok(self.push_mesh(Mesh::new(name, MeshShape::Box { size })))
    }

    fn push_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len());
        debug!(name = %mesh.name, ?id, "mesh created");
        self.meshes.push(mesh);
        id
    }

    /// Register a material.
    pub fn add_material(&mut self, material: StandardMaterial) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    /// Assign a material to a mesh.
    pub fn set_material(&mut self, mesh: MeshId, material: MaterialId) -> Result<(), SceneError> {
        self.mesh_mut(mesh)?.material = Some(material);
        Ok(())
    }

    /// Register a light.
    pub fn add_light(&mut self, light: HemisphericLight) {
        self.lights.push(light);
    }

    /// Look up a mesh.
    pub fn mesh(&self, id: MeshId) -> Result<&Mesh, SceneError> {
        self.meshes.get(id.0).ok_or(SceneError::UnknownMesh(id))
    }

    /// Look up a mesh for mutation.
    pub fn mesh_mut(&mut self, id: MeshId) -> Result<&mut Mesh, SceneError> {
        self.meshes.get_mut(id.0).ok_or(SceneError::UnknownMesh(id))
    }

    /// Look up a material.
    pub fn material(&self, id: MaterialId) -> Option<&StandardMaterial> {
        self.materials.get(id.0)
    }

    /// All meshes in creation order.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// All lights in creation order.
    pub fn lights(&self) -> &[HemisphericLight] {
        &self.lights
    }

    /// Draw one frame. Hidden meshes are skipped.
    pub fn render(&mut self) -> RenderStats {
        self.frames_rendered += 1;
        let mut stats = RenderStats {
            frame: self.frames_rendered,
            ..RenderStats::default()
        };
        for mesh in self.meshes.iter().filter(|m| m.is_visible) {
            stats.visible_meshes += 1;
            stats.triangles += mesh.shape.triangle_count();
        }
        trace!(?stats, "scene rendered");
        stats
    }

    /// Release every mesh, material and light.
    pub fn dispose(&mut self) {
        debug!(meshes = self.meshes.len(), "disposing scene");
        self.meshes.clear();
        self.materials.clear();
        self.lights.clear();
    }
}

fn check_dimension(name: &str, dimension: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidDimension {
            name: name.to_string(),
            dimension,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color3;

    #[test]
    fn render_skips_hidden_meshes() {
        let mut scene = Scene::new();
        let disc = scene.create_disc("reticle", 0.05).unwrap();
        scene.create_box("box", 0.1).unwrap();
        scene.mesh_mut(disc).unwrap().is_visible = false;

        let stats = scene.render();
        assert_eq!(stats.frame, 1);
        assert_eq!(stats.visible_meshes, 1);
        assert_eq!(stats.triangles, 12);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut scene = Scene::new();
        assert!(matches!(
            scene.create_box("box", 0.0),
            Err(SceneError::InvalidDimension { dimension: "size", .. })
        ));
        assert!(scene.create_disc("disc", f32::NAN).is_err());
        assert!(scene.meshes().is_empty());
    }

    #[test]
    fn materials_attach_to_meshes() {
        let mut scene = Scene::new();
        let mesh = scene.create_box("box", 0.1).unwrap();
        let purple = Color3::from_hex_string("#5853e6").unwrap();
        let material = scene.add_material(StandardMaterial::new("boxMaterial").with_diffuse(purple));
        scene.set_material(mesh, material).unwrap();

        let assigned = scene.mesh(mesh).unwrap().material.unwrap();
        assert_eq!(scene.material(assigned).unwrap().diffuse_color, purple);
    }

    #[test]
    fn dispose_invalidates_handles() {
        let mut scene = Scene::new();
        let mesh = scene.create_box("box", 0.1).unwrap();
        scene.dispose();
        assert_eq!(scene.mesh(mesh).unwrap_err(), SceneError::UnknownMesh(mesh));
    }
}
