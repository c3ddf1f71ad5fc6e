use arplace_scene::{HemisphericLight, MeshId, Scene, SceneError, StandardMaterial};
use glam::Vec3;

use crate::SceneConfig;

/// Handles to the meshes created by [`build_scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneEntities {
    /// Hit-test marker disc.
    pub reticle: MeshId,
    /// The box dropped on tap.
    pub placed: MeshId,
}

/// Create the reticle, the box and the light. Both meshes start hidden.
pub fn build_scene(scene: &mut Scene, config: &SceneConfig) -> Result<SceneEntities, SceneError> {
    let reticle = scene.create_disc("reticle", config.reticle_radius)?;
    let reticle_material = scene.add_material(
        StandardMaterial::new("reticleMaterial")
            .with_diffuse(config.reticle_color)
            .with_roughness(1.0),
    );
    scene.set_material(reticle, reticle_material)?;
    scene.mesh_mut(reticle)?.is_visible = false;

    let placed = scene.create_box("box", config.box_size)?;
    let box_material =
        scene.add_material(StandardMaterial::new("boxMaterial").with_diffuse(config.box_color));
    scene.set_material(placed, box_material)?;
    scene.mesh_mut(placed)?.is_visible = false;

    let mut light = HemisphericLight::new("light", Vec3::from_array(config.light_direction));
    light.diffuse = config.light_diffuse;
    light.ground_color = config.light_ground_color;
    light.intensity = config.light_intensity;
    scene.add_light(light);

    Ok(SceneEntities { reticle, placed })
}
