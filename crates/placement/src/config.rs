use arplace_scene::Color3;
use arplace_xr::{HitTestEntityType, SessionMode};
use serde::{Deserialize, Serialize};

/// Startup parameters for the scene and the XR session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Id of the canvas element the engine attaches to.
    pub canvas_id: String,
    /// Mode requested from the runtime.
    pub session_mode: SessionMode,
    /// Surfaces the hit-test feature reports.
    pub hit_test_entity_types: Vec<HitTestEntityType>,
    /// Edge length of the placed box, in metres.
    pub box_size: f32,
    /// Box diffuse colour.
    pub box_color: Color3,
    /// Reticle disc radius, in metres.
    pub reticle_radius: f32,
    /// Reticle diffuse colour.
    pub reticle_color: Color3,
    /// Direction of the hemispheric light.
    pub light_direction: [f32; 3],
    /// Sky colour of the hemispheric light.
    pub light_diffuse: Color3,
    /// Ground colour of the hemispheric light.
    pub light_ground_color: Color3,
    /// Light intensity.
    pub light_intensity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            session_mode: SessionMode::ImmersiveAr,
            hit_test_entity_types: vec![HitTestEntityType::Plane],
            box_size: 0.1,
            box_color: Color3::new(0x58 as f32 / 255.0, 0x53 as f32 / 255.0, 0xe6 as f32 / 255.0),
            reticle_radius: 0.05,
            reticle_color: Color3::WHITE,
            light_direction: [-0.5, -1.0, -0.25],
            light_diffuse: Color3::WHITE,
            light_ground_color: Color3::new(
                0xbb as f32 / 255.0,
                0xbb as f32 / 255.0,
                0xff as f32 / 255.0,
            ),
            light_intensity: 1.0,
        }
    }
}
