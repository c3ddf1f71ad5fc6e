//! Materials and lights.

use glam::Vec3;

use crate::Color3;

/// Index of a material inside its [`crate::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

/// Lambertian material with a diffuse colour.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    /// Debug name.
    pub name: String,
    /// Diffuse colour.
    pub diffuse_color: Color3,
    /// Surface roughness, 0 (mirror) to 1 (matte).
    pub roughness: f32,
}

impl StandardMaterial {
    /// White, fully rough.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse_color: Color3::WHITE,
            roughness: 1.0,
        }
    }

    /// Builder-style diffuse colour override.
    pub fn with_diffuse(mut self, color: Color3) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Builder-style roughness override.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }
}

/// Sky/ground ambient light.
#[derive(Debug, Clone, PartialEq)]
pub struct HemisphericLight {
    /// Debug name.
    pub name: String,
    /// Direction the light points towards.
    pub direction: Vec3,
    /// Sky colour.
    pub diffuse: Color3,
    /// Ground colour.
    pub ground_color: Color3,
    /// Scalar multiplier.
    pub intensity: f32,
}

impl HemisphericLight {
    /// White light, black ground, unit intensity.
    pub fn new(name: impl Into<String>, direction: Vec3) -> Self {
        Self {
            name: name.into(),
            direction,
            diffuse: Color3::WHITE,
            ground_color: Color3::new(0.0, 0.0, 0.0),
            intensity: 1.0,
        }
    }
}
