#![warn(missing_docs)]
//! Minimal scene graph for the AR placement app.
//!
//! Meshes, materials and lights live in a [`Scene`]; an [`Engine`] owns the canvas the
//! scene is drawn to. Per-frame signals (pointer input, hit-test results) are delivered
//! through [`Observable`].

mod color;
mod engine;
mod material;
mod mesh;
mod observable;
mod pose;
mod scene;

pub use color::Color3;
pub use engine::{Canvas, Document, Engine};
pub use material::{HemisphericLight, MaterialId, StandardMaterial};
pub use mesh::{Mesh, MeshId, MeshShape};
pub use observable::{Observable, ObserverHandle};
pub use pose::Pose;
pub use scene::{PointerEvent, RenderStats, Scene};

use thiserror::Error;

/// Errors raised while building or driving a scene.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// No canvas with the requested id exists in the document.
    #[error("canvas element `{0}` not found")]
    CanvasNotFound(String),
    /// A colour string was not `#rrggbb`.
    #[error("invalid hex colour `{0}`")]
    InvalidColor(String),
    /// A mesh handle does not belong to this scene.
    #[error("unknown mesh {0:?}")]
    UnknownMesh(MeshId),
    /// Mesh construction was given a non-positive dimension.
    #[error("mesh `{name}` needs a positive {dimension}, got {value}")]
    InvalidDimension {
        /// Mesh name.
        name: String,
        /// Which dimension was rejected (`size`, `radius`).
        dimension: &'static str,
        /// Rejected value.
        value: f32,
    },
}
