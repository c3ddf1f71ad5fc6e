//! Reticle tracking and tap placement.

use arplace_scene::{MeshId, Pose, Scene, SceneError};
use arplace_xr::HitTestResult;
use serde::Serialize;
use tracing::debug;

use crate::SceneEntities;

/// Observable outcome of a controller step, for logging and replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementEvent {
    /// The reticle appeared or changed pose.
    ReticleMoved {
        /// New position.
        position: [f32; 3],
        /// New rotation as `[x, y, z, w]`.
        rotation: [f32; 4],
    },
    /// No surface under the reticle any more.
    ReticleHidden,
    /// The box was (re)placed.
    ObjectPlaced {
        /// Box centre.
        position: [f32; 3],
        /// Box rotation as `[x, y, z, w]`.
        rotation: [f32; 4],
    },
    /// A tap arrived with no surface detected.
    TapIgnored,
}

impl PlacementEvent {
    fn reticle_moved(pose: Pose) -> Self {
        PlacementEvent::ReticleMoved {
            position: pose.position.to_array(),
            rotation: pose.rotation.to_array(),
        }
    }

    fn object_placed(pose: Pose) -> Self {
        PlacementEvent::ObjectPlaced {
            position: pose.position.to_array(),
            rotation: pose.rotation.to_array(),
        }
    }
}

/// Moves the reticle to the latest hit and drops the box on tap.
///
/// The remembered hit result is the only link between the hit-test stream and taps:
/// it is replaced by the first result of every non-empty frame and cleared by every
/// empty one. The box pose is only ever derived from it.
#[derive(Debug)]
pub struct PlacementController {
    reticle: MeshId,
    placed: MeshId,
    object_height: f32,
    hit_test_result: Option<HitTestResult>,
    events: Vec<PlacementEvent>,
}

impl PlacementController {
    /// Control `entities`. On placement the box is lifted by half of its mesh height.
    pub fn new(scene: &Scene, entities: SceneEntities) -> Result<Self, SceneError> {
        let object_height = scene.mesh(entities.placed)?.shape.height();
        Ok(Self {
            reticle: entities.reticle,
            placed: entities.placed,
            object_height,
            hit_test_result: None,
            events: Vec::new(),
        })
    }

    /// Handle one frame's hit-test results.
    ///
    /// Only the first result is used; the rest are ignored.
    pub fn on_hit_test_results(
        &mut self,
        scene: &mut Scene,
        results: &[HitTestResult],
    ) -> Result<(), SceneError> {
        let reticle = scene.mesh_mut(self.reticle)?;
        match results.first() {
            Some(hit) => {
                let pose = hit.pose();
                let changed = !reticle.is_visible || reticle.pose() != pose;
                reticle.set_pose(pose);
                reticle.is_visible = true;
                self.hit_test_result = Some(*hit);
                if changed {
                    self.events.push(PlacementEvent::reticle_moved(pose));
                }
            }
            None => {
                if reticle.is_visible {
                    self.events.push(PlacementEvent::ReticleHidden);
                }
                reticle.is_visible = false;
                self.hit_test_result = None;
            }
        }
        Ok(())
    }

    /// Handle a pointer press anywhere on the canvas.
    ///
    /// Returns `true` if the box was placed.
    pub fn on_pointer_down(&mut self, scene: &mut Scene) -> Result<bool, SceneError> {
        let Some(hit) = self.hit_test_result else {
            debug!("tap ignored: no surface detected");
            self.events.push(PlacementEvent::TapIgnored);
            return Ok(false);
        };
        let placed = scene.mesh_mut(self.placed)?;
        placed.apply_transform(&hit.transformation_matrix);
        placed.position.y += self.object_height / 2.0;
        placed.is_visible = true;

        let pose = placed.pose();
        debug!(position = ?pose.position, "object placed");
        self.events.push(PlacementEvent::object_placed(pose));
        Ok(true)
    }

    /// The hit remembered from the latest frame.
    pub fn hit_test_result(&self) -> Option<&HitTestResult> {
        self.hit_test_result.as_ref()
    }

    /// Reticle mesh handle.
    pub fn reticle(&self) -> MeshId {
        self.reticle
    }

    /// Box mesh handle.
    pub fn placed(&self) -> MeshId {
        self.placed
    }

    /// Take events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        std::mem::take(&mut self.events)
    }
}
