//! Property-based tests for reticle tracking and tap placement
//!
//! Validates placement invariants:
//! - The reticle mirrors the first hit of every frame, or hides on an empty frame
//! - Feeding the same frame twice never drifts the reticle
//! - A tap lifts the box by half its size above the remembered hit
//! - The last tap wins; earlier placements leave no trace

use arplace_placement::{build_scene, PlacementController, SceneConfig};
use arplace_scene::Scene;
use arplace_testkit::plane_hit;
use arplace_xr::HitTestResult;
use glam::{Quat, Vec3};
use proptest::prelude::*;

fn setup(box_size: f32) -> (Scene, PlacementController) {
    let mut scene = Scene::new();
    let config = SceneConfig {
        box_size,
        ..SceneConfig::default()
    };
    let entities = build_scene(&mut scene, &config).expect("scene builds");
    let controller = PlacementController::new(&scene, entities).expect("box exists");
    (scene, controller)
}

fn arb_hit() -> impl Strategy<Value = HitTestResult> {
    (
        -5.0f32..5.0,
        -5.0f32..5.0,
        -5.0f32..5.0,
        -std::f32::consts::PI..std::f32::consts::PI,
        -1.0f32..1.0,
    )
        .prop_map(|(x, y, z, yaw, tilt)| {
            let rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(tilt);
            plane_hit(Vec3::new(x, y, z), rotation)
        })
}

/// Quaternions q and -q describe the same orientation.
fn same_rotation(a: Quat, b: Quat) -> bool {
    a.abs_diff_eq(b, 1e-4) || a.abs_diff_eq(-b, 1e-4)
}

proptest! {
    /// Property: the reticle reflects only the first candidate of a frame
    #[test]
    fn reticle_matches_first_candidate(frame in prop::collection::vec(arb_hit(), 0..6)) {
        let (mut scene, mut controller) = setup(0.1);
        controller.on_hit_test_results(&mut scene, &frame).unwrap();

        let reticle = scene.mesh(controller.reticle()).unwrap();
        match frame.first() {
            Some(hit) => {
                let pose = hit.pose();
                prop_assert!(reticle.is_visible);
                prop_assert!(reticle.position.abs_diff_eq(pose.position, 1e-4));
                prop_assert!(same_rotation(reticle.rotation, pose.rotation));
                prop_assert_eq!(controller.hit_test_result(), Some(hit));
            }
            None => {
                prop_assert!(!reticle.is_visible);
                prop_assert!(controller.hit_test_result().is_none());
            }
        }
    }

    /// Property: the same frame twice yields the same reticle pose
    #[test]
    fn repeated_frame_does_not_drift(hit in arb_hit()) {
        let (mut scene, mut controller) = setup(0.1);
        controller.on_hit_test_results(&mut scene, &[hit]).unwrap();
        let first = scene.mesh(controller.reticle()).unwrap().pose();
        controller.on_hit_test_results(&mut scene, &[hit]).unwrap();
        let second = scene.mesh(controller.reticle()).unwrap().pose();

        prop_assert_eq!(first, second);
    }

    /// Property: a tap puts the box at (x, y + size/2, z) with the hit's rotation
    #[test]
    fn tap_offsets_by_half_size(hit in arb_hit(), size in 0.01f32..1.0) {
        let (mut scene, mut controller) = setup(size);
        controller.on_hit_test_results(&mut scene, &[hit]).unwrap();
        prop_assert!(controller.on_pointer_down(&mut scene).unwrap());

        let pose = hit.pose();
        let placed = scene.mesh(controller.placed()).unwrap();
        let expected = pose.position + Vec3::new(0.0, size / 2.0, 0.0);
        prop_assert!(placed.is_visible);
        prop_assert!(placed.position.abs_diff_eq(expected, 1e-4));
        prop_assert!(same_rotation(placed.rotation, pose.rotation));
    }

    /// Property: after several taps on different hits, only the last one counts
    #[test]
    fn last_tap_wins(hits in prop::collection::vec(arb_hit(), 1..8)) {
        let (mut scene, mut controller) = setup(0.1);
        for hit in &hits {
            controller.on_hit_test_results(&mut scene, std::slice::from_ref(hit)).unwrap();
            controller.on_pointer_down(&mut scene).unwrap();
        }

        let last = hits.last().unwrap().pose();
        let placed = scene.mesh(controller.placed()).unwrap();
        prop_assert!(placed.position.abs_diff_eq(last.position + Vec3::new(0.0, 0.05, 0.0), 1e-4));
        prop_assert!(same_rotation(placed.rotation, last.rotation));
    }

    /// Property: taps with no surface never reveal the box
    #[test]
    fn taps_without_surface_keep_box_hidden(taps in 1usize..5) {
        let (mut scene, mut controller) = setup(0.1);
        controller.on_hit_test_results(&mut scene, &[]).unwrap();
        for _ in 0..taps {
            prop_assert!(!controller.on_pointer_down(&mut scene).unwrap());
        }
        prop_assert!(!scene.mesh(controller.placed()).unwrap().is_visible);
    }
}
