#![warn(missing_docs)]
//! Test doubles for the XR runtime and hit-result fixtures.

use arplace_scene::{Canvas, Engine, Pose};
use arplace_xr::{HitTestEntityType, HitTestOptions, HitTestResult, SessionMode, XrRuntime};
use async_trait::async_trait;
use glam::{Quat, Vec3};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Plane hit at `position` with `rotation`.
pub fn plane_hit(position: Vec3, rotation: Quat) -> HitTestResult {
    HitTestResult::from_pose(Pose::new(position, rotation), HitTestEntityType::Plane)
}

/// Plane hit at `(x, y, z)`, facing up.
pub fn plane_hit_at(x: f32, y: f32, z: f32) -> HitTestResult {
    plane_hit(Vec3::new(x, y, z), Quat::IDENTITY)
}

/// Engine attached to a 1280x720 canvas named `canvas`.
pub fn test_engine() -> Engine {
    Engine::new(Canvas::new("canvas", 1280, 720), true)
}

#[derive(Debug, Default)]
struct MockState {
    supported: Vec<SessionMode>,
    hit_test_available: bool,
    frames: VecDeque<Vec<HitTestResult>>,
    support_queries: usize,
    hit_test_calls: usize,
    last_options: Option<HitTestOptions>,
}

/// Scripted [`XrRuntime`]. Each `hit_test` call pops the next queued frame; an empty
/// queue yields no candidates.
#[derive(Debug, Clone)]
pub struct MockRuntime {
    state: Rc<RefCell<MockState>>,
}

/// Test-side view of a [`MockRuntime`] that was moved into an app.
#[derive(Debug, Clone)]
pub struct MockHandle {
    state: Rc<RefCell<MockState>>,
}

impl MockRuntime {
    /// Runtime supporting exactly `supported`, with hit-testing available.
    pub fn new(supported: &[SessionMode]) -> (Self, MockHandle) {
        let state = Rc::new(RefCell::new(MockState {
            supported: supported.to_vec(),
            hit_test_available: true,
            ..MockState::default()
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            MockHandle { state },
        )
    }

    /// Runtime supporting `immersive-ar`.
    pub fn ar() -> (Self, MockHandle) {
        Self::new(&[SessionMode::ImmersiveAr])
    }

    /// Runtime supporting nothing.
    pub fn unsupported() -> (Self, MockHandle) {
        Self::new(&[])
    }
}

impl MockHandle {
    /// Queue the candidates for a future frame.
    pub fn push_frame(&self, candidates: Vec<HitTestResult>) {
        self.state.borrow_mut().frames.push_back(candidates);
    }

    /// Toggle hit-test availability.
    pub fn set_hit_test_available(&self, available: bool) {
        self.state.borrow_mut().hit_test_available = available;
    }

    /// Number of support queries answered.
    pub fn support_queries(&self) -> usize {
        self.state.borrow().support_queries
    }

    /// Number of frames polled for hit candidates.
    pub fn hit_test_calls(&self) -> usize {
        self.state.borrow().hit_test_calls
    }

    /// Options passed on the most recent poll.
    pub fn last_options(&self) -> Option<HitTestOptions> {
        self.state.borrow().last_options.clone()
    }
}

#[async_trait(?Send)]
impl XrRuntime for MockRuntime {
    async fn is_session_supported(&self, mode: SessionMode) -> bool {
        let mut state = self.state.borrow_mut();
        state.support_queries += 1;
        state.supported.contains(&mode)
    }

    fn supports_hit_test(&self) -> bool {
        self.state.borrow().hit_test_available
    }

    fn hit_test(&mut self, options: &HitTestOptions) -> Vec<HitTestResult> {
        let mut state = self.state.borrow_mut();
        state.hit_test_calls += 1;
        state.last_options = Some(options.clone());
        let frame = state.frames.pop_front().unwrap_or_default();
        tracing::trace!(candidates = frame.len(), "mock hit-test frame");
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_pop_in_order_then_run_dry() {
        let (mut runtime, handle) = MockRuntime::ar();
        handle.push_frame(vec![plane_hit_at(0.0, 1.0, 0.0)]);
        handle.push_frame(Vec::new());

        let options = HitTestOptions::planes();
        assert_eq!(runtime.hit_test(&options).len(), 1);
        assert!(runtime.hit_test(&options).is_empty());
        assert!(runtime.hit_test(&options).is_empty());
        assert_eq!(handle.hit_test_calls(), 3);
        assert_eq!(handle.last_options(), Some(options));
    }

    #[test]
    fn support_queries_are_counted() {
        let (runtime, handle) = MockRuntime::unsupported();
        assert!(!pollster::block_on(
            runtime.is_session_supported(SessionMode::ImmersiveAr)
        ));
        assert_eq!(handle.support_queries(), 1);
    }
}
