use arplace_placement::{ArApp, RecordingNotifier, SceneConfig, XrInit};
use arplace_testkit::{plane_hit_at, test_engine, MockRuntime};

#[test]
fn tap_to_place_runs_end_to_end() {
    let mut app = ArApp::new(test_engine(), SceneConfig::default()).expect("scene builds");
    let (runtime, handle) = MockRuntime::ar();
    let init = pollster::block_on(app.init_xr(Box::new(runtime), &mut RecordingNotifier::default()))
        .expect("init");
    assert_eq!(init, XrInit::Ready);
    pollster::block_on(app.enter_xr()).expect("session starts");

    handle.push_frame(vec![plane_hit_at(0.0, 0.0, -1.0)]);
    app.queue_pointer_down(640.0, 360.0);
    let stats = app.frame();
    assert_eq!(stats.visible_meshes, 2);

    app.teardown();
    assert!(!app.is_subscribed());
}
