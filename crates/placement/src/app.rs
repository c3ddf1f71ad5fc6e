//! Application wiring: scene, XR bootstrap, subscriptions and teardown.

use arplace_scene::{Engine, ObserverHandle, PointerEvent, RenderStats, Scene, SceneError};
use arplace_xr::{
    FeatureVersion, HitTestOptions, XrError, XrExperience, XrExperienceOptions, XrRuntime,
};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::{build_scene, Notifier, PlacementController, PlacementEvent, SceneConfig};

/// Alert shown when the runtime cannot start the configured session mode.
pub const UNSUPPORTED_MESSAGE: &str = "WebXR is not supported";

/// Outcome of [`ArApp::init_xr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrInit {
    /// Hit-testing enabled and both handlers installed.
    Ready,
    /// The session mode is unsupported; nothing was installed.
    Unsupported,
}

#[derive(Debug, Clone, Copy)]
struct Subscriptions {
    hit_test: ObserverHandle,
    pointer_down: ObserverHandle,
}

/// The tap-to-place application.
///
/// The scene and the controller are shared with the hit-test and pointer callbacks; both
/// run on the frame thread and borrow them only for the duration of one call.
pub struct ArApp {
    engine: Engine,
    scene: Rc<RefCell<Scene>>,
    controller: Rc<RefCell<PlacementController>>,
    xr: Option<XrExperience>,
    subscriptions: Option<Subscriptions>,
    pending_pointer: Vec<PointerEvent>,
    config: SceneConfig,
}

impl std::fmt::Debug for ArApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArApp")
            .field("engine", &self.engine)
            .field("xr", &self.xr)
            .field("subscribed", &self.subscriptions.is_some())
            .finish_non_exhaustive()
    }
}

impl ArApp {
    /// Build the scene on `engine`'s canvas. XR is not initialised yet.
    pub fn new(engine: Engine, config: SceneConfig) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let entities = build_scene(&mut scene, &config)?;
        let controller = PlacementController::new(&scene, entities)?;
        info!(
            canvas = %engine.canvas().id,
            antialias = engine.antialias(),
            mode = %config.session_mode,
            "app created"
        );
        Ok(Self {
            engine,
            scene: Rc::new(RefCell::new(scene)),
            controller: Rc::new(RefCell::new(controller)),
            xr: None,
            subscriptions: None,
            pending_pointer: Vec::new(),
            config,
        })
    }

    /// Query session support and, if supported, enable hit-testing and install handlers.
    ///
    /// When unsupported, `notifier` is alerted and no feature or handler is installed.
    pub async fn init_xr(
        &mut self,
        runtime: Box<dyn XrRuntime>,
        notifier: &mut dyn Notifier,
    ) -> Result<XrInit, XrError> {
        self.unsubscribe();
        let mode = self.config.session_mode;
        let xr = self.xr.insert(XrExperience::create_default(
            runtime,
            XrExperienceOptions::for_mode(mode),
        ));

        let supported = xr
            .base_experience
            .session_manager
            .is_session_supported(mode)
            .await;
        if !supported {
            warn!(%mode, "session mode unsupported");
            notifier.alert(UNSUPPORTED_MESSAGE);
            return Ok(XrInit::Unsupported);
        }

        let options = HitTestOptions {
            entity_types: self.config.hit_test_entity_types.clone(),
            offset_ray: None,
        };
        let feature =
            xr.base_experience
                .enable_hit_test(FeatureVersion::Latest, options, true, true)?;

        let scene = Rc::clone(&self.scene);
        let controller = Rc::clone(&self.controller);
        let hit_test = feature.on_hit_test_result.add(move |results| {
            let mut scene = scene.borrow_mut();
            if let Err(err) = controller
                .borrow_mut()
                .on_hit_test_results(&mut scene, results)
            {
                error!(%err, "failed to update reticle");
            }
        });

        let scene = Rc::clone(&self.scene);
        let controller = Rc::clone(&self.controller);
        let pointer_down = self.engine.on_pointer_down.add(move |_| {
            let mut scene = scene.borrow_mut();
            if let Err(err) = controller.borrow_mut().on_pointer_down(&mut scene) {
                error!(%err, "failed to place object");
            }
        });

        self.subscriptions = Some(Subscriptions {
            hit_test,
            pointer_down,
        });
        info!(%mode, "XR initialised");
        Ok(XrInit::Ready)
    }

    /// Start the XR session (the user pressed "enter AR").
    pub async fn enter_xr(&mut self) -> Result<(), XrError> {
        match self.xr.as_mut() {
            Some(xr) => xr.base_experience.enter_xr().await,
            None => Err(XrError::SessionNotRunning),
        }
    }

    /// Run one frame: publish hit-test results, deliver queued pointer presses, render.
    pub fn frame(&mut self) -> RenderStats {
        let frame = self.engine.begin_frame();
        if let Some(xr) = self.xr.as_mut() {
            xr.base_experience.frame();
        }
        for event in std::mem::take(&mut self.pending_pointer) {
            self.engine.pointer_down(event.x, event.y);
        }
        let stats = self.scene.borrow_mut().render();
        debug!(frame, visible = stats.visible_meshes, "frame done");
        stats
    }

    /// Deliver a pointer press on the canvas immediately.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.engine.pointer_down(x, y);
    }

    /// Deliver a pointer press during the next [`ArApp::frame`], after hit-testing.
    pub fn queue_pointer_down(&mut self, x: f32, y: f32) {
        self.pending_pointer.push(PointerEvent { x, y });
    }

    /// Forward the host window's resize signal.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }

    /// Events recorded by the controller since the last call.
    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        self.controller.borrow_mut().drain_events()
    }

    /// The engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The scene.
    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    /// The placement controller.
    pub fn controller(&self) -> Ref<'_, PlacementController> {
        self.controller.borrow()
    }

    /// The XR experience, once [`ArApp::init_xr`] ran.
    pub fn xr(&self) -> Option<&XrExperience> {
        self.xr.as_ref()
    }

    /// Active configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Whether the hit-test and pointer handlers are installed.
    pub fn is_subscribed(&self) -> bool {
        self.subscriptions.is_some()
    }

    fn unsubscribe(&mut self) {
        let Some(subs) = self.subscriptions.take() else {
            return;
        };
        self.engine.on_pointer_down.remove(subs.pointer_down);
        if let Some(feature) = self
            .xr
            .as_mut()
            .and_then(|xr| xr.base_experience.features_manager.hit_test_mut())
        {
            feature.on_hit_test_result.remove(subs.hit_test);
        }
    }

    /// Remove both handlers, disable hit-testing, end the session and dispose the scene.
    pub fn teardown(&mut self) {
        self.unsubscribe();
        if let Some(xr) = self.xr.as_mut() {
            let base = &mut xr.base_experience;
            base.features_manager.disable_hit_test();
            if base.session_manager.is_running() {
                if let Err(err) = base.exit_xr() {
                    warn!(%err, "failed to end XR session");
                }
            }
        }
        self.scene.borrow_mut().dispose();
        info!("app torn down");
    }
}
