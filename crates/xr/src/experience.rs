//! Default XR experience: one session manager plus its features.

use tracing::{debug, warn};

use crate::{
    FeatureVersion, FeaturesManager, HitTestFeature, HitTestOptions, SessionManager, SessionMode,
    XrError, XrRuntime,
};

/// Options for the enter/exit UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrUiOptions {
    /// Mode requested when the user enters XR.
    pub session_mode: SessionMode,
}

/// Options for [`XrExperience::create_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrExperienceOptions {
    /// UI configuration.
    pub ui_options: XrUiOptions,
}

impl XrExperienceOptions {
    /// Options requesting `session_mode`.
    pub fn for_mode(session_mode: SessionMode) -> Self {
        Self {
            ui_options: XrUiOptions { session_mode },
        }
    }
}

impl Default for XrExperienceOptions {
    fn default() -> Self {
        Self::for_mode(SessionMode::ImmersiveVr)
    }
}

/// Session manager and feature manager bound to one session mode.
#[derive(Debug)]
pub struct BaseExperience {
    /// Session lifecycle and runtime access.
    pub session_manager: SessionManager,
    /// Enabled features.
    pub features_manager: FeaturesManager,
    session_mode: SessionMode,
}

impl BaseExperience {
    /// Enable hit-testing, attaching now if a session is running and `attach_if_possible`.
    pub fn enable_hit_test(
        &mut self,
        version: FeatureVersion,
        options: HitTestOptions,
        attach_if_possible: bool,
        required: bool,
    ) -> Result<&mut HitTestFeature, XrError> {
        let running = self.session_manager.is_running();
        let hit_test_available = self.session_manager.runtime().supports_hit_test();
        if running && !hit_test_available && required {
            return Err(XrError::RequiredFeatureUnavailable(
                crate::HIT_TEST_FEATURE_NAME,
            ));
        }
        self.features_manager.enable_hit_test(
            version,
            options,
            running,
            attach_if_possible && hit_test_available,
            required,
        )
    }

    /// Start a session in the configured mode and attach enabled features.
    pub async fn enter_xr(&mut self) -> Result<(), XrError> {
        self.session_manager.start_session(self.session_mode).await?;
        let hit_test_available = self.session_manager.runtime().supports_hit_test();
        if let Err(err) = self.features_manager.attach_all(hit_test_available) {
            warn!(%err, "feature attach failed; ending session");
            self.session_manager.end_session()?;
            return Err(err);
        }
        Ok(())
    }

    /// Detach features and end the running session.
    pub fn exit_xr(&mut self) -> Result<(), XrError> {
        self.features_manager.detach_all();
        self.session_manager.end_session()
    }

    /// Poll the runtime for this frame's hit candidates and publish them.
    ///
    /// Returns the number of results published, or `None` if no attached hit-test
    /// feature received the frame.
    pub fn frame(&mut self) -> Option<usize> {
        if !self.session_manager.is_running() {
            return None;
        }
        let feature = self.features_manager.hit_test_mut()?;
        if !feature.is_attached() {
            return None;
        }
        let candidates = self.session_manager.runtime_mut().hit_test(feature.options());
        feature.process_candidates(candidates);
        let published = feature.last_results().len();
        debug!(published, "xr frame");
        Some(published)
    }
}

/// Default XR experience.
#[derive(Debug)]
pub struct XrExperience {
    /// The underlying experience.
    pub base_experience: BaseExperience,
}

impl XrExperience {
    /// Bind `runtime` to a new experience. No session is started.
    pub fn create_default(runtime: Box<dyn XrRuntime>, options: XrExperienceOptions) -> Self {
        Self {
            base_experience: BaseExperience {
                session_manager: SessionManager::new(runtime),
                features_manager: FeaturesManager::new(),
                session_mode: options.ui_options.session_mode,
            },
        }
    }
}
