#![warn(missing_docs)]
//! XR session management and the hit-test feature.
//!
//! The device side is abstracted behind [`XrRuntime`]; everything above it (session state,
//! feature activation, per-frame hit-test dispatch) is plain single-threaded code.

mod experience;
mod features;
mod session;

pub use experience::{BaseExperience, XrExperience, XrExperienceOptions, XrUiOptions};
pub use features::{FeatureVersion, FeaturesManager, HIT_TEST_FEATURE_NAME};
pub use hit_test::{HitTestEntityType, HitTestFeature, HitTestOptions, HitTestResult, Ray};
pub use session::{SessionManager, SessionMode, SessionState, XrRuntime};

use thiserror::Error;

/// Errors raised by session and feature management.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XrError {
    /// The runtime cannot run the requested mode.
    #[error("session mode `{0}` is not supported")]
    UnsupportedSessionMode(SessionMode),
    /// A session string did not name a known mode.
    #[error("unknown session mode `{0}`")]
    InvalidSessionMode(String),
    /// `start_session` was called while a session was running.
    #[error("an XR session is already running")]
    SessionAlreadyRunning,
    /// The operation needs a running session.
    #[error("no XR session is running")]
    SessionNotRunning,
    /// Feature version string is not one this build ships.
    #[error("feature `{feature}` has no version `{version}`")]
    UnknownFeatureVersion {
        /// Feature name.
        feature: &'static str,
        /// Requested version.
        version: String,
    },
    /// A feature marked required is not available on the runtime.
    #[error("required feature `{0}` is unavailable")]
    RequiredFeatureUnavailable(&'static str),
}
