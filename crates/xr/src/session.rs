//! Session modes, the runtime seam and session lifecycle.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::{HitTestOptions, HitTestResult, XrError};

/// Operating mode requested from the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    /// Non-immersive, rendered into the page.
    Inline,
    /// Fully virtual headset session.
    ImmersiveVr,
    /// Camera passthrough with world tracking.
    ImmersiveAr,
}

impl SessionMode {
    /// The mode's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Inline => "inline",
            SessionMode::ImmersiveVr => "immersive-vr",
            SessionMode::ImmersiveAr => "immersive-ar",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionMode {
    type Err = XrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(SessionMode::Inline),
            "immersive-vr" => Ok(SessionMode::ImmersiveVr),
            "immersive-ar" => Ok(SessionMode::ImmersiveAr),
            other => Err(XrError::InvalidSessionMode(other.to_string())),
        }
    }
}

/// The device/browser XR implementation.
///
/// Only the support query is asynchronous; hit-testing is polled once per frame from the
/// render thread.
#[async_trait(?Send)]
pub trait XrRuntime {
    /// Whether `mode` can be started on this device.
    async fn is_session_supported(&self, mode: SessionMode) -> bool;

    /// Whether the runtime can perform hit-tests at all.
    fn supports_hit_test(&self) -> bool {
        true
    }

    /// Intersection candidates for the current frame, in the runtime's own order.
    fn hit_test(&mut self, options: &HitTestOptions) -> Vec<HitTestResult>;
}

/// Lifecycle of the XR session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session requested yet.
    #[default]
    NotStarted,
    /// Frames are flowing.
    Running(SessionMode),
    /// The session was ended; a new one may be started.
    Ended,
}

/// Wraps the runtime and tracks session state.
pub struct SessionManager {
    runtime: Box<dyn XrRuntime>,
    state: SessionState,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Wrap a runtime; no session is started.
    pub fn new(runtime: Box<dyn XrRuntime>) -> Self {
        Self {
            runtime,
            state: SessionState::NotStarted,
        }
    }

    /// Ask the runtime whether `mode` is available.
    pub async fn is_session_supported(&self, mode: SessionMode) -> bool {
        let supported = self.runtime.is_session_supported(mode).await;
        info!(%mode, supported, "session support query");
        supported
    }

    /// Start a session in `mode`.
    pub async fn start_session(&mut self, mode: SessionMode) -> Result<(), XrError> {
        if matches!(self.state, SessionState::Running(_)) {
            return Err(XrError::SessionAlreadyRunning);
        }
        if !self.runtime.is_session_supported(mode).await {
            warn!(%mode, "refusing to start unsupported session");
            return Err(XrError::UnsupportedSessionMode(mode));
        }
        self.state = SessionState::Running(mode);
        info!(%mode, "XR session started");
        Ok(())
    }

    /// End the running session.
    pub fn end_session(&mut self) -> Result<(), XrError> {
        match self.state {
            SessionState::Running(mode) => {
                self.state = SessionState::Ended;
                info!(%mode, "XR session ended");
                Ok(())
            }
            _ => Err(XrError::SessionNotRunning),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a session is running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running(_))
    }

    pub(crate) fn runtime(&self) -> &dyn XrRuntime {
        self.runtime.as_ref()
    }

    pub(crate) fn runtime_mut(&mut self) -> &mut dyn XrRuntime {
        self.runtime.as_mut()
    }
}
