//! Feature activation.

use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::{HitTestFeature, HitTestOptions, XrError};

/// Registry name of the hit-test feature.
pub const HIT_TEST_FEATURE_NAME: &str = "xr-hit-test";

const HIT_TEST_LATEST_VERSION: u32 = 1;

/// Which implementation of a feature to enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureVersion {
    /// Newest shipped version.
    Latest,
    /// Newest version considered stable.
    Stable,
    /// An explicit version number.
    Number(u32),
}

impl FeatureVersion {
    fn resolve(self, latest: u32) -> Option<u32> {
        match self {
            FeatureVersion::Latest | FeatureVersion::Stable => Some(latest),
            FeatureVersion::Number(n) if (1..=latest).contains(&n) => Some(n),
            FeatureVersion::Number(_) => None,
        }
    }
}

impl FromStr for FeatureVersion {
    type Err = XrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(FeatureVersion::Latest),
            "stable" => Ok(FeatureVersion::Stable),
            other => other
                .parse::<u32>()
                .map(FeatureVersion::Number)
                .map_err(|_| XrError::UnknownFeatureVersion {
                    feature: HIT_TEST_FEATURE_NAME,
                    version: other.to_string(),
                }),
        }
    }
}

impl fmt::Display for FeatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureVersion::Latest => f.write_str("latest"),
            FeatureVersion::Stable => f.write_str("stable"),
            FeatureVersion::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Enables, attaches and disables features for an XR experience.
#[derive(Debug, Default)]
pub struct FeaturesManager {
    hit_test: Option<HitTestFeature>,
}

impl FeaturesManager {
    /// No features enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the hit-test feature, replacing any previous instance.
    ///
    /// With `attach_if_possible`, the feature attaches immediately when `session_running`;
    /// otherwise it attaches when the next session starts.
    pub fn enable_hit_test(
        &mut self,
        version: FeatureVersion,
        options: HitTestOptions,
        session_running: bool,
        attach_if_possible: bool,
        required: bool,
    ) -> Result<&mut HitTestFeature, XrError> {
        let resolved = version
            .resolve(HIT_TEST_LATEST_VERSION)
            .ok_or_else(|| XrError::UnknownFeatureVersion {
                feature: HIT_TEST_FEATURE_NAME,
                version: version.to_string(),
            })?;

        if self.hit_test.is_some() {
            warn!(feature = HIT_TEST_FEATURE_NAME, "feature re-enabled; previous observers dropped");
        }

        let mut feature = HitTestFeature::new(options, required);
        if session_running && attach_if_possible {
            feature.attach();
        }
        info!(
            feature = HIT_TEST_FEATURE_NAME,
            version = resolved,
            attached = feature.is_attached(),
            "feature enabled"
        );
        Ok(self.hit_test.insert(feature))
    }

    /// Disable the hit-test feature. Returns `false` if it was not enabled.
    pub fn disable_hit_test(&mut self) -> bool {
        match self.hit_test.take() {
            Some(_) => {
                info!(feature = HIT_TEST_FEATURE_NAME, "feature disabled");
                true
            }
            None => false,
        }
    }

    /// The enabled hit-test feature.
    pub fn hit_test(&self) -> Option<&HitTestFeature> {
        self.hit_test.as_ref()
    }

    /// The enabled hit-test feature, mutably.
    pub fn hit_test_mut(&mut self) -> Option<&mut HitTestFeature> {
        self.hit_test.as_mut()
    }

    /// Names of enabled features.
    pub fn enabled_features(&self) -> Vec<&'static str> {
        self.hit_test
            .iter()
            .map(|_| HIT_TEST_FEATURE_NAME)
            .collect()
    }

    /// Attach every enabled feature the runtime can serve.
    pub(crate) fn attach_all(&mut self, hit_test_available: bool) -> Result<(), XrError> {
        if let Some(feature) = self.hit_test.as_mut() {
            if hit_test_available {
                feature.attach();
            } else if feature.is_required() {
                return Err(XrError::RequiredFeatureUnavailable(HIT_TEST_FEATURE_NAME));
            } else {
                warn!(feature = HIT_TEST_FEATURE_NAME, "runtime cannot serve feature; left detached");
            }
        }
        Ok(())
    }

    pub(crate) fn detach_all(&mut self) {
        if let Some(feature) = self.hit_test.as_mut() {
            feature.detach();
        }
    }
}
