use arplace_scene::Pose;
use arplace_xr::{HitTestEntityType, HitTestOptions, HitTestResult, SessionMode, XrRuntime};
use async_trait::async_trait;
use glam::{Quat, Vec3};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct SessionScriptFile {
    #[serde(default = "default_supported_modes")]
    supported_modes: Vec<SessionMode>,
    #[serde(default = "default_true")]
    hit_test: bool,
    frames: Vec<ScriptedFrame>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedFrame {
    #[serde(default)]
    hits: Vec<ScriptedHit>,
    #[serde(default)]
    tap: bool,
    #[serde(default)]
    resize: Option<[u32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedHit {
    position: [f32; 3],
    /// Quaternion `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    rotation: [f32; 4],
    #[serde(default = "plane")]
    entity_type: HitTestEntityType,
}

fn default_supported_modes() -> Vec<SessionMode> {
    vec![SessionMode::ImmersiveAr]
}

fn default_true() -> bool {
    true
}

fn identity_rotation() -> [f32; 4] {
    Quat::IDENTITY.to_array()
}

fn plane() -> HitTestEntityType {
    HitTestEntityType::Plane
}

impl ScriptedHit {
    /// `None` when the position is not finite or the rotation cannot be normalized.
    fn to_result(&self) -> Option<HitTestResult> {
        let position = Vec3::from_array(self.position);
        let rotation = Quat::from_array(self.rotation);
        let length_squared = rotation.length_squared();
        if !position.is_finite() || !length_squared.is_finite() || length_squared < 1e-12 {
            return None;
        }
        Some(HitTestResult::from_pose(
            Pose::new(position, rotation.normalize()),
            self.entity_type,
        ))
    }
}

/// Host-side input for one scripted frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostFrame {
    pub tap: bool,
    pub resize: Option<(u32, u32)>,
}

/// Parsed session script: device answers plus per-frame host input.
pub struct SessionScript {
    pub runtime: ScriptedRuntime,
    pub host_frames: Vec<HostFrame>,
}

impl SessionScript {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: SessionScriptFile = serde_json::from_str(contents)?;
        if file.frames.is_empty() {
            anyhow::bail!("session script contains no frames");
        }
        let mut hit_frames = VecDeque::with_capacity(file.frames.len());
        let mut host_frames = Vec::with_capacity(file.frames.len());
        for (index, frame) in file.frames.iter().enumerate() {
            let mut hits = Vec::with_capacity(frame.hits.len());
            for hit in &frame.hits {
                let Some(result) = hit.to_result() else {
                    anyhow::bail!(
                        "frame {index}: hit at {:?} has an invalid pose (rotation {:?})",
                        hit.position,
                        hit.rotation
                    );
                };
                hits.push(result);
            }
            hit_frames.push_back(hits);
            host_frames.push(HostFrame {
                tap: frame.tap,
                resize: frame.resize.map(|[w, h]| (w, h)),
            });
        }
        Ok(Self {
            runtime: ScriptedRuntime {
                supported_modes: file.supported_modes,
                hit_test: file.hit_test,
                frames: hit_frames,
            },
            host_frames,
        })
    }
}

/// [`XrRuntime`] replaying hit candidates from a session script, one frame per poll.
pub struct ScriptedRuntime {
    supported_modes: Vec<SessionMode>,
    hit_test: bool,
    frames: VecDeque<Vec<HitTestResult>>,
}

#[async_trait(?Send)]
impl XrRuntime for ScriptedRuntime {
    async fn is_session_supported(&self, mode: SessionMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    fn supports_hit_test(&self) -> bool {
        self.hit_test
    }

    fn hit_test(&mut self, _options: &HitTestOptions) -> Vec<HitTestResult> {
        self.frames.pop_front().unwrap_or_default()
    }
}
