use crate::config::AppConfig;
use crate::event_log::{JsonlSink, SessionEvent};
use crate::scripted_session::SessionScript;
use anyhow::{Context, Result};
use arplace_placement::{ArApp, LogNotifier, Notifier, PlacementEvent, XrInit};
use arplace_scene::{Canvas, Document, Engine};
use std::path::PathBuf;
use tracing::{debug, info};

pub struct HeadlessConfig {
    pub app: AppConfig,
    pub session_script: PathBuf,
    pub event_log: Option<PathBuf>,
    pub max_frames: Option<u64>,
}

/// What happened during a headless run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub supported: bool,
    pub frames: u64,
    pub placements: u32,
    pub ignored_taps: u32,
    /// Final box position, if it was ever placed.
    pub object_position: Option<[f32; 3]>,
}

/// The page hosting the engine: a single canvas named `canvas`.
fn host_document(cfg: &AppConfig) -> Document {
    Document::new().with_canvas(Canvas::new("canvas", cfg.surface.width, cfg.surface.height))
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let script = SessionScript::from_path(&cfg.session_script).with_context(|| {
        format!(
            "failed to load session script {}",
            cfg.session_script.display()
        )
    })?;
    let mut sink = match cfg.event_log.as_ref() {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => None,
    };
    let summary = run_script(&cfg.app, script, cfg.max_frames, &mut LogNotifier, sink.as_mut())?;
    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }
    Ok(summary)
}

pub fn run_script(
    cfg: &AppConfig,
    script: SessionScript,
    max_frames: Option<u64>,
    notifier: &mut dyn Notifier,
    mut sink: Option<&mut JsonlSink>,
) -> Result<RunSummary> {
    let document = host_document(cfg);
    let engine = Engine::from_document(&document, &cfg.scene.canvas_id, cfg.surface.antialias)?;
    let mut app = ArApp::new(engine, cfg.scene.clone())?;
    let mode = cfg.scene.session_mode;
    let SessionScript {
        runtime,
        host_frames,
    } = script;

    let mut summary = RunSummary::default();
    let init = pollster::block_on(app.init_xr(Box::new(runtime), notifier))?;
    if init == XrInit::Unsupported {
        if let Some(sink) = sink.as_deref_mut() {
            sink.write(0, &SessionEvent::SessionUnsupported { mode })?;
        }
        return Ok(summary);
    }
    summary.supported = true;

    pollster::block_on(app.enter_xr()).context("failed to start XR session")?;
    if let Some(sink) = sink.as_deref_mut() {
        sink.write(0, &SessionEvent::SessionStarted { mode })?;
    }

    let limit = max_frames.map_or(host_frames.len(), |max| {
        host_frames.len().min(usize::try_from(max).unwrap_or(usize::MAX))
    });
    for host in host_frames.iter().take(limit) {
        if let Some((width, height)) = host.resize {
            app.resize(width, height);
        }
        if host.tap {
            let canvas = app.engine().canvas();
            let (x, y) = (canvas.width as f32 / 2.0, canvas.height as f32 / 2.0);
            app.queue_pointer_down(x, y);
        }
        let stats = app.frame();
        summary.frames = stats.frame;

        for event in app.drain_events() {
            match event {
                PlacementEvent::ObjectPlaced { position, .. } => {
                    summary.placements += 1;
                    summary.object_position = Some(position);
                    info!(frame = stats.frame, ?position, "object placed");
                }
                PlacementEvent::TapIgnored => {
                    summary.ignored_taps += 1;
                    debug!(frame = stats.frame, "tap ignored");
                }
                _ => debug!(frame = stats.frame, ?event, "placement event"),
            }
            if let Some(sink) = sink.as_deref_mut() {
                sink.write(stats.frame, &event)?;
            }
        }
    }

    app.teardown();
    if let Some(sink) = sink.as_deref_mut() {
        sink.write(summary.frames, &SessionEvent::SessionEnded)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_placement::{RecordingNotifier, UNSUPPORTED_MESSAGE};

    fn script(json: &str) -> SessionScript {
        SessionScript::from_json(json).expect("script parses")
    }

    #[test]
    fn tap_on_detected_plane_places_object() {
        let mut notifier = RecordingNotifier::default();
        let summary = run_script(
            &AppConfig::default(),
            script(
                r#"{ "frames": [
                    { "tap": true },
                    { "hits": [ { "position": [0.5, -1.0, -1.0] } ] },
                    { "hits": [ { "position": [0.5, -1.0, -1.0] } ], "tap": true },
                    { }
                ] }"#,
            ),
            None,
            &mut notifier,
            None,
        )
        .unwrap();

        assert!(summary.supported);
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.ignored_taps, 1);
        assert_eq!(summary.placements, 1);
        let [x, y, z] = summary.object_position.unwrap();
        assert!((x - 0.5).abs() < 1e-5 && (y + 0.95).abs() < 1e-5 && (z + 1.0).abs() < 1e-5);
        assert!(notifier.alerts.is_empty());
    }

    #[test]
    fn unsupported_runtime_alerts_and_renders_nothing() {
        let mut notifier = RecordingNotifier::default();
        let summary = run_script(
            &AppConfig::default(),
            script(r#"{ "supported_modes": ["immersive-vr"], "frames": [ { "tap": true } ] }"#),
            None,
            &mut notifier,
            None,
        )
        .unwrap();

        assert!(!summary.supported);
        assert_eq!(summary.frames, 0);
        assert_eq!(notifier.alerts, vec![UNSUPPORTED_MESSAGE.to_string()]);
    }

    #[test]
    fn max_frames_truncates_the_script() {
        let summary = run_script(
            &AppConfig::default(),
            script(r#"{ "frames": [ {}, {}, {}, {} ] }"#),
            Some(2),
            &mut RecordingNotifier::default(),
            None,
        )
        .unwrap();
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn missing_canvas_fails_startup() {
        let mut cfg = AppConfig::default();
        cfg.scene.canvas_id = "renderCanvas".into();
        let err = run_script(
            &cfg,
            script(r#"{ "frames": [ {} ] }"#),
            None,
            &mut RecordingNotifier::default(),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("renderCanvas"));
    }
}
