//! arplace - tap-to-place augmented reality on detected planes
//!
//! Headless driver: replays a session script against the placement app.

mod config;
mod event_log;
mod headless;
mod scripted_session;

use anyhow::Result;
use arplace_xr::SessionMode;
use config::AppConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting arplace v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut app_config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };
    if let Some(mode) = cli.session_mode {
        app_config.scene.session_mode = mode;
    }

    let Some(session_script) = cli.session_script else {
        anyhow::bail!("--session-script <path> is required");
    };
    if cli.max_frames == Some(0) {
        tracing::warn!("--max-frames 0 renders nothing");
    }

    let summary = headless::run(headless::HeadlessConfig {
        app: app_config,
        session_script,
        event_log: cli.event_log,
        max_frames: cli.max_frames,
    })?;

    info!(
        supported = summary.supported,
        frames = summary.frames,
        placements = summary.placements,
        ignored_taps = summary.ignored_taps,
        "Session finished"
    );
    match summary.object_position {
        Some([x, y, z]) => println!("object placed at ({x:.3}, {y:.3}, {z:.3})"),
        None if summary.supported => println!("no object placed"),
        None => {}
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    session_script: Option<PathBuf>,
    event_log: Option<PathBuf>,
    max_frames: Option<u64>,
    session_mode: Option<SessionMode>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config = args.next().map(PathBuf::from),
                "--session-script" => opts.session_script = args.next().map(PathBuf::from),
                "--event-log" => opts.event_log = args.next().map(PathBuf::from),
                "--max-frames" => {
                    if let Some(value) = args.next() {
                        match value.parse() {
                            Ok(frames) => opts.max_frames = Some(frames),
                            Err(_) => tracing::warn!(%value, "Ignoring invalid --max-frames"),
                        }
                    }
                }
                "--session-mode" => {
                    if let Some(value) = args.next() {
                        opts.session_mode = Some(value.parse()?);
                    }
                }
                other => tracing::warn!(arg = other, "Ignoring unknown argument"),
            }
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_all_flags() {
        let opts = parse(&[
            "--config",
            "cfg.toml",
            "--session-script",
            "script.json",
            "--event-log",
            "out/events.jsonl",
            "--max-frames",
            "120",
            "--session-mode",
            "immersive-ar",
        ])
        .unwrap();
        assert_eq!(
            opts,
            CliOptions {
                config: Some(PathBuf::from("cfg.toml")),
                session_script: Some(PathBuf::from("script.json")),
                event_log: Some(PathBuf::from("out/events.jsonl")),
                max_frames: Some(120),
                session_mode: Some(SessionMode::ImmersiveAr),
            }
        );
    }

    #[test]
    fn invalid_frame_count_is_ignored() {
        let opts = parse(&["--max-frames", "lots"]).unwrap();
        assert_eq!(opts.max_frames, None);
    }

    #[test]
    fn unknown_session_mode_is_an_error() {
        assert!(parse(&["--session-mode", "immersive-xr"]).is_err());
    }
}
