use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arplace_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_arplace(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_arplace"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn arplace")
}

fn read_events(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .expect("read event log")
        .lines()
        .map(|line| serde_json::from_str(line).expect("parse event line"))
        .collect()
}

fn manifest_path(relative: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(relative)
        .display()
        .to_string()
}

#[test]
fn demo_session_places_box_and_logs_events() {
    let dir = temp_dir("demo");
    let log = dir.join("events.jsonl");
    let output = run_arplace(&[
        "--config",
        &manifest_path("config/arplace.toml"),
        "--session-script",
        &manifest_path("scripts/demo_session.json"),
        "--event-log",
        log.to_str().expect("utf-8 path"),
    ]);
    assert!(
        output.status.success(),
        "arplace failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("object placed at"));

    let events = read_events(&log);
    let kinds: Vec<&str> = events
        .iter()
        .map(|event| event["kind"].as_str().expect("kind"))
        .collect();
    assert_eq!(kinds.first(), Some(&"session_started"));
    assert_eq!(kinds.last(), Some(&"session_ended"));
    assert_eq!(kinds.iter().filter(|k| **k == "object_placed").count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == "tap_ignored").count(), 1);

    let first_placement = events
        .iter()
        .find(|event| event["kind"] == "object_placed")
        .expect("placement logged");
    assert_eq!(first_placement["frame"], 4);
    let y = first_placement["position"][1].as_f64().expect("y");
    assert!((y - -1.15).abs() < 1e-5);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unsupported_session_exits_cleanly() {
    let dir = temp_dir("unsupported");
    let script = dir.join("vr_only.json");
    std::fs::write(
        &script,
        r#"{ "supported_modes": ["immersive-vr"], "frames": [ { "tap": true } ] }"#,
    )
    .expect("write script");
    let log = dir.join("events.jsonl");

    let output = run_arplace(&[
        "--config",
        &manifest_path("config/arplace.toml"),
        "--session-script",
        script.to_str().expect("utf-8 path"),
        "--event-log",
        log.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("WebXR is not supported"));

    let events = read_events(&log);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["kind"], "session_unsupported");
    assert_eq!(events[0]["mode"], "immersive-ar");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_session_script_is_an_error() {
    let output = run_arplace(&["--config", &manifest_path("config/arplace.toml")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--session-script"));
}
