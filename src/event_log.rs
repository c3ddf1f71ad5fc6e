use anyhow::Result;
use arplace_xr::SessionMode;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Session lifecycle entries written next to placement events.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionUnsupported { mode: SessionMode },
    SessionStarted { mode: SessionMode },
    SessionEnded,
}

/// One line of the event log: the frame number plus the flattened event.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, T: Serialize> {
    pub frame: u64,
    #[serde(flatten)]
    pub event: &'a T,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    /// Append an event to the log.
    pub fn write<T: Serialize>(&mut self, frame: u64, event: &T) -> Result<()> {
        let line = serde_json::to_string(&EventRecord { frame, event })?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_placement::PlacementEvent;

    #[test]
    fn records_are_flat_json_lines() {
        let path = std::env::temp_dir().join(format!("arplace_events_{}.jsonl", std::process::id()));
        let mut sink = JsonlSink::create(&path).expect("can create temp log");
        sink.write(
            0,
            &SessionEvent::SessionStarted {
                mode: SessionMode::ImmersiveAr,
            },
        )
        .unwrap();
        sink.write(3, &PlacementEvent::TapIgnored).unwrap();
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            lines[0],
            serde_json::json!({"frame": 0, "kind": "session_started", "mode": "immersive-ar"})
        );
        assert_eq!(lines[1], serde_json::json!({"frame": 3, "kind": "tap_ignored"}));

        let _ = fs::remove_file(&path);
    }
}
