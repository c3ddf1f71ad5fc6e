//! User-visible failure surface.

use tracing::error;

/// Shows blocking messages to the user.
pub trait Notifier {
    /// Display `message` to the user.
    fn alert(&mut self, message: &str);
}

/// Writes alerts to the log and to stderr.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&mut self, message: &str) {
        error!(message, "alert");
        eprintln!("{message}");
    }
}

/// Keeps alerts in memory instead of showing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    /// Messages in the order they were raised.
    pub alerts: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
