// User-facing outcome reporting for persistence operations.
//
// Two channels, matching the failure taxonomy: short-lived transient
// notices (toasts) for one-off successes and failures, and blocking
// alerts for permanent host limitations.

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Sink for transient notices and blocking alerts; the front end decides
/// how to render them.
pub trait Notifier {
    /// Short-lived, auto-dismissing notice.
    fn notify(&self, severity: Severity, message: &str);

    /// Blocking alert for a permanent environment limitation, distinct
    /// from transient failures.
    fn alert(&self, message: &str);
}

/// Notifier that reports through the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => info!(message = %message, "notice"),
            Severity::Error => warn!(message = %message, "notice"),
        }
    }

    fn alert(&self, message: &str) {
        error!(message = %message, "blocking alert");
    }
}

/// Test notifier capturing everything it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inner: std::sync::Arc<std::sync::Mutex<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    notices: Vec<(Severity, String)>,
    alerts: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.inner.lock().expect("notifier lock").notices.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.lock().expect("notifier lock").alerts.clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.inner.lock().expect("notifier lock").notices.push((severity, message.to_string()));
    }

    fn alert(&self, message: &str) {
        self.inner.lock().expect("notifier lock").alerts.push(message.to_string());
    }
}
