//! Structured logger with step recording and summary output.
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{StepEntry, StepStatus};

/// Structured logger that forwards to [`tracing`] and remembers the outcome
/// of each provisioning step for the closing summary.
#[derive(Debug, Default)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
}

impl Logger {
    /// Create a new logger with no recorded steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a clone of all recorded steps.
    #[must_use]
    pub fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Count recorded steps with `status`.
    #[must_use]
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps
            .lock()
            .map_or(0, |guard| guard.iter().filter(|s| s.status == status).count())
    }

    /// Log a summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = self.step_entries();
        if steps.is_empty() {
            return;
        }

        self.stage("Summary");
        for step in &steps {
            let (icon, color) = match step.status {
                StepStatus::Created => ("+", "\x1b[32m"),
                StepStatus::Unchanged => ("✓", "\x1b[2m"),
                StepStatus::Failed => ("✗", "\x1b[31m"),
            };
            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", step.name));
        }

        self.info(&format!(
            "{} steps: \x1b[32m{} created\x1b[0m, \x1b[2m{} unchanged\x1b[0m, \x1b[31m{} failed\x1b[0m",
            steps.len(),
            self.count(StepStatus::Created),
            self.count(StepStatus::Unchanged),
            self.count(StepStatus::Failed),
        ));
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn logger_new_has_no_steps() {
        assert!(Logger::new().step_entries().is_empty());
    }

    #[test]
    fn record_step_keeps_order_and_message() {
        let log = Logger::new();
        log.record_step("Create private directory", StepStatus::Created, None);
        log.record_step("Link private files", StepStatus::Failed, Some("conflict"));

        let steps = log.step_entries();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, "Create private directory");
        assert_eq!(steps[0].status, StepStatus::Created);
        assert_eq!(steps[1].message, Some("conflict".to_string()));
    }

    #[test]
    fn count_filters_by_status() {
        let log = Logger::new();
        log.record_step("a", StepStatus::Unchanged, None);
        log.record_step("b", StepStatus::Unchanged, None);
        log.record_step("c", StepStatus::Created, None);

        assert_eq!(log.count(StepStatus::Unchanged), 2);
        assert_eq!(log.count(StepStatus::Created), 1);
        assert_eq!(log.count(StepStatus::Failed), 0);
    }

    #[test]
    fn print_summary_without_subscriber_is_harmless() {
        let log = Logger::new();
        log.print_summary();
        log.record_step("a", StepStatus::Created, Some("detail"));
        log.print_summary();
    }
}
