//! Structured error telemetry.
//!
//! Services record failures through an [`ErrorReporter`] before handing the
//! error back to their caller. A report is a severity, a free-text message,
//! and a string metadata map. [`TracingReporter`] forwards reports to
//! `tracing`; [`MemoryReporter`] keeps them for inspection.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::enums::ErrorSeverity;

/// A captured error with its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub severity: ErrorSeverity,
    pub message: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ErrorReport {
    #[must_use]
    pub fn new(severity: ErrorSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Sink for captured errors.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, report: ErrorReport);
}

/// Emits each report as a `tracing` event at a level derived from its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, report: ErrorReport) {
        let severity = report.severity.as_str();
        let metadata = format!("{:?}", report.metadata);
        match report.severity {
            ErrorSeverity::Low => {
                tracing::info!(severity, %metadata, "{}", report.message);
            }
            ErrorSeverity::Medium => {
                tracing::warn!(severity, %metadata, "{}", report.message);
            }
            ErrorSeverity::High | ErrorSeverity::Critical => {
                tracing::error!(severity, %metadata, "{}", report.message);
            }
        }
    }
}

/// Collects reports in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<ErrorReport>>,
}

impl MemoryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every report received so far.
    #[must_use]
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, report: ErrorReport) {
        if let Ok(mut guard) = self.reports.lock() {
            guard.push(report);
        }
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for std::sync::Arc<R> {
    fn report(&self, report: ErrorReport) {
        (**self).report(report);
    }
}

/// Record `error` at `severity` with the given metadata.
pub fn capture_error(
    reporter: &dyn ErrorReporter,
    error: &dyn std::error::Error,
    severity: ErrorSeverity,
    metadata: &[(&str, &str)],
) {
    let report = metadata
        .iter()
        .fold(ErrorReport::new(severity, error.to_string()), |report, (k, v)| {
            report.with(*k, *v)
        });
    reporter.report(report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreError;

    #[test]
    fn capture_error_records_message_and_metadata() {
        let reporter = MemoryReporter::new();
        let error = CoreError::Validation("score out of range".into());

        capture_error(
            &reporter,
            &error,
            ErrorSeverity::High,
            &[("lead_id", "ld-1")],
        );

        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, ErrorSeverity::High);
        assert_eq!(reports[0].message, "Validation error: score out of range");
        assert_eq!(
            reports[0].metadata.get("lead_id").map(String::as_str),
            Some("ld-1")
        );
    }

    #[test]
    fn tracing_reporter_accepts_every_severity() {
        for severity in [
            ErrorSeverity::Low,
            ErrorSeverity::Medium,
            ErrorSeverity::High,
            ErrorSeverity::Critical,
        ] {
            TracingReporter.report(ErrorReport::new(severity, "smoke"));
        }
    }
}
