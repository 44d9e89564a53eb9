//! The outcome data model.
//!
//! An outcome bundles everything one synthetic response needs: an
//! HTTP status code, a canned JSON body, a log line, and the severity
//! that line is emitted at. Outcomes are built once at process start
//! and never mutated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Log severity attached to an outcome.
///
/// Mirrors the classic syslog-style levels a cloud logging backend
/// groups by. `tracing` has no CRITICAL level, so emitters map
/// [`Severity::Critical`] onto an ERROR event carrying an explicit
/// `severity = "CRITICAL"` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Routine operation.
    Info,
    /// Degraded but successful operation.
    Warning,
    /// A failed request.
    Error,
    /// A simulated crash or unrecoverable condition.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// One possible (status, body, log) result an endpoint may produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// Relative selection weight. Weights within a set need not sum
    /// to 1; they are normalized at selection time.
    pub weight: f64,
    /// HTTP status code returned to the client.
    pub status: u16,
    /// Canned JSON response body.
    pub body: Value,
    /// Log line emitted alongside the response.
    pub log_message: String,
    /// Severity of the emitted log line.
    pub severity: Severity,
}

impl Outcome {
    /// Creates an outcome with an INFO log line.
    #[must_use]
    pub fn new(weight: f64, status: u16, body: Value) -> Self {
        Self {
            weight,
            status,
            body,
            log_message: String::new(),
            severity: Severity::Info,
        }
    }

    /// Sets the log line and its severity.
    #[must_use]
    pub fn with_log(mut self, severity: Severity, message: impl Into<String>) -> Self {
        self.severity = severity;
        self.log_message = message.into();
        self
    }

    /// Returns true if this outcome represents a failed request.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_display_matches_log_levels() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Error.to_string(), "ERROR");
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn outcome_builder_sets_log_fields() {
        let outcome = Outcome::new(7.5, 403, json!({"error": "Permission denied"}))
            .with_log(Severity::Warning, "Permission denied: insufficient privileges");

        assert_eq!(outcome.status, 403);
        assert_eq!(outcome.severity, Severity::Warning);
        assert!(outcome.log_message.contains("Permission denied"));
        assert!(outcome.is_failure());
    }

    #[test]
    fn success_outcome_is_not_failure() {
        let outcome = Outcome::new(70.0, 200, json!({"status": "success"}));
        assert!(!outcome.is_failure());
        assert_eq!(outcome.severity, Severity::Info);
    }

    #[test]
    fn severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
