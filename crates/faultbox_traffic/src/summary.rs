//! End-of-run summary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What one traffic run observed.
///
/// Transport failures (timeouts, refused connections) count toward
/// `total_requests` and `error_count` but have no status entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficSummary {
    /// Requests dispatched and completed (successfully or not).
    pub total_requests: u64,
    /// Responses with status >= 400, plus transport failures.
    pub error_count: u64,
    /// Completed responses grouped by status code.
    pub status_counts: BTreeMap<u16, u64>,
    /// Wall-clock duration of the run, in seconds.
    pub elapsed_seconds: f64,
}

impl TrafficSummary {
    /// Fraction of requests that failed, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn error_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.total_requests as f64
    }
}
