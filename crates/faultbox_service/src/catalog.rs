//! The endpoint outcome catalog.
//!
//! A static mapping from endpoint to its weighted outcome set, built
//! and validated once at startup. Weights are relative; the process
//! set approximates the deployed demo's 70/30 success/failure split
//! with the 30% spread uniformly over four failure modes.

use crate::error::Result;
use faultbox_outcome::{Outcome, OutcomeSet, Severity};
use serde_json::json;

/// Outcome tables for the randomized and fixed-error endpoints.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Weighted mix for `/api/process`.
    pub process: OutcomeSet,
    /// Coin flip for `/api/database`.
    pub database: OutcomeSet,
    /// Fixed denial for `/api/permission`.
    pub permission: OutcomeSet,
    /// Fixed timeout for `/api/network`.
    pub network: OutcomeSet,
}

impl Catalog {
    /// Builds and validates every outcome table.
    ///
    /// # Errors
    ///
    /// Returns an error if any table fails validation. This is a
    /// programming error surfaced at startup, never per-request.
    pub fn build() -> Result<Self> {
        Ok(Self {
            process: process_outcomes()?,
            database: database_outcomes()?,
            permission: permission_outcome()?,
            network: network_outcome()?,
        })
    }
}

fn process_outcomes() -> Result<OutcomeSet> {
    let set = OutcomeSet::new(
        "process",
        vec![
            Outcome::new(70.0, 200, json!({"status": "success"}))
                .with_log(Severity::Info, "request completed successfully"),
            Outcome::new(7.5, 400, json!({"error": "Invalid data"}))
                .with_log(Severity::Error, "invalid input data received"),
            Outcome::new(7.5, 403, json!({"error": "Permission denied"}))
                .with_log(Severity::Error, "access denied to resource"),
            Outcome::new(7.5, 503, json!({"error": "Database unavailable"}))
                .with_log(Severity::Error, "database connection refused"),
            Outcome::new(7.5, 504, json!({"error": "Request timeout"}))
                .with_log(Severity::Error, "request timed out after 30s"),
        ],
    )?;
    Ok(set)
}

fn database_outcomes() -> Result<OutcomeSet> {
    let set = OutcomeSet::new(
        "database",
        vec![
            Outcome::new(1.0, 200, json!({"status": "ok", "data": []}))
                .with_log(Severity::Info, "database query successful"),
            Outcome::new(1.0, 503, json!({"error": "Database unavailable"})).with_log(
                Severity::Error,
                "database connection failed: connection refused on port 5432",
            ),
        ],
    )?;
    Ok(set)
}

fn permission_outcome() -> Result<OutcomeSet> {
    let set = OutcomeSet::single(
        "permission",
        Outcome::new(1.0, 403, json!({"error": "Permission denied"})).with_log(
            Severity::Warning,
            "Permission denied: insufficient privileges to access resource",
        ),
    )?;
    Ok(set)
}

fn network_outcome() -> Result<OutcomeSet> {
    let set = OutcomeSet::single(
        "network",
        Outcome::new(1.0, 503, json!({"error": "Network unreachable"})).with_log(
            Severity::Error,
            "network error: connection to external service timed out",
        ),
    )?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds() {
        assert!(Catalog::build().is_ok());
    }

    #[test]
    fn process_set_approximates_seventy_thirty() {
        let catalog = Catalog::build().unwrap();
        let set = &catalog.process;

        assert_eq!(set.len(), 5);

        let statuses: Vec<u16> = set.outcomes().iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![200, 400, 403, 503, 504]);

        let success_weight: f64 = set
            .outcomes()
            .iter()
            .filter(|o| !o.is_failure())
            .map(|o| o.weight)
            .sum();
        let fraction = success_weight / set.total_weight();
        assert!((fraction - 0.70).abs() < f64::EPSILON);
    }

    #[test]
    fn database_set_is_a_fair_coin() {
        let catalog = Catalog::build().unwrap();
        let set = &catalog.database;

        assert_eq!(set.len(), 2);
        let weights: Vec<f64> = set.outcomes().iter().map(|o| o.weight).collect();
        assert!((weights[0] - weights[1]).abs() < f64::EPSILON);
        assert_eq!(set.outcomes()[1].status, 503);
    }

    #[test]
    fn fixed_endpoints_have_single_outcomes() {
        let catalog = Catalog::build().unwrap();

        assert_eq!(catalog.permission.len(), 1);
        assert_eq!(catalog.permission.first().status, 403);
        assert_eq!(catalog.permission.first().severity, Severity::Warning);
        assert!(catalog
            .permission
            .first()
            .log_message
            .contains("Permission denied"));

        assert_eq!(catalog.network.len(), 1);
        assert_eq!(catalog.network.first().status, 503);
        assert_eq!(catalog.network.first().severity, Severity::Error);
    }
}
