//! Error types for outcome set construction.

use thiserror::Error;

/// Errors that can occur while building an outcome set.
///
/// These are configuration errors: they surface once at process
/// startup, never per-request.
#[derive(Debug, Error)]
pub enum Error {
    /// The set contains no outcomes.
    #[error("outcome set '{set}' is empty")]
    EmptySet {
        /// Name of the offending set.
        set: String,
    },

    /// An outcome carries a weight that is zero, negative, or not finite.
    #[error("outcome set '{set}': outcome #{index} has invalid weight {weight}")]
    InvalidWeight {
        /// Name of the offending set.
        set: String,
        /// Position of the outcome within the set.
        index: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// An outcome carries a status code outside the HTTP range.
    #[error("outcome set '{set}': outcome #{index} has invalid status code {status}")]
    InvalidStatus {
        /// Name of the offending set.
        set: String,
        /// Position of the outcome within the set.
        index: usize,
        /// The rejected status code.
        status: u16,
    },
}

/// Result type alias for outcome operations.
pub type Result<T> = std::result::Result<T, Error>;
