//! Error types for service startup.
//!
//! The service emits synthetic failures by design; these errors cover
//! the only genuine failure mode, invalid configuration, which is
//! caught once at startup.

use thiserror::Error;

/// Errors that can occur while building the service.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration field failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An outcome table failed validation.
    #[error(transparent)]
    Outcome(#[from] faultbox_outcome::Error),
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, Error>;
