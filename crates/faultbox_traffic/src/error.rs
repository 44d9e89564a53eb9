//! Error types for traffic generation.

use thiserror::Error;

/// Errors that can occur while generating traffic.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration field failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The endpoint mix failed validation.
    #[error("invalid endpoint mix: {0}")]
    InvalidMix(String),

    /// The token command could not produce a usable token.
    #[error("token command '{command}' failed: {message}")]
    TokenCommand {
        /// The configured command line.
        command: String,
        /// What went wrong.
        message: String,
    },

    /// Network error.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// I/O error while spawning the token command.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for traffic operations.
pub type Result<T> = std::result::Result<T, Error>;
