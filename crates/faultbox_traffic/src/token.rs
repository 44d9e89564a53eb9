//! Bearer token sources.
//!
//! The demo service sits behind an authenticating ingress, so the
//! generator can attach an identity token to every request. Minting
//! the token is the cloud CLI's job; this module only runs the
//! configured command (e.g. `gcloud auth print-identity-token`) once
//! at startup and captures its stdout.

use crate::error::{Error, Result};
use tracing::info;

/// Where the bearer token comes from, if anywhere.
#[derive(Debug, Clone, Default)]
pub enum TokenSource {
    /// Send unauthenticated requests.
    #[default]
    None,
    /// Use a token supplied directly.
    Static(String),
    /// Run a command and use its trimmed stdout as the token.
    Command(Vec<String>),
}

impl TokenSource {
    /// Parses a command line into a command token source.
    #[must_use]
    pub fn from_command_line(line: &str) -> Self {
        Self::Command(line.split_whitespace().map(str::to_string).collect())
    }

    /// Resolves the source into an optional token.
    ///
    /// Resolution happens once, before any traffic is sent; a failing
    /// token command aborts the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, exits
    /// non-zero, or prints nothing.
    pub async fn resolve(&self) -> Result<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Static(token) => Ok(Some(token.clone())),
            Self::Command(argv) => {
                let command_line = argv.join(" ");
                let (program, args) = argv.split_first().ok_or_else(|| Error::TokenCommand {
                    command: command_line.clone(),
                    message: "command is empty".to_string(),
                })?;

                info!("minting bearer token via '{command_line}'");
                let output = tokio::process::Command::new(program)
                    .args(args)
                    .output()
                    .await
                    .map_err(|e| Error::TokenCommand {
                        command: command_line.clone(),
                        message: e.to_string(),
                    })?;

                if !output.status.success() {
                    return Err(Error::TokenCommand {
                        command: command_line,
                        message: format!(
                            "exited with {}: {}",
                            output.status,
                            String::from_utf8_lossy(&output.stderr).trim()
                        ),
                    });
                }

                let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if token.is_empty() {
                    return Err(Error::TokenCommand {
                        command: command_line,
                        message: "produced no output".to_string(),
                    });
                }
                Ok(Some(token))
            }
        }
    }
}
