//! Traffic command implementation.

use anyhow::{Context, Result};
use faultbox_traffic::{TokenSource, TrafficConfig};
use std::time::Duration;
use tracing::info;

/// Runs the traffic command.
pub async fn run(
    url: &str,
    duration_mins: u64,
    workers: usize,
    token: Option<String>,
    token_command: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let token_source = match (token, token_command) {
        (Some(token), _) => TokenSource::Static(token),
        (None, Some(command)) => TokenSource::from_command_line(&command),
        (None, None) => TokenSource::None,
    };

    let mut config = TrafficConfig::new(url)
        .with_duration(Duration::from_secs(duration_mins * 60))
        .with_workers(workers)
        .with_token(token_source);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let summary = faultbox_traffic::run(config)
        .await
        .context("traffic run failed")?;

    info!(
        "generated {} requests with {} errors",
        summary.total_requests, summary.error_count
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
