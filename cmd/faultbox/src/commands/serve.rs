//! Serve command implementation.

use anyhow::{Context, Result};
use faultbox_service::{app, AppState, ServiceConfig};
use std::sync::Arc;
use tracing::info;

/// Runs the serve command.
pub async fn run(
    host: &str,
    port: u16,
    service_name: &str,
    seed: Option<u64>,
    slow_min_ms: u64,
    slow_max_ms: u64,
    crash_abort: bool,
) -> Result<()> {
    let mut config = ServiceConfig::default()
        .with_service_name(service_name)
        .with_slow_range_ms(slow_min_ms, slow_max_ms)
        .with_crash_aborts_process(crash_abort);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    // Fail fast: configuration and outcome tables are validated here,
    // before the listener ever opens.
    let state = AppState::new(config).context("invalid service configuration")?;
    let router = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    info!("serving {service_name} on {host}:{port}");

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}
