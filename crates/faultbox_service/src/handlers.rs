//! One handler per route.
//!
//! Every handler draws or fixes an outcome, emits the matching log
//! event, and serializes a canned JSON body. Side effects are
//! observable only through the log line and the response.

// axum handlers are async by contract, awaited or not.
#![allow(clippy::unused_async)]

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use faultbox_outcome::{Outcome, Severity};
use rand::Rng;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Emits one log event at the outcome's severity.
///
/// `tracing` has no CRITICAL level; CRITICAL events are ERROR events
/// carrying an explicit `severity` field for the log pipeline.
fn emit(severity: Severity, message: &str) {
    match severity {
        Severity::Info => info!("{message}"),
        Severity::Warning => warn!("{message}"),
        Severity::Error => error!("{message}"),
        Severity::Critical => error!(severity = "CRITICAL", "{message}"),
    }
}

fn status_code(status: u16) -> StatusCode {
    // Outcome statuses are validated into the HTTP range at startup.
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn respond(outcome: &Outcome) -> (StatusCode, Json<Value>) {
    emit(outcome.severity, &outcome.log_message);
    (status_code(outcome.status), Json(outcome.body.clone()))
}

/// GET / - healthy root with a timestamp.
pub async fn home(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config().service_name,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /health - fixed health-check body.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config().service_name,
    }))
}

/// GET /api/process - weighted random success/failure mix.
pub async fn process(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let request_id = state.next_request_id();
    info!(request_id, "processing request");

    let outcome = state.draw(|rng| state.catalog().process.select(rng).clone());

    if outcome.is_failure() {
        emit(outcome.severity, &outcome.log_message);
        return (status_code(outcome.status), Json(outcome.body));
    }

    info!(request_id, "{}", outcome.log_message);
    let body = json!({
        "status": "success",
        "request_id": request_id,
        "timestamp": Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body))
}

/// GET /api/slow - delayed success.
#[allow(clippy::cast_precision_loss)]
pub async fn slow(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = state.config();
    let delay_ms = state.draw(|rng| rng.gen_range(config.slow_min_ms..=config.slow_max_ms));
    let delay_secs = delay_ms as f64 / 1000.0;

    warn!("slow endpoint called, sleeping for {delay_secs:.2}s");
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    info!("slow endpoint completed");

    Json(json!({
        "status": "completed",
        "delay": delay_secs,
        "message": "This endpoint is intentionally slow",
    }))
}

/// GET /api/database - 50/50 success or connection failure.
pub async fn database(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let outcome = state.draw(|rng| state.catalog().database.select(rng).clone());

    if outcome.is_failure() {
        error!("connection pool exhausted");
    }
    respond(&outcome)
}

/// GET /api/permission - fixed denial.
pub async fn permission(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let outcome = state.catalog().permission.first();
    warn!("IAM check failed for service account");
    respond(outcome)
}

/// GET /api/network - fixed upstream timeout.
pub async fn network(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let outcome = state.catalog().network.first();
    error!("DNS resolution failed for api.external-service.com");
    respond(outcome)
}

/// GET /api/memory-leak - grows the process-wide leak buffer.
pub async fn memory_leak(State(state): State<Arc<AppState>>) -> Json<Value> {
    let report = state.grow_leak();
    let leaked_mb = report.leaked_mb();

    warn!("memory leak: {leaked_mb} MB allocated");
    if report.chunks > state.config().leak_warn_chunks {
        error!("memory leak critical: over {leaked_mb} MB leaked");
    }

    Json(json!({
        "status": "ok",
        "leaked_mb": leaked_mb,
    }))
}

/// GET /api/crash - logs a CRITICAL event and fails the request.
///
/// By default the process survives and the client sees a 500;
/// `crash_aborts_process` opts into an actual abort.
pub async fn crash(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    emit(Severity::Critical, "application crash triggered");
    error!("unrecoverable error: attempted to access uninitialized resource");

    if state.config().crash_aborts_process {
        std::process::abort();
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error"})),
    )
}

/// GET /api/cpu-spike - bounded busy loop on a blocking thread.
pub async fn cpu_spike(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    warn!("cpu spike endpoint called");

    let duration = Duration::from_millis(state.config().cpu_spike_ms);
    let batch = state.config().cpu_spike_batch;

    let spin = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let mut acc: u64 = 0;
        while start.elapsed() < duration {
            acc = acc.wrapping_add((0..batch).sum::<u64>());
        }
        acc
    })
    .await;

    match spin {
        Ok(result) => {
            info!("cpu spike completed");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "completed",
                    "computation_result": result,
                })),
            )
        }
        Err(join_error) => {
            error!("cpu spike worker failed: {join_error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
        }
    }
}

/// GET /api/stress - emits a burst of mixed-severity log lines.
pub async fn stress(State(state): State<Arc<AppState>>) -> Json<Value> {
    const LINES: usize = 10;

    info!("stress test started");
    let rolls: Vec<bool> = state.draw(|rng| (0..LINES).map(|_| rng.gen_bool(0.3)).collect());
    for (i, failed) in rolls.iter().enumerate() {
        if *failed {
            error!("stress test error #{i}: random failure");
        } else {
            info!("stress test log #{i}");
        }
    }

    Json(json!({
        "status": "completed",
        "logs_generated": LINES,
    }))
}
