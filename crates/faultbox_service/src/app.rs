//! Router assembly.

use crate::handlers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the service router with every demo route mounted.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api/process", get(handlers::process))
        .route("/api/slow", get(handlers::slow))
        .route("/api/database", get(handlers::database))
        .route("/api/permission", get(handlers::permission))
        .route("/api/network", get(handlers::network))
        .route("/api/memory-leak", get(handlers::memory_leak))
        .route("/api/crash", get(handlers::crash))
        .route("/api/cpu-spike", get(handlers::cpu_spike))
        .route("/api/stress", get(handlers::stress))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
