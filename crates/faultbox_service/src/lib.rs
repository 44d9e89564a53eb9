//! Faultbox demo HTTP service.
//!
//! A deliberately misbehaving service: every route produces canned
//! success or failure responses with matching log lines so that an
//! AIOps diagnostic agent has realistic-looking patterns to chew on.
//!
//! This crate provides:
//! - [`ServiceConfig`] with fail-fast validation
//! - [`AppState`], the process-wide service context (request counter,
//!   leak buffer, seeded RNG, outcome catalog)
//! - The axum router and one handler per route
//!
//! # Example
//!
//! ```rust,ignore
//! use faultbox_service::{app, AppState, ServiceConfig};
//!
//! let state = AppState::new(ServiceConfig::default())?;
//! let router = app(std::sync::Arc::new(state));
//! axum::serve(listener, router).await?;
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use app::app;
pub use catalog::Catalog;
pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use state::AppState;
