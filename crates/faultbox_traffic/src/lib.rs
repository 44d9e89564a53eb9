//! Traffic generator for the Faultbox demo service.
//!
//! Issues repeated GET requests against a running service instance,
//! optionally attaching a bearer token minted by an external command,
//! for a configured duration. The endpoint mix and request pacing are
//! weighted random draws from a seedable generator, so runs are
//! reproducible.
//!
//! # Example
//!
//! ```rust,ignore
//! use faultbox_traffic::{run, TrafficConfig};
//!
//! let config = TrafficConfig::new("https://demo.example.run.app")
//!     .with_duration(std::time::Duration::from_secs(300));
//! let summary = run(config).await?;
//! println!("{}", summary.error_count);
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod generator;
pub mod mix;
pub mod summary;
pub mod token;

pub use config::TrafficConfig;
pub use error::{Error, Result};
pub use generator::run;
pub use mix::{MixEntry, TargetMix};
pub use summary::TrafficSummary;
pub use token::TokenSource;
