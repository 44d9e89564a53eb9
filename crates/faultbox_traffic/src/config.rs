//! Traffic run configuration.

use crate::error::{Error, Result};
use crate::mix::TargetMix;
use crate::token::TokenSource;
use std::time::Duration;

/// Configuration for one traffic run.
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    /// Base URL of the target service, without a trailing slash.
    pub base_url: String,
    /// How long to keep dispatching requests.
    pub duration: Duration,
    /// Maximum number of requests in flight at once.
    pub workers: usize,
    /// Lower bound of the pause between dispatches, in milliseconds.
    pub delay_min_ms: u64,
    /// Upper bound of the pause between dispatches, in milliseconds.
    pub delay_max_ms: u64,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Bearer token source.
    pub token: TokenSource,
    /// Weighted endpoint mix.
    pub mix: TargetMix,
    /// Random seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl TrafficConfig {
    /// Creates a config targeting the given base URL, with the
    /// deployed demo's defaults: five minutes of traffic, three
    /// workers, 0.5–2 s pacing, 10 s request timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            duration: Duration::from_secs(5 * 60),
            workers: 3,
            delay_min_ms: 500,
            delay_max_ms: 2000,
            request_timeout: Duration::from_secs(10),
            token: TokenSource::None,
            mix: TargetMix::default(),
            seed: None,
        }
    }

    /// Sets the run duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the in-flight request cap.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the pause range between dispatches, in milliseconds.
    #[must_use]
    pub const fn with_delay_range_ms(mut self, min: u64, max: u64) -> Self {
        self.delay_min_ms = min;
        self.delay_max_ms = max;
        self
    }

    /// Sets the bearer token source.
    #[must_use]
    pub fn with_token(mut self, token: TokenSource) -> Self {
        self.token = token;
        self
    }

    /// Sets the endpoint mix.
    #[must_use]
    pub fn with_mix(mut self, mix: TargetMix) -> Self {
        self.mix = mix;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty, the run duration is
    /// zero, there are no workers, or the delay range is inverted.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::InvalidConfig("base URL is empty".to_string()));
        }
        if self.duration.is_zero() {
            return Err(Error::InvalidConfig("run duration is zero".to_string()));
        }
        if self.workers == 0 {
            return Err(Error::InvalidConfig("worker count is zero".to_string()));
        }
        if self.delay_min_ms > self.delay_max_ms {
            return Err(Error::InvalidConfig(format!(
                "dispatch delay range is inverted: {}..{} ms",
                self.delay_min_ms, self.delay_max_ms
            )));
        }
        Ok(())
    }
}
