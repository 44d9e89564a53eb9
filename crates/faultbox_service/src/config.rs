//! Service configuration.

use crate::error::{Error, Result};

/// Default chunk appended to the leak buffer per call (1 MiB).
pub const DEFAULT_LEAK_CHUNK_BYTES: usize = 1024 * 1024;

/// Configuration for the demo service.
///
/// All knobs have defaults matching the deployed demo; `validate` is
/// run once at startup so per-request code never sees a malformed
/// configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service name reported by the health endpoints.
    pub service_name: String,
    /// Lower bound of the slow endpoint's sleep, in milliseconds.
    pub slow_min_ms: u64,
    /// Upper bound of the slow endpoint's sleep, in milliseconds.
    pub slow_max_ms: u64,
    /// Bytes appended to the leak buffer per memory-leak call.
    pub leak_chunk_bytes: usize,
    /// Leaked chunk count past which the leak log escalates to ERROR.
    pub leak_warn_chunks: usize,
    /// Duration of the cpu-spike busy loop, in milliseconds.
    pub cpu_spike_ms: u64,
    /// Size of one summation batch inside the cpu-spike loop.
    pub cpu_spike_batch: u64,
    /// Whether the crash endpoint aborts the process instead of
    /// returning 500. Off by default; aborting is untestable and
    /// operationally risky.
    pub crash_aborts_process: bool,
    /// Random seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "aiops-demo-service".to_string(),
            slow_min_ms: 2000,
            slow_max_ms: 5000,
            leak_chunk_bytes: DEFAULT_LEAK_CHUNK_BYTES,
            leak_warn_chunks: 10,
            cpu_spike_ms: 3000,
            cpu_spike_batch: 10_000,
            crash_aborts_process: false,
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Sets the service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Sets the slow endpoint's sleep range, in milliseconds.
    #[must_use]
    pub const fn with_slow_range_ms(mut self, min: u64, max: u64) -> Self {
        self.slow_min_ms = min;
        self.slow_max_ms = max;
        self
    }

    /// Sets the leak chunk size in bytes.
    #[must_use]
    pub const fn with_leak_chunk_bytes(mut self, bytes: usize) -> Self {
        self.leak_chunk_bytes = bytes;
        self
    }

    /// Sets the cpu-spike busy-loop duration, in milliseconds.
    #[must_use]
    pub const fn with_cpu_spike_ms(mut self, ms: u64) -> Self {
        self.cpu_spike_ms = ms;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets whether the crash endpoint aborts the process.
    #[must_use]
    pub const fn with_crash_aborts_process(mut self, abort: bool) -> Self {
        self.crash_aborts_process = abort;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the service name is empty, the slow delay
    /// range is inverted, or the leak chunk size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.service_name.is_empty() {
            return Err(Error::InvalidConfig("service name is empty".to_string()));
        }
        if self.slow_min_ms > self.slow_max_ms {
            return Err(Error::InvalidConfig(format!(
                "slow delay range is inverted: {}..{} ms",
                self.slow_min_ms, self.slow_max_ms
            )));
        }
        if self.leak_chunk_bytes == 0 {
            return Err(Error::InvalidConfig(
                "leak chunk size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
