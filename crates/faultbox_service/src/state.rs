//! Process-wide service state.
//!
//! One [`AppState`] lives for the whole process and is shared across
//! requests behind an `Arc`. It owns the request counter, the
//! intentionally unbounded leak buffer, the seeded RNG, and the
//! validated outcome catalog.

use crate::catalog::Catalog;
use crate::config::ServiceConfig;
use crate::error::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Snapshot of the leak buffer after one growth step.
#[derive(Debug, Clone, Copy)]
pub struct LeakReport {
    /// Number of retained chunks.
    pub chunks: usize,
    /// Total retained bytes.
    pub bytes: usize,
}

impl LeakReport {
    /// Retained size in whole megabytes.
    #[must_use]
    pub const fn leaked_mb(&self) -> usize {
        self.bytes / (1024 * 1024)
    }
}

/// Shared service context.
pub struct AppState {
    config: ServiceConfig,
    catalog: Catalog,
    request_count: AtomicU64,
    // Grows by one chunk per memory-leak call, never released within
    // the process lifetime.
    leak: Mutex<Vec<Vec<u8>>>,
    rng: Mutex<ChaCha8Rng>,
}

impl AppState {
    /// Builds the service state, validating configuration and outcome
    /// tables up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or any outcome table is
    /// invalid.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::build()?;
        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

        Ok(Self {
            config,
            catalog,
            request_count: AtomicU64::new(0),
            leak: Mutex::new(Vec::new()),
            rng: Mutex::new(rng),
        })
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the outcome catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Increments the request counter and returns the new id.
    pub fn next_request_id(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the number of requests counted so far.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Appends one chunk to the leak buffer and reports its new size.
    pub fn grow_leak(&self) -> LeakReport {
        let mut leak = self.leak.lock().unwrap();
        leak.push(vec![0x78; self.config.leak_chunk_bytes]);
        LeakReport {
            chunks: leak.len(),
            bytes: leak.iter().map(Vec::len).sum(),
        }
    }

    /// Returns the total bytes currently retained by the leak buffer.
    pub fn leaked_bytes(&self) -> usize {
        self.leak.lock().unwrap().iter().map(Vec::len).sum()
    }

    /// Runs a closure against the shared RNG.
    ///
    /// This is the service's single randomness seam: seeding the
    /// config makes every draw reproducible.
    pub fn draw<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap();
        f(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn seeded_state() -> AppState {
        AppState::new(ServiceConfig::default().with_seed(42)).unwrap()
    }

    #[test]
    fn request_ids_are_monotonic() {
        let state = seeded_state();
        assert_eq!(state.request_count(), 0);
        assert_eq!(state.next_request_id(), 1);
        assert_eq!(state.next_request_id(), 2);
        assert_eq!(state.request_count(), 2);
    }

    #[test]
    fn leak_buffer_growth_is_monotonic() {
        let state = AppState::new(
            ServiceConfig::default()
                .with_seed(42)
                .with_leak_chunk_bytes(1024),
        )
        .unwrap();

        assert_eq!(state.leaked_bytes(), 0);

        let mut previous = 0;
        for step in 1..=5 {
            let report = state.grow_leak();
            assert_eq!(report.chunks, step);
            assert!(report.bytes > previous);
            previous = report.bytes;
        }
        assert_eq!(state.leaked_bytes(), 5 * 1024);
    }

    #[test]
    fn leak_report_counts_whole_megabytes() {
        let report = LeakReport {
            chunks: 3,
            bytes: 3 * 1024 * 1024,
        };
        assert_eq!(report.leaked_mb(), 3);
    }

    #[test]
    fn same_seed_draws_identically() {
        let state1 = seeded_state();
        let state2 = seeded_state();

        let draws1: Vec<u64> = (0..10).map(|_| state1.draw(|rng| rng.gen::<u64>())).collect();
        let draws2: Vec<u64> = (0..10).map(|_| state2.draw(|rng| rng.gen::<u64>())).collect();

        assert_eq!(draws1, draws2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = AppState::new(ServiceConfig::default().with_slow_range_ms(100, 1));
        assert!(result.is_err());
    }

    #[test]
    fn draw_yields_values_in_requested_range() {
        let state = seeded_state();
        for _ in 0..100 {
            let value = state.draw(|rng| rng.gen_range(10..=30));
            assert!((10..=30).contains(&value));
        }
    }
}
