//! The traffic loop.
//!
//! One run: resolve the token, probe `/health`, then dispatch GET
//! requests against the weighted endpoint mix until the deadline,
//! pacing dispatches with uniform random pauses and capping in-flight
//! requests with a semaphore.

use crate::config::TrafficConfig;
use crate::error::Result;
use crate::summary::TrafficSummary;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Default)]
struct Counters {
    total: AtomicU64,
    errors: AtomicU64,
    statuses: Mutex<BTreeMap<u16, u64>>,
}

impl Counters {
    fn record_status(&self, status: u16) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if status >= 400 {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        *self.statuses.lock().unwrap().entry(status).or_insert(0) += 1;
    }

    fn record_transport_error(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn summarize(&self, elapsed: Duration) -> TrafficSummary {
        TrafficSummary {
            total_requests: self.total.load(Ordering::Relaxed),
            error_count: self.errors.load(Ordering::Relaxed),
            status_counts: self.statuses.lock().unwrap().clone(),
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }
}

/// Runs one traffic generation pass and returns its summary.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the token
/// command fails, or the HTTP client cannot be built. Individual
/// request failures are counted, logged, and never abort the run.
pub async fn run(config: TrafficConfig) -> Result<TrafficSummary> {
    config.validate()?;

    let token = config.token.resolve().await?;
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    info!(
        "starting traffic run against {} for {:?}",
        config.base_url, config.duration
    );
    probe(&client, &config.base_url, token.as_deref()).await;

    let mut rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let counters = Arc::new(Counters::default());
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let mut tasks = JoinSet::new();

    let started = Instant::now();
    let deadline = started + config.duration;

    while Instant::now() < deadline {
        let path = config.mix.draw(&mut rng).to_string();
        let url = format!("{}{path}", config.base_url);

        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .expect("semaphore is never closed");
        let client = client.clone();
        let counters = Arc::clone(&counters);
        let token = token.clone();

        tasks.spawn(async move {
            let _permit = permit;
            let mut request = client.get(&url);
            if let Some(token) = token.as_deref() {
                request = request.bearer_auth(token);
            }
            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    counters.record_status(status);
                    if status >= 400 {
                        warn!("{path} -> {status}");
                    } else {
                        info!("{path} -> {status}");
                    }
                }
                Err(err) => {
                    counters.record_transport_error();
                    warn!("{path} -> request error: {err}");
                }
            }
        });

        let pause = rng.gen_range(config.delay_min_ms..=config.delay_max_ms);
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }

    // Drain in-flight requests before summarizing.
    while tasks.join_next().await.is_some() {}

    let summary = counters.summarize(started.elapsed());
    info!(
        "traffic run complete: {} requests, {} errors ({:.1}% error rate) in {:.1}s",
        summary.total_requests,
        summary.error_count,
        summary.error_rate() * 100.0,
        summary.elapsed_seconds
    );
    Ok(summary)
}

async fn probe(client: &reqwest::Client, base_url: &str, token: Option<&str>) {
    let url = format!("{base_url}/health");
    let mut request = client.get(&url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    match request.send().await {
        Ok(response) if response.status().is_success() => {
            info!("service is reachable");
        }
        Ok(response) => {
            warn!("health probe returned status {}", response.status());
        }
        Err(err) => {
            warn!("health probe failed: {err}");
        }
    }
}
