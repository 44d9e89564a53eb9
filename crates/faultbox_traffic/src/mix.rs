//! Weighted endpoint mix.
//!
//! Mirrors the deployed demo's traffic pattern: mostly `/api/process`
//! with the failure endpoints sprinkled in.

use crate::error::{Error, Result};
use rand::Rng;

/// One endpoint and its relative weight in the mix.
#[derive(Debug, Clone)]
pub struct MixEntry {
    /// Request path, starting with `/`.
    pub path: String,
    /// Relative selection weight.
    pub weight: f64,
}

impl MixEntry {
    /// Creates a mix entry.
    #[must_use]
    pub fn new(path: impl Into<String>, weight: f64) -> Self {
        Self {
            path: path.into(),
            weight,
        }
    }
}

/// The weighted list of endpoints a run draws from.
#[derive(Debug, Clone)]
pub struct TargetMix {
    entries: Vec<MixEntry>,
}

impl Default for TargetMix {
    /// The deployed demo's mix: normal traffic dominates, each
    /// failure endpoint gets an equal share.
    fn default() -> Self {
        Self {
            entries: vec![
                MixEntry::new("/api/process", 3.0),
                MixEntry::new("/api/slow", 1.0),
                MixEntry::new("/api/database", 1.0),
                MixEntry::new("/api/permission", 1.0),
                MixEntry::new("/api/network", 1.0),
            ],
        }
    }
}

impl TargetMix {
    /// Creates a validated mix.
    ///
    /// # Errors
    ///
    /// Returns an error if the mix is empty, a weight is zero,
    /// negative, or not finite, or a path does not start with `/`.
    pub fn new(entries: Vec<MixEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidMix("mix is empty".to_string()));
        }
        for entry in &entries {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(Error::InvalidMix(format!(
                    "endpoint '{}' has invalid weight {}",
                    entry.path, entry.weight
                )));
            }
            if !entry.path.starts_with('/') {
                return Err(Error::InvalidMix(format!(
                    "endpoint '{}' does not start with '/'",
                    entry.path
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[MixEntry] {
        &self.entries
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Draws one endpoint path, with probability weight / total weight.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> &str {
        let mut roll = rng.gen::<f64>() * self.total_weight();
        for entry in &self.entries {
            if roll < entry.weight {
                return &entry.path;
            }
            roll -= entry.weight;
        }
        // Rounding sliver past the final bucket.
        &self.entries[self.entries.len() - 1].path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn default_mix_matches_the_demo_pattern() {
        let mix = TargetMix::default();
        assert_eq!(mix.entries().len(), 5);
        assert_eq!(mix.entries()[0].path, "/api/process");
        assert!((mix.total_weight() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_mix_is_rejected() {
        assert!(matches!(
            TargetMix::new(vec![]),
            Err(Error::InvalidMix(_))
        ));
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let result = TargetMix::new(vec![MixEntry::new("/health", 0.0)]);
        assert!(matches!(result, Err(Error::InvalidMix(_))));
    }

    #[test]
    fn relative_path_is_rejected() {
        let result = TargetMix::new(vec![MixEntry::new("health", 1.0)]);
        assert!(matches!(result, Err(Error::InvalidMix(_))));
    }

    #[test]
    fn draw_returns_mix_members() {
        let mix = TargetMix::default();
        let paths: Vec<&str> = mix.entries().iter().map(|e| e.path.as_str()).collect();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(paths.contains(&mix.draw(&mut rng)));
        }
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn draws_converge_to_mix_weights() {
        const DRAWS: usize = 10_000;

        let mix = TargetMix::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let process_draws = (0..DRAWS)
            .filter(|_| mix.draw(&mut rng) == "/api/process")
            .count();

        let fraction = process_draws as f64 / DRAWS as f64;
        let expected = 3.0 / 7.0;
        assert!(
            (fraction - expected).abs() < 0.03,
            "process fraction {fraction} not within tolerance of {expected}"
        );
    }
}
