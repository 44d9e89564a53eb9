//! Validated outcome sets and weighted selection.

use crate::error::{Error, Result};
use crate::outcome::Outcome;
use rand::Rng;

/// The weighted collection of outcomes for one endpoint.
///
/// Construction validates the set once, up front: selection itself
/// has no error path. The random source is passed in by the caller,
/// so tests can drive selection with a seeded generator.
#[derive(Debug, Clone)]
pub struct OutcomeSet {
    name: String,
    outcomes: Vec<Outcome>,
}

impl OutcomeSet {
    /// Creates a validated outcome set.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, if any weight is zero,
    /// negative, or not finite, or if any status code falls outside
    /// the HTTP range (100..=599).
    pub fn new(name: impl Into<String>, outcomes: Vec<Outcome>) -> Result<Self> {
        let name = name.into();

        if outcomes.is_empty() {
            return Err(Error::EmptySet { set: name });
        }

        for (index, outcome) in outcomes.iter().enumerate() {
            if !outcome.weight.is_finite() || outcome.weight <= 0.0 {
                return Err(Error::InvalidWeight {
                    set: name,
                    index,
                    weight: outcome.weight,
                });
            }
            if !(100..=599).contains(&outcome.status) {
                return Err(Error::InvalidStatus {
                    set: name,
                    index,
                    status: outcome.status,
                });
            }
        }

        Ok(Self { name, outcomes })
    }

    /// Creates a set with exactly one outcome (a deterministic endpoint).
    ///
    /// # Errors
    ///
    /// Returns an error if the outcome fails validation.
    pub fn single(name: impl Into<String>, outcome: Outcome) -> Result<Self> {
        Self::new(name, vec![outcome])
    }

    /// Returns the set name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the outcomes in declaration order.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Returns the number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if the set is empty. Always false for a
    /// constructed set; present for slice-like completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns the first outcome. For single-outcome sets this is the
    /// deterministic result.
    #[must_use]
    pub fn first(&self) -> &Outcome {
        // Non-empty by construction.
        &self.outcomes[0]
    }

    /// Returns the sum of all weights in the set.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.outcomes.iter().map(|o| o.weight).sum()
    }

    /// Draws one outcome, with probability weight / total weight.
    pub fn select<R: Rng>(&self, rng: &mut R) -> &Outcome {
        let mut roll = rng.gen::<f64>() * self.total_weight();
        for outcome in &self.outcomes {
            if roll < outcome.weight {
                return outcome;
            }
            roll -= outcome.weight;
        }
        // Floating-point rounding can leave a sliver past the final
        // bucket; the last outcome absorbs it.
        &self.outcomes[self.outcomes.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Severity;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    fn process_like_set() -> OutcomeSet {
        OutcomeSet::new(
            "process",
            vec![
                Outcome::new(70.0, 200, json!({"status": "success"})),
                Outcome::new(7.5, 400, json!({"error": "Invalid data"}))
                    .with_log(Severity::Error, "invalid input data received"),
                Outcome::new(7.5, 403, json!({"error": "Permission denied"}))
                    .with_log(Severity::Error, "access denied to resource"),
                Outcome::new(7.5, 503, json!({"error": "Database unavailable"}))
                    .with_log(Severity::Error, "database connection refused"),
                Outcome::new(7.5, 504, json!({"error": "Request timeout"}))
                    .with_log(Severity::Error, "request timed out after 30s"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_set_fails_construction() {
        let result = OutcomeSet::new("empty", vec![]);
        assert!(matches!(result, Err(Error::EmptySet { .. })));
    }

    #[test]
    fn zero_weight_fails_construction() {
        let result = OutcomeSet::new(
            "bad",
            vec![Outcome::new(0.0, 200, json!({"status": "ok"}))],
        );
        assert!(matches!(result, Err(Error::InvalidWeight { index: 0, .. })));
    }

    #[test]
    fn negative_weight_fails_construction() {
        let result = OutcomeSet::new(
            "bad",
            vec![
                Outcome::new(1.0, 200, json!({"status": "ok"})),
                Outcome::new(-2.0, 503, json!({"error": "boom"})),
            ],
        );
        assert!(matches!(result, Err(Error::InvalidWeight { index: 1, .. })));
    }

    #[test]
    fn nan_weight_fails_construction() {
        let result = OutcomeSet::new(
            "bad",
            vec![Outcome::new(f64::NAN, 200, json!({"status": "ok"}))],
        );
        assert!(matches!(result, Err(Error::InvalidWeight { .. })));
    }

    #[test]
    fn out_of_range_status_fails_construction() {
        let result = OutcomeSet::new(
            "bad",
            vec![Outcome::new(1.0, 999, json!({"error": "boom"}))],
        );
        assert!(matches!(result, Err(Error::InvalidStatus { status: 999, .. })));
    }

    #[test]
    fn single_outcome_set_is_deterministic() {
        let set = OutcomeSet::single(
            "permission",
            Outcome::new(1.0, 403, json!({"error": "Permission denied"})),
        )
        .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(set.select(&mut rng).status, 403);
        }
        assert_eq!(set.first().status, 403);
    }

    #[test]
    fn same_seed_produces_identical_draws() {
        let set = process_like_set();

        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);

        let draws1: Vec<u16> = (0..200).map(|_| set.select(&mut rng1).status).collect();
        let draws2: Vec<u16> = (0..200).map(|_| set.select(&mut rng2).status).collect();

        assert_eq!(draws1, draws2);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn selection_converges_to_weight_ratios() {
        const DRAWS: usize = 10_000;

        let set = process_like_set();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let successes = (0..DRAWS)
            .filter(|_| set.select(&mut rng).status == 200)
            .count();

        let success_rate = successes as f64 / DRAWS as f64;

        // 70% success, within standard sampling tolerance.
        assert!(
            (success_rate - 0.70).abs() < 0.03,
            "success rate {success_rate} not within tolerance of 0.70"
        );
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn coin_flip_set_converges_to_half() {
        const DRAWS: usize = 10_000;

        let set = OutcomeSet::new(
            "database",
            vec![
                Outcome::new(1.0, 200, json!({"status": "ok"})),
                Outcome::new(1.0, 503, json!({"error": "Database unavailable"})),
            ],
        )
        .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(13);

        let successes = (0..DRAWS)
            .filter(|_| set.select(&mut rng).status == 200)
            .count();

        let success_rate = successes as f64 / DRAWS as f64;
        assert!(
            (success_rate - 0.50).abs() < 0.03,
            "success rate {success_rate} not within tolerance of 0.50"
        );
    }

    #[test]
    fn total_weight_sums_declared_weights() {
        let set = process_like_set();
        assert!((set.total_weight() - 100.0).abs() < f64::EPSILON);
        assert_eq!(set.len(), 5);
        assert!(!set.is_empty());
        assert_eq!(set.name(), "process");
    }

    proptest! {
        #[test]
        fn selection_always_returns_a_member(
            weights in prop::collection::vec(0.1f64..100.0, 1..8),
            seed in any::<u64>(),
        ) {
            let outcomes: Vec<Outcome> = weights
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    #[allow(clippy::cast_possible_truncation)]
                    let status = 200 + (i as u16);
                    Outcome::new(w, status, json!({"index": i}))
                })
                .collect();
            let statuses: Vec<u16> = outcomes.iter().map(|o| o.status).collect();

            let set = OutcomeSet::new("prop", outcomes).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            for _ in 0..50 {
                let drawn = set.select(&mut rng);
                prop_assert!(statuses.contains(&drawn.status));
            }
        }
    }
}
