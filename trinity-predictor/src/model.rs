use std::path::Path;

use serde::{Deserialize, Serialize};
use trinity_core::errors::TrinityResult;
use trinity_core::rng::SplitMix64;

use crate::features::FEATURE_COUNT;

const LEARNING_RATE: f64 = 0.01;

/// Persisted predictor state: weights plus the number of SGD steps applied
/// (spec §4.3 "Persistence: weights + training count as a JSON blob").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationPredictor {
    weights: [f64; FEATURE_COUNT],
    training_count: u64,
}

impl ConsolidationPredictor {
    /// A fresh predictor with weights sampled `Uniform(-0.1, 0.1)`.
    pub fn new(seed: u64) -> Self {
        let mut rng = SplitMix64::new(seed);
        let mut weights = [0.0; FEATURE_COUNT];
        for w in &mut weights {
            *w = rng.next_f64_range(-0.1, 0.1);
        }
        Self {
            weights,
            training_count: 0,
        }
    }

    pub fn training_count(&self) -> u64 {
        self.training_count
    }

    /// `σ(w·x)` (spec §4.3 "Score").
    pub fn score(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        sigmoid(dot(&self.weights, features))
    }

    /// `should_consolidate(entry, τ) = score ≥ τ` (spec §4.3 "Decision").
    pub fn should_consolidate(&self, features: &[f64; FEATURE_COUNT], tau: f64) -> bool {
        self.score(features) >= tau
    }

    /// Apply a single SGD step on the log-loss for one labeled example
    /// (spec §4.3 "Training").
    pub fn train_one(&mut self, features: &[f64; FEATURE_COUNT], label: f64) {
        let prediction = self.score(features);
        let error = prediction - label;
        for (w, x) in self.weights.iter_mut().zip(features.iter()) {
            *w -= LEARNING_RATE * error * x;
        }
        self.training_count += 1;
    }

    pub fn to_json(&self) -> TrinityResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> TrinityResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Atomically persist to `path` (write-to-temp + rename, matching the
    /// memory manager's tier-file persistence convention).
    pub fn save(&self, path: &Path) -> TrinityResult<()> {
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, self.to_json()?)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load from `path`. A missing or corrupt file yields a fresh predictor
    /// rather than an error, matching the crash-tolerance stance used for
    /// tier files.
    pub fn load_or_default(path: &Path, seed: u64) -> Self {
        match std::fs::read_to_string(path).ok().and_then(|s| Self::from_json(&s).ok()) {
            Some(predictor) => predictor,
            None => Self::new(seed),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn dot(a: &[f64; FEATURE_COUNT], b: &[f64; FEATURE_COUNT]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_weights_are_within_range() {
        let predictor = ConsolidationPredictor::new(1);
        for w in predictor.weights {
            assert!((-0.1..0.1).contains(&w));
        }
    }

    #[test]
    fn score_is_bounded() {
        let predictor = ConsolidationPredictor::new(1);
        let features = [1.0; FEATURE_COUNT];
        let s = predictor.score(&features);
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn training_moves_score_toward_label() {
        let mut predictor = ConsolidationPredictor::new(1);
        let features = [0.9; FEATURE_COUNT];
        let before = predictor.score(&features);
        for _ in 0..200 {
            predictor.train_one(&features, 1.0);
        }
        let after = predictor.score(&features);
        assert!(after > before);
        assert_eq!(predictor.training_count(), 200);
    }

    #[test]
    fn training_toward_zero_label_decreases_score() {
        let mut predictor = ConsolidationPredictor::new(2);
        let features = [0.9; FEATURE_COUNT];
        let before = predictor.score(&features);
        for _ in 0..200 {
            predictor.train_one(&features, 0.0);
        }
        let after = predictor.score(&features);
        assert!(after < before);
    }

    #[test]
    fn round_trips_through_json() {
        let mut predictor = ConsolidationPredictor::new(3);
        predictor.train_one(&[0.5; FEATURE_COUNT], 1.0);
        let json = predictor.to_json().expect("serialize");
        let restored = ConsolidationPredictor::from_json(&json).expect("deserialize");
        assert_eq!(restored.training_count(), predictor.training_count());
        assert_eq!(restored.weights, predictor.weights);
    }

    #[test]
    fn save_and_load_round_trip_via_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("predictor.json");
        let mut predictor = ConsolidationPredictor::new(4);
        predictor.train_one(&[0.3; FEATURE_COUNT], 1.0);
        predictor.save(&path).expect("save");

        let loaded = ConsolidationPredictor::load_or_default(&path, 99);
        assert_eq!(loaded.training_count(), predictor.training_count());
    }

    #[test]
    fn missing_file_yields_fresh_predictor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let loaded = ConsolidationPredictor::load_or_default(&path, 5);
        assert_eq!(loaded.training_count(), 0);
    }
}
