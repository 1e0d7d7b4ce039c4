use std::collections::HashMap;

/// Base type-adaptive threshold table (spec §4.2, illustrative defaults).
fn base_threshold(object_type: &str) -> f64 {
    match object_type.to_lowercase().as_str() {
        "person" => 0.97,
        "place" | "location" => 0.93,
        "scene" => 0.90,
        _ => 0.95, // object / unknown
    }
}

/// Confidence-adjusted threshold, with user overrides from
/// `update_contextual_threshold` (spec §4.2).
#[derive(Debug, Clone, Default)]
pub struct ThresholdTable {
    overrides: HashMap<String, f64>,
}

impl ThresholdTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_override(&mut self, object_type: &str, tau: f64) {
        self.overrides.insert(object_type.to_lowercase(), tau.clamp(0.0, 1.0));
    }

    /// `adjust_threshold(object_type, confidence) -> τ` (spec §4.2). Low
    /// candidate confidence raises τ by up to +0.04; high confidence
    /// leaves it unchanged. Monotone non-increasing in `confidence` for a
    /// fixed `object_type` (spec §8 property).
    pub fn adjust_threshold(&self, object_type: &str, confidence: f64) -> f64 {
        let base = self
            .overrides
            .get(&object_type.to_lowercase())
            .copied()
            .unwrap_or_else(|| base_threshold(object_type));
        let confidence = confidence.clamp(0.0, 1.0);
        let strictness_bonus = (1.0 - confidence) * 0.04;
        (base + strictness_bonus).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_thresholds_match_spec_table() {
        let table = ThresholdTable::new();
        assert_eq!(table.adjust_threshold("person", 1.0), 0.97);
        assert_eq!(table.adjust_threshold("widget", 1.0), 0.95);
        assert_eq!(table.adjust_threshold("place", 1.0), 0.93);
        assert_eq!(table.adjust_threshold("Scene", 1.0), 0.90);
    }

    #[test]
    fn low_confidence_raises_threshold() {
        let table = ThresholdTable::new();
        let strict = table.adjust_threshold("person", 0.0);
        let lenient = table.adjust_threshold("person", 1.0);
        assert!(strict > lenient);
        assert!((strict - lenient - 0.04).abs() < 1e-9);
    }

    #[test]
    fn override_replaces_base() {
        let mut table = ThresholdTable::new();
        table.set_override("person", 0.5);
        assert_eq!(table.adjust_threshold("person", 1.0), 0.5);
    }

    proptest::proptest! {
        #[test]
        fn monotone_non_increasing_in_confidence(c1 in 0.0f64..1.0, c2 in 0.0f64..1.0) {
            let table = ThresholdTable::new();
            let (lo, hi) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
            let tau_lo = table.adjust_threshold("object", lo);
            let tau_hi = table.adjust_threshold("object", hi);
            proptest::prop_assert!(tau_hi <= tau_lo + 1e-12);
        }
    }
}
