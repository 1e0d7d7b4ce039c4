use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::confidence::Confidence;
use super::spatial::{GeoCoordinate, SpatialData};

/// Per-entry metadata (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub object_type: String,
    pub description: String,
    pub confidence: Confidence,
    pub tags: HashSet<String>,
    pub spatial: Option<SpatialData>,
    pub timestamp: DateTime<Utc>,
    pub location: Option<GeoCoordinate>,
}

impl Metadata {
    pub fn new(object_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            description: description.into(),
            confidence: Confidence::default(),
            tags: HashSet::new(),
            spatial: None,
            timestamp: Utc::now(),
            location: None,
        }
    }

    /// Case-insensitive object type comparison, as required by the dedup
    /// fusion rule (spec §4.2: "object_type matches (case-insensitive)").
    pub fn object_type_matches(&self, other: &Metadata) -> bool {
        self.object_type.eq_ignore_ascii_case(&other.object_type)
    }
}

/// Jaccard similarity between two string sets, used by the dedup fusion
/// rule over tags and categories (spec §4.2).
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jaccard_identical_sets_is_one() {
        let a: HashSet<String> = ["x".into(), "y".into()].into_iter().collect();
        assert_eq!(jaccard(&a, &a), 1.0);
    }

    #[test]
    fn jaccard_disjoint_sets_is_zero() {
        let a: HashSet<String> = ["x".into()].into_iter().collect();
        let b: HashSet<String> = ["y".into()].into_iter().collect();
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn jaccard_both_empty_is_one() {
        let a: HashSet<String> = HashSet::new();
        assert_eq!(jaccard(&a, &a), 1.0);
    }
}
