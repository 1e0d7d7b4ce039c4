use chrono::{DateTime, Utc};
use trinity_core::memory::BaseEntry;

pub const FEATURE_COUNT: usize = 8;

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Extract the 8 normalized features used by the consolidation predictor
/// (spec §4.3), evaluated as of `now`.
pub fn extract_features(entry: &BaseEntry, now: DateTime<Utc>) -> [f64; FEATURE_COUNT] {
    let access_frequency = clamp01(entry.access_count as f64 / 50.0);

    let hours_since_last = now.signed_duration_since(entry.last_accessed).num_seconds().max(0) as f64 / 3600.0;
    let time_since_last_access = clamp01(hours_since_last / 24.0);

    let average_confidence = entry.metadata.confidence.value();

    let spatial_stability = if entry.metadata.spatial.is_some() { 0.8 } else { 0.5 };

    let age_hours = now.signed_duration_since(entry.created).num_seconds().max(0) as f64 / 3600.0;
    let temporal_cluster = if age_hours < 24.0 {
        0.8
    } else if age_hours < 7.0 * 24.0 {
        0.5
    } else {
        0.2
    };

    let semantic_relevance = clamp01(entry.metadata.tags.len() as f64 / 10.0);

    let memory_age = clamp01(age_hours / (7.0 * 24.0));

    let access_pattern = clamp01(access_frequency + if time_since_last_access < 0.1 { 0.3 } else { 0.0 });

    [
        access_frequency,
        time_since_last_access,
        average_confidence,
        spatial_stability,
        temporal_cluster,
        semantic_relevance,
        memory_age,
        access_pattern,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use trinity_core::memory::{Metadata, Tier};

    #[test]
    fn fresh_entry_has_high_temporal_cluster_and_low_memory_age() {
        let entry = BaseEntry::new(vec![1.0, 0.0], Tier::Working, Metadata::new("chair", "d"));
        let features = extract_features(&entry, Utc::now());
        assert_eq!(features[4], 0.8);
        assert!(features[6] < 0.01);
    }

    #[test]
    fn old_entry_has_low_temporal_cluster_and_high_memory_age() {
        let mut entry = BaseEntry::new(vec![1.0, 0.0], Tier::Episodic, Metadata::new("chair", "d"));
        entry.created = Utc::now() - Duration::days(10);
        entry.last_accessed = entry.created;
        let features = extract_features(&entry, Utc::now());
        assert_eq!(features[4], 0.2);
        assert!((features[6] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_features_are_normalized() {
        let mut entry = BaseEntry::new(vec![1.0, 0.0], Tier::Working, Metadata::new("chair", "d"));
        entry.access_count = 1000;
        entry.metadata.tags = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let features = extract_features(&entry, Utc::now());
        for f in features {
            assert!((0.0..=1.0).contains(&f));
        }
    }
}
