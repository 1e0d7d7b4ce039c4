use std::cmp::Ordering;

use rayon::prelude::*;
use trinity_core::memory::{cosine_similarity, IndexRecord, TierFilter};

/// Exhaustive cosine scan, used below `brute_threshold` (spec §4.1).
/// Tie-break: higher access count first, then newer `lastAccessed`.
pub fn search(records: &[&IndexRecord], query: &[f32], k: usize, tier_filter: TierFilter) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = records
        .par_iter()
        .enumerate()
        .filter(|(_, r)| tier_filter.contains(r.tier))
        .map(|(i, r)| (i, cosine_similarity(query, &r.embedding)))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                let ra = records[a.0];
                let rb = records[b.0];
                rb.access_count
                    .cmp(&ra.access_count)
                    .then_with(|| rb.last_accessed.cmp(&ra.last_accessed))
            })
    });
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trinity_core::memory::{EntryId, Tier};

    fn record(id: &str, embedding: Vec<f32>, access_count: u64) -> IndexRecord {
        IndexRecord {
            id: EntryId::from(id),
            embedding,
            tier: Tier::Working,
            access_count,
            last_accessed: Utc::now(),
        }
    }

    #[test]
    fn returns_top_k_by_similarity() {
        let records = vec![
            record("a", vec![1.0, 0.0], 0),
            record("b", vec![0.0, 1.0], 0),
            record("c", vec![0.9, 0.1], 0),
        ];
        let refs: Vec<&IndexRecord> = records.iter().collect();
        let result = search(&refs, &[1.0, 0.0], 2, TierFilter::all());
        assert_eq!(result.len(), 2);
        assert_eq!(records[result[0].0].id, EntryId::from("a"));
    }

    #[test]
    fn ties_broken_by_access_count_then_recency() {
        let records = vec![
            record("low", vec![1.0, 0.0], 1),
            record("high", vec![1.0, 0.0], 5),
        ];
        let refs: Vec<&IndexRecord> = records.iter().collect();
        let result = search(&refs, &[1.0, 0.0], 2, TierFilter::all());
        assert_eq!(records[result[0].0].id, EntryId::from("high"));
    }

    #[test]
    fn tier_filter_excludes_other_tiers() {
        let mut episodic = record("e", vec![1.0, 0.0], 0);
        episodic.tier = Tier::Episodic;
        let records = vec![record("w", vec![1.0, 0.0], 0), episodic];
        let refs: Vec<&IndexRecord> = records.iter().collect();
        let result = search(&refs, &[1.0, 0.0], 2, TierFilter::only(Tier::Working));
        assert_eq!(result.len(), 1);
        assert_eq!(records[result[0].0].id, EntryId::from("w"));
    }
}
