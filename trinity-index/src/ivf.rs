use std::collections::HashMap;

use trinity_core::memory::{cosine_similarity, EntryId, IndexRecord};
use trinity_core::rng::SplitMix64;

/// Inverted-file approximate index (spec §4.1 "Dual strategy", else branch).
///
/// Built cold from a snapshot of records once live cardinality crosses
/// `brute_threshold`: initial centroids are a random sample, followed by
/// one assignment pass. No iterative (Lloyd's-algorithm) refinement is
/// performed — stability instead comes from incremental reassignment as
/// records are inserted, exactly as specified.
pub struct IvfIndex {
    centroids: Vec<Vec<f32>>,
    clusters: Vec<Vec<EntryId>>,
    assignment: HashMap<EntryId, usize>,
}

impl IvfIndex {
    /// Build from scratch over every live record, choosing
    /// `min(max_clusters, n/100)` clusters (at least 1).
    pub fn build(records: &[&IndexRecord], max_clusters: usize, seed: u64) -> Self {
        let n = records.len();
        let num_clusters = max_clusters.min((n / 100).max(1)).max(1);
        let mut rng = SplitMix64::new(seed);
        let centroid_idx = rng.sample_indices(n, num_clusters);
        let centroids: Vec<Vec<f32>> = centroid_idx.iter().map(|&i| records[i].embedding.clone()).collect();

        let mut clusters = vec![Vec::new(); centroids.len()];
        let mut assignment = HashMap::with_capacity(n);

        for r in records {
            let c = nearest_centroid(&centroids, &r.embedding);
            clusters[c].push(r.id.clone());
            assignment.insert(r.id.clone(), c);
        }

        Self {
            centroids,
            clusters,
            assignment,
        }
    }

    /// Incrementally place a newly inserted record into its nearest
    /// existing cluster, without recomputing any centroid.
    pub fn insert(&mut self, record: &IndexRecord) {
        if self.centroids.is_empty() {
            return;
        }
        let c = nearest_centroid(&self.centroids, &record.embedding);
        self.clusters[c].push(record.id.clone());
        self.assignment.insert(record.id.clone(), c);
    }

    pub fn delete(&mut self, id: &EntryId) {
        if let Some(c) = self.assignment.remove(id) {
            self.clusters[c].retain(|existing| existing != id);
        }
    }

    /// Ids belonging to the `nprobe` clusters whose centroid is closest to
    /// `query`.
    pub fn probe(&self, query: &[f32], nprobe: usize) -> Vec<EntryId> {
        let mut scored: Vec<(usize, f64)> = self
            .centroids
            .iter()
            .enumerate()
            .map(|(i, c)| (i, cosine_similarity(query, c)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(nprobe.max(1))
            .flat_map(|(i, _)| self.clusters[i].iter().cloned())
            .collect()
    }

    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }
}

fn nearest_centroid(centroids: &[Vec<f32>], embedding: &[f32]) -> usize {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, cosine_similarity(embedding, c)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trinity_core::memory::Tier;

    fn record(id: &str, embedding: Vec<f32>) -> IndexRecord {
        IndexRecord {
            id: EntryId::from(id),
            embedding,
            tier: Tier::Semantic,
            access_count: 0,
            last_accessed: Utc::now(),
        }
    }

    #[test]
    fn builds_at_least_one_cluster() {
        let records: Vec<IndexRecord> = (0..50).map(|i| record(&format!("r{i}"), vec![i as f32, 0.0])).collect();
        let refs: Vec<&IndexRecord> = records.iter().collect();
        let ivf = IvfIndex::build(&refs, 100, 1);
        assert!(ivf.cluster_count() >= 1);
    }

    #[test]
    fn probe_finds_nearby_vector() {
        let mut records: Vec<IndexRecord> = (0..2000)
            .map(|i| record(&format!("r{i}"), vec![(i as f32).cos(), (i as f32).sin()]))
            .collect();
        records.push(record("target", vec![1.0, 0.0]));
        let refs: Vec<&IndexRecord> = records.iter().collect();
        let ivf = IvfIndex::build(&refs, 100, 42);
        let probed = ivf.probe(&[1.0, 0.0], 5);
        assert!(probed.contains(&EntryId::from("target")));
    }

    #[test]
    fn delete_removes_from_cluster() {
        let records: Vec<IndexRecord> = (0..50).map(|i| record(&format!("r{i}"), vec![i as f32, 1.0])).collect();
        let refs: Vec<&IndexRecord> = records.iter().collect();
        let mut ivf = IvfIndex::build(&refs, 100, 3);
        let id = EntryId::from("r0");
        ivf.delete(&id);
        assert!(!ivf.clusters.iter().any(|c| c.contains(&id)));
    }
}
