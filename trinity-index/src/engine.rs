use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use trinity_core::config::IndexConfig;
use trinity_core::memory::{cosine_similarity, EntryId, IndexRecord, TierFilter};

use crate::cache::ResultCache;
use crate::ivf::IvfIndex;
use crate::stats::IndexStats;
use crate::{brute, pq};

/// The vector index (spec §4.1). Exhaustive scan below `brute_threshold`
/// live entries, IVF above it; result cache in front of both.
///
/// Not internally synchronized — spec §5 scopes the index to the
/// coordinator's single-writer scheduling domain. A caller that introduces
/// cross-domain access is expected to wrap this behind one write-lock per
/// the design note, rather than this type growing interior mutability.
pub struct VectorIndex {
    config: IndexConfig,
    records: HashMap<EntryId, IndexRecord>,
    ivf: Option<IvfIndex>,
    cache: ResultCache,
    ivf_seed: u64,
    quantizer: Option<pq::ProductQuantizer>,
}

impl VectorIndex {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            records: HashMap::new(),
            ivf: None,
            cache: ResultCache::new(10_000),
            ivf_seed: 0x5EED,
            quantizer: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert or overwrite a record. Invalidates the result cache and, once
    /// live cardinality crosses `brute_threshold`, (re)builds or
    /// incrementally extends the IVF partition (spec §4.1).
    pub fn insert(&mut self, record: IndexRecord) {
        self.records.insert(record.id.clone(), record.clone());

        if self.ivf.is_none() && self.records.len() >= self.config.brute_threshold {
            self.build_ivf();
        } else if let Some(ivf) = self.ivf.as_mut() {
            ivf.insert(&record);
        }

        self.cache.clear();
    }

    pub fn delete(&mut self, id: &EntryId) {
        if self.records.remove(id).is_some() {
            if let Some(ivf) = self.ivf.as_mut() {
                ivf.delete(id);
            }
            self.cache.clear();
        }
    }

    /// Update the tie-break fields (access count, last-accessed) for an
    /// already-indexed record without touching its embedding or cluster
    /// placement. Still clears the cache since it can change result
    /// ordering within a tie-broken brute-force scan.
    pub fn touch(&mut self, id: &EntryId, access_count: u64, last_accessed: DateTime<Utc>) {
        if let Some(r) = self.records.get_mut(id) {
            r.access_count = access_count;
            r.last_accessed = last_accessed;
            self.cache.clear();
        }
    }

    /// Top-K cosine search, optionally restricted to a tier subset.
    pub fn search(&mut self, query: &[f32], k: usize, tier_filter: TierFilter) -> Vec<(EntryId, f64)> {
        if let Some(cached) = self.cache.get(query, k) {
            return cached;
        }

        let scored = if let Some(ivf) = &self.ivf {
            let candidate_ids = ivf.probe(query, self.config.nprobe);
            let candidates: Vec<&IndexRecord> = candidate_ids
                .iter()
                .filter_map(|id| self.records.get(id))
                .collect();
            let local = brute::search(&candidates, query, k, tier_filter);
            local
                .into_iter()
                .map(|(i, score)| (candidates[i].id.clone(), score))
                .collect::<Vec<_>>()
        } else {
            let all: Vec<&IndexRecord> = self.records.values().collect();
            let local = brute::search(&all, query, k, tier_filter);
            local
                .into_iter()
                .map(|(i, score)| (all[i].id.clone(), score))
                .collect::<Vec<_>>()
        };

        // Re-derive scores with the already-computed (id, score) pairs: the
        // brute-force helper scored against the candidate slice, so this is
        // already final. Recompute nothing further here.
        let result: Vec<(EntryId, f64)> = scored;
        self.cache.insert(query, k, result.clone());
        result
    }

    fn build_ivf(&mut self) {
        let refs: Vec<&IndexRecord> = self.records.values().collect();
        info!(live_count = refs.len(), "building IVF partition");
        self.ivf = Some(IvfIndex::build(&refs, self.config.max_ivf_clusters, self.ivf_seed));
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            hits: self.cache.hits(),
            misses: self.cache.misses(),
            live_count: self.records.len(),
            using_ivf: self.ivf.is_some(),
            ivf_clusters: self.ivf.as_ref().map(|i| i.cluster_count()).unwrap_or(0),
        }
    }

    /// Cosine-score `query` directly against one stored record, bypassing
    /// the index strategy entirely. Used by the dedup engine, which needs
    /// point comparisons rather than top-K search.
    pub fn score_against(&self, id: &EntryId, query: &[f32]) -> Option<f64> {
        self.records.get(id).map(|r| cosine_similarity(query, &r.embedding))
    }

    pub fn clear(&mut self) {
        debug!("clearing vector index");
        self.records.clear();
        self.ivf = None;
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trinity_core::memory::Tier;

    fn record(id: &str, embedding: Vec<f32>) -> IndexRecord {
        IndexRecord {
            id: EntryId::from(id),
            embedding,
            tier: Tier::Working,
            access_count: 0,
            last_accessed: Utc::now(),
        }
    }

    #[test]
    fn brute_force_below_threshold() {
        let mut idx = VectorIndex::new(IndexConfig {
            brute_threshold: 1000,
            ..Default::default()
        });
        idx.insert(record("a", vec![1.0, 0.0]));
        idx.insert(record("b", vec![0.0, 1.0]));
        let result = idx.search(&[1.0, 0.0], 1, TierFilter::all());
        assert_eq!(result[0].0, EntryId::from("a"));
        assert!(!idx.stats().using_ivf);
    }

    #[test]
    fn switches_to_ivf_above_threshold() {
        let mut idx = VectorIndex::new(IndexConfig {
            brute_threshold: 50,
            max_ivf_clusters: 10,
            nprobe: 3,
        });
        for i in 0..60 {
            idx.insert(record(&format!("r{i}"), vec![(i as f32).cos(), (i as f32).sin()]));
        }
        assert!(idx.stats().using_ivf);
    }

    #[test]
    fn cache_hits_on_repeated_query() {
        let mut idx = VectorIndex::new(IndexConfig::default());
        idx.insert(record("a", vec![1.0, 0.0]));
        let _ = idx.search(&[1.0, 0.0], 1, TierFilter::all());
        let _ = idx.search(&[1.0, 0.0], 1, TierFilter::all());
        assert_eq!(idx.stats().hits, 1);
    }

    #[test]
    fn insert_invalidates_cache() {
        let mut idx = VectorIndex::new(IndexConfig::default());
        idx.insert(record("a", vec![1.0, 0.0]));
        let _ = idx.search(&[1.0, 0.0], 1, TierFilter::all());
        idx.insert(record("b", vec![0.0, 1.0]));
        let _ = idx.search(&[1.0, 0.0], 1, TierFilter::all());
        assert_eq!(idx.stats().hits, 0);
    }

    #[test]
    fn delete_removes_from_results() {
        let mut idx = VectorIndex::new(IndexConfig::default());
        idx.insert(record("a", vec![1.0, 0.0]));
        idx.delete(&EntryId::from("a"));
        let result = idx.search(&[1.0, 0.0], 5, TierFilter::all());
        assert!(result.is_empty());
    }
}
