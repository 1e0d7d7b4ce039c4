use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tracing::{debug, info};
use trinity_core::config::TrinityConfig;
use trinity_core::errors::{retry_with_backoff, RetryPolicy, TrinityResult};
use trinity_core::memory::{BaseEntry, EntryId, IndexRecord, Metadata, Tier, TierFilter};
use trinity_core::traits::TierStore;
use trinity_dedup::DedupEngine;
use trinity_index::VectorIndex;
use trinity_predictor::{extract_features, ConsolidationPredictor};

use crate::filter::{AdmissionPredicate, DefaultAdmissionPredicate};
use crate::persistence::JsonFileStore;
use crate::report::ConsolidationReport;

const EPISODIC_DEDUP_WINDOW: usize = 1000;
const CONSOLIDATION_SCORE_THRESHOLD: f64 = 0.7;
const SEMANTIC_CAP_THRESHOLD_STEP: f64 = 0.05;
const SEMANTIC_CAP_MAX_PASSES: usize = 20;

/// Three-tier memory manager (spec §4.4). Owns the canonical entry store,
/// the shared vector index, the dedup engine, and the consolidation
/// predictor, and ties them together per the ingestion/promotion/eviction
/// rules.
pub struct MemoryManager {
    config: TrinityConfig,
    entries: HashMap<EntryId, BaseEntry>,
    index: VectorIndex,
    dedup: DedupEngine,
    predictor: ConsolidationPredictor,
    store: JsonFileStore,
    admission: Box<dyn AdmissionPredicate>,
}

impl MemoryManager {
    pub fn new(config: TrinityConfig, store_root: impl Into<std::path::PathBuf>) -> Self {
        let index = VectorIndex::new(config.index.clone());
        let dedup = DedupEngine::new(config.dedup.clone());
        let predictor = ConsolidationPredictor::new(0x5EED);
        Self {
            config,
            entries: HashMap::new(),
            index,
            dedup,
            predictor,
            store: JsonFileStore::new(store_root),
            admission: Box::new(DefaultAdmissionPredicate::default()),
        }
    }

    pub fn with_admission_predicate(mut self, predicate: Box<dyn AdmissionPredicate>) -> Self {
        self.admission = predicate;
        self
    }

    pub fn predictor(&self) -> &ConsolidationPredictor {
        &self.predictor
    }

    pub fn config(&self) -> &TrinityConfig {
        &self.config
    }

    fn tier_entries(&self, tier: Tier) -> Vec<&BaseEntry> {
        self.entries.values().filter(|e| e.tier == tier).collect()
    }

    /// Look up a single entry by id, regardless of tier.
    pub fn get(&self, id: &EntryId) -> Option<&BaseEntry> {
        self.entries.get(id)
    }

    /// Resolve `entry`'s connection edges into their target entries,
    /// silently dropping any edge whose target no longer exists (spec §3
    /// invariant 7: "lookups treat target existence as a soft constraint").
    pub fn resolve_connections(&self, entry: &BaseEntry) -> Vec<&BaseEntry> {
        entry
            .enhancement
            .as_ref()
            .map(|e| e.connections.iter().filter_map(|edge| self.entries.get(&edge.target)).collect())
            .unwrap_or_default()
    }

    fn reindex(&mut self, id: &EntryId) {
        if let Some(entry) = self.entries.get(id) {
            self.index.insert(IndexRecord::from(entry));
        }
    }

    fn remove_from_index(&mut self, id: &EntryId) {
        self.index.delete(id);
    }

    /// Ingest one (metadata, embedding) observation (spec §4.4
    /// "Ingestion"). Returns the search context the caller should hand
    /// downstream, regardless of whether the observation itself was
    /// stored (spec §4.4 "Intelligent filtering").
    pub fn add_observation(&mut self, metadata: Metadata, embedding: Vec<f32>) -> TrinityResult<Vec<BaseEntry>> {
        if !self.admission.admit(&metadata) {
            debug!(object_type = %metadata.object_type, "observation rejected by admission predicate");
            return Ok(self.search(&embedding, self.config.performance.vector_search_topk, TierFilter::all()));
        }

        let candidate = BaseEntry::new(embedding.clone(), Tier::Working, metadata);

        let working: Vec<BaseEntry> = self.tier_entries(Tier::Working).into_iter().cloned().collect();
        let mut episodic: Vec<BaseEntry> = self.tier_entries(Tier::Episodic).into_iter().cloned().collect();
        episodic.sort_by(|a, b| b.created.cmp(&a.created));
        episodic.truncate(EPISODIC_DEDUP_WINDOW);

        let duplicate_id = self
            .dedup
            .find_duplicate(&candidate, &working)
            .or_else(|| self.dedup.find_duplicate(&candidate, &episodic))
            .map(|e| e.id.clone());

        if let Some(existing_id) = duplicate_id {
            if let Some(existing) = self.entries.get_mut(&existing_id) {
                self.dedup.merge(existing, &candidate);
                existing.record_access(Utc::now());
            }
            self.reindex(&existing_id);
        } else {
            let id = candidate.id.clone();
            self.entries.insert(id.clone(), candidate);
            self.reindex(&id);
            self.evict_working();
        }

        Ok(self.search(&embedding, self.config.performance.vector_search_topk, TierFilter::all()))
    }

    /// Top-K cosine search; bumps access accounting on every returned entry
    /// before returning (spec §4.4 "Search").
    pub fn search(&mut self, query: &[f32], k: usize, tier_filter: TierFilter) -> Vec<BaseEntry> {
        let hits = self.index.search(query, k, tier_filter);
        let now = Utc::now();
        let mut results = Vec::with_capacity(hits.len());
        for (id, _score) in hits {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.record_access(now);
                self.index.touch(&id, entry.access_count, entry.last_accessed);
                results.push(entry.clone());
            }
        }
        results
    }

    /// Enforce the Working-tier cardinality invariant by LRU-evicting the
    /// entry with the oldest `lastAccessed` (spec §3 invariant 4).
    pub fn evict_working(&mut self) {
        loop {
            let working = self.tier_entries(Tier::Working);
            if working.len() <= self.config.memory.max_working {
                break;
            }
            let victim = working
                .iter()
                .min_by_key(|e| e.last_accessed)
                .map(|e| e.id.clone());
            match victim {
                Some(id) => {
                    debug!(%id, "evicting from working tier");
                    self.entries.remove(&id);
                    self.remove_from_index(&id);
                }
                None => break,
            }
        }
    }

    /// Run one consolidation sweep: promote, cluster, and evict across
    /// tiers per spec §4.4 "Promotion" (this is the body also invoked on
    /// the `consolidation_interval` timer by the pipeline coordinator).
    pub fn consolidate(&mut self) -> ConsolidationReport {
        let started = Instant::now();
        let now = Utc::now();
        let mut report = ConsolidationReport::default();

        report.promoted_to_episodic += self.promote_working_to_episodic(now);
        let (promoted, clusters) = self.promote_episodic_to_semantic(now);
        report.promoted_to_semantic += promoted;
        report.semantic_clusters_formed += clusters;
        report.deleted_episodic += self.evict_stale_episodic(now);
        self.cap_semantic();

        report.duration = started.elapsed();
        info!(
            promoted_to_episodic = report.promoted_to_episodic,
            promoted_to_semantic = report.promoted_to_semantic,
            deleted_episodic = report.deleted_episodic,
            clusters = report.semantic_clusters_formed,
            "consolidation sweep complete"
        );
        report
    }

    fn promote_working_to_episodic(&mut self, now: DateTime<Utc>) -> usize {
        let candidates: Vec<EntryId> = self
            .tier_entries(Tier::Working)
            .into_iter()
            .filter(|e| {
                e.access_count >= self.config.memory.semantic_promotion_threshold
                    || self
                        .predictor
                        .should_consolidate(&extract_features(e, now), CONSOLIDATION_SCORE_THRESHOLD)
            })
            .map(|e| e.id.clone())
            .collect();

        for id in &candidates {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.tier = Tier::Episodic;
            }
            self.reindex(id);
        }
        candidates.len()
    }

    fn promote_episodic_to_semantic(&mut self, now: DateTime<Utc>) -> (usize, usize) {
        let eligible: Vec<BaseEntry> = self
            .tier_entries(Tier::Episodic)
            .into_iter()
            .filter(|e| {
                now.signed_duration_since(e.created) > ChronoDuration::days(7)
                    && self
                        .predictor
                        .should_consolidate(&extract_features(e, now), CONSOLIDATION_SCORE_THRESHOLD)
            })
            .cloned()
            .collect();

        if eligible.is_empty() {
            return (0, 0);
        }

        let clusters = self.dedup.cluster(&eligible);
        let mut promoted = 0;

        for cluster in &clusters {
            let Some(representative) = self.dedup.representative(&eligible, cluster) else {
                continue;
            };
            for &member_idx in &cluster.members {
                let id = &eligible[member_idx].id;
                self.entries.remove(id);
                self.remove_from_index(id);
            }
            let rep_id = representative.id.clone();
            self.entries.insert(rep_id.clone(), representative);
            self.reindex(&rep_id);
            promoted += cluster.members.len();
        }

        (promoted, clusters.len())
    }

    fn evict_stale_episodic(&mut self, now: DateTime<Utc>) -> usize {
        let window = ChronoDuration::seconds(self.config.memory.episodic_window_s);
        let stale: Vec<EntryId> = self
            .tier_entries(Tier::Episodic)
            .into_iter()
            .filter(|e| {
                now.signed_duration_since(e.created) > window
                    && !self
                        .predictor
                        .should_consolidate(&extract_features(e, now), CONSOLIDATION_SCORE_THRESHOLD)
            })
            .map(|e| e.id.clone())
            .collect();

        for id in &stale {
            self.entries.remove(id);
            self.remove_from_index(id);
        }
        stale.len()
    }

    /// Cap Semantic-tier cardinality by re-clustering at a progressively
    /// looser threshold until the cardinality target is met (spec §4.4
    /// "Cap Semantic").
    fn cap_semantic(&mut self) {
        let mut threshold = self.config.dedup.cluster_similarity_threshold;
        for _ in 0..SEMANTIC_CAP_MAX_PASSES {
            if self.tier_entries(Tier::Semantic).len() <= self.config.memory.max_semantic {
                return;
            }
            let semantic: Vec<BaseEntry> = self.tier_entries(Tier::Semantic).into_iter().cloned().collect();
            let clusters = trinity_dedup::cluster_entries(&semantic, threshold);
            let reduced = clusters.iter().any(|c| c.members.len() > 1);

            for cluster in &clusters {
                if cluster.members.len() < 2 {
                    continue;
                }
                let Some(representative) = trinity_dedup::representative(&semantic, cluster) else {
                    continue;
                };
                for &member_idx in &cluster.members {
                    let id = &semantic[member_idx].id;
                    self.entries.remove(id);
                    self.remove_from_index(id);
                }
                let rep_id = representative.id.clone();
                self.entries.insert(rep_id.clone(), representative);
                self.reindex(&rep_id);
            }

            if !reduced {
                threshold = (threshold - SEMANTIC_CAP_THRESHOLD_STEP).max(0.0);
            }
        }
    }

    pub fn clear(&mut self, tier: Option<Tier>) {
        match tier {
            Some(t) => {
                let ids: Vec<EntryId> = self.tier_entries(t).into_iter().map(|e| e.id.clone()).collect();
                for id in ids {
                    self.entries.remove(&id);
                    self.remove_from_index(&id);
                }
            }
            None => {
                self.entries.clear();
                self.index.clear();
            }
        }
    }

    /// Persist every tier and the predictor state to `self.store`'s root
    /// (spec §4.4 "Persistence"). Each write is retried up to 3 times with
    /// linear backoff on a transient failure (spec §7).
    pub fn save(&self) -> TrinityResult<()> {
        for tier in Tier::ALL {
            let items: Vec<BaseEntry> = self.tier_entries(tier).into_iter().cloned().collect();
            retry_with_backoff(RetryPolicy::default(), || self.store.save(tier, &items))?;
        }
        let predictor_path = self.store.root().join("predictor.json");
        retry_with_backoff(RetryPolicy::default(), || self.predictor.save(&predictor_path))?;
        Ok(())
    }

    /// Load every tier and the predictor state from `self.store`'s root,
    /// replaying entries into both the container and the index (spec §4.4
    /// "On load, replay entries into both container and index"). Each tier
    /// read is retried up to 3 times with linear backoff on a transient
    /// failure (spec §7); predictor state falls back to a fresh model on
    /// any load failure and needs no retry of its own.
    pub fn load(&mut self) -> TrinityResult<()> {
        self.entries.clear();
        self.index.clear();

        for tier in Tier::ALL {
            let items: Vec<BaseEntry> = retry_with_backoff(RetryPolicy::default(), || self.store.load(tier))?;
            for entry in items {
                let id = entry.id.clone();
                self.entries.insert(id.clone(), entry);
                self.reindex(&id);
            }
        }

        self.predictor = ConsolidationPredictor::load_or_default(&self.store.root().join("predictor.json"), 0x5EED);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (tempfile::TempDir, MemoryManager) {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = MemoryManager::new(TrinityConfig::default(), dir.path());
        (dir, manager)
    }

    fn meta(object_type: &str, tags: &[&str]) -> Metadata {
        let mut m = Metadata::new(object_type, "a chair");
        m.confidence = 1.0.into();
        m.tags = tags.iter().map(|t| t.to_string()).collect();
        m
    }

    #[test]
    fn dedup_merges_near_duplicate_chair_sighting() {
        let (_dir, mut manager) = manager();
        let a = vec![1.0f32, 0.0];
        let b = vec![0.995f32, 0.0998]; // cosine ~0.995

        manager
            .add_observation(meta("chair", &["furniture", "wooden"]), a.clone())
            .expect("first observation");
        manager
            .add_observation(meta("chair", &["furniture", "comfortable"]), b)
            .expect("second observation");

        let working = manager.tier_entries(Tier::Working);
        assert_eq!(working.len(), 1);
        let merged = working[0];
        assert!(merged.metadata.tags.contains("wooden"));
        assert!(merged.metadata.tags.contains("comfortable"));
        assert_eq!(merged.access_count, 1);
    }

    #[test]
    fn lru_eviction_keeps_working_at_cap() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = TrinityConfig::default();
        config.memory.max_working = 3;
        let mut manager = MemoryManager::new(config, dir.path());

        for i in 0..4 {
            manager
                .add_observation(meta("chair", &[]), vec![i as f32, (i as f32) + 1.0])
                .expect("observation");
        }

        assert_eq!(manager.tier_entries(Tier::Working).len(), 3);
    }

    #[test]
    fn rejected_observation_is_not_stored_but_returns_context() {
        let (_dir, mut manager) = manager();
        let mut low_confidence = meta("chair", &[]);
        low_confidence.confidence = 0.1.into();
        manager.add_observation(low_confidence, vec![1.0, 0.0]).expect("observation");
        assert!(manager.entries.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut manager = MemoryManager::new(TrinityConfig::default(), dir.path());
        manager.add_observation(meta("chair", &["wooden"]), vec![1.0, 0.0]).expect("observation");
        manager.save().expect("save");

        let mut reloaded = MemoryManager::new(TrinityConfig::default(), dir.path());
        reloaded.load().expect("load");
        assert_eq!(reloaded.entries.len(), 1);
    }

    #[test]
    fn search_bumps_access_accounting() {
        let (_dir, mut manager) = manager();
        manager.add_observation(meta("chair", &[]), vec![1.0, 0.0]).expect("observation");
        let results = manager.search(&[1.0, 0.0], 5, TierFilter::all());
        assert_eq!(results.len(), 1);
        assert!(results[0].access_count >= 1);
    }

    #[test]
    fn resolve_connections_drops_edges_to_missing_targets() {
        use trinity_core::memory::{ConnectionEdge, ConnectionType};

        let (_dir, mut manager) = manager();
        manager.add_observation(meta("chair", &[]), vec![1.0, 0.0]).expect("observation");
        let id = manager.entries.keys().next().cloned().expect("one entry");
        let entry = manager.entries.get_mut(&id).unwrap();
        entry.enhancement_or_default().connections.push(ConnectionEdge::new(
            EntryId::from("does-not-exist"),
            ConnectionType::SpatialProximity,
            0.5,
        ));

        let entry = manager.get(&id).unwrap().clone();
        assert!(manager.resolve_connections(&entry).is_empty());
    }
}
