use trinity_core::config::DedupConfig;
use trinity_core::memory::BaseEntry;

use crate::cluster::{cluster_entries, representative, Cluster};
use crate::fusion::{fused_similarity, is_duplicate};
use crate::merge::merge_into;
use crate::threshold::ThresholdTable;

/// Type-adaptive deduplication engine (spec §4.2). Stateless over entry
/// storage — callers pass in the candidate set to check against (the
/// memory manager narrows this to Working plus the most recent Episodic
/// entries per spec §6).
#[derive(Debug, Clone)]
pub struct DedupEngine {
    config: DedupConfig,
    thresholds: ThresholdTable,
}

impl DedupEngine {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            thresholds: ThresholdTable::new(),
        }
    }

    /// Override the base threshold for a specific object type (spec §4.2
    /// "update_contextual_threshold").
    pub fn update_contextual_threshold(&mut self, object_type: &str, tau: f64) {
        self.thresholds.set_override(object_type, tau);
    }

    /// The confidence-adjusted threshold this engine would use for a
    /// candidate of the given object type and confidence.
    pub fn adjust_threshold(&self, object_type: &str, confidence: f64) -> f64 {
        self.thresholds.adjust_threshold(object_type, confidence)
    }

    /// Find the best-scoring duplicate of `candidate` among `against`, if
    /// any qualifies. Among multiple qualifying matches, the one with the
    /// highest fused similarity wins — an engineering choice for the
    /// otherwise-unspecified case of several simultaneously qualifying
    /// candidates.
    pub fn find_duplicate<'a>(&self, candidate: &BaseEntry, against: &'a [BaseEntry]) -> Option<&'a BaseEntry> {
        let tau = self.adjust_threshold(&candidate.metadata.object_type, candidate.metadata.confidence.value());

        against
            .iter()
            .filter(|existing| is_duplicate(existing, candidate, tau, self.config.location_tolerance_m))
            .max_by(|a, b| {
                fused_similarity(a, candidate)
                    .partial_cmp(&fused_similarity(b, candidate))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Merge `incoming` into `existing` per the fixed merge policy.
    pub fn merge(&self, existing: &mut BaseEntry, incoming: &BaseEntry) {
        merge_into(existing, incoming);
    }

    /// Greedy single-linkage clustering over `entries` using this engine's
    /// configured consolidation threshold.
    pub fn cluster(&self, entries: &[BaseEntry]) -> Vec<Cluster> {
        cluster_entries(entries, self.config.cluster_similarity_threshold)
    }

    /// Synthesize the representative entry for a cluster produced by
    /// [`DedupEngine::cluster`].
    pub fn representative(&self, entries: &[BaseEntry], cluster: &Cluster) -> Option<BaseEntry> {
        representative(entries, cluster)
    }
}
