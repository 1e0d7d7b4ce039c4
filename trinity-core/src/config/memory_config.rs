use serde::{Deserialize, Serialize};

use super::defaults;

/// Memory-tier subsystem configuration (spec §6 "memory").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemoryConfig {
    /// Working-tier cardinality cap; LRU-evicted on overflow.
    pub max_working: usize,
    /// Episodic retention window, in seconds since entry timestamp.
    pub episodic_window_s: i64,
    /// Base dedup similarity threshold (overridable per object type).
    pub similarity_threshold: f64,
    /// Working-tier access count at or above which an entry is eligible for promotion.
    pub semantic_promotion_threshold: u64,
    /// Semantic-tier cardinality cap before re-clustering kicks in.
    pub max_semantic: usize,
    /// Whether `consolidate()` runs automatically on the configured interval.
    pub auto_consolidation: bool,
    /// Seconds between automatic consolidation sweeps.
    pub consolidation_interval_s: i64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_working: defaults::DEFAULT_MAX_WORKING,
            episodic_window_s: defaults::DEFAULT_EPISODIC_WINDOW_S,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            semantic_promotion_threshold: defaults::DEFAULT_SEMANTIC_PROMOTION_THRESHOLD,
            max_semantic: defaults::DEFAULT_MAX_SEMANTIC,
            auto_consolidation: defaults::DEFAULT_AUTO_CONSOLIDATION,
            consolidation_interval_s: defaults::DEFAULT_CONSOLIDATION_INTERVAL_S,
        }
    }
}
