use serde::{Deserialize, Serialize};

use super::defaults;

/// Throughput and caching knobs (spec §6 "performance").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Target seconds between pipeline iterations.
    pub processing_interval_s: f64,
    /// Max embeddings generated concurrently.
    pub max_concurrent_embeddings: usize,
    /// Batch size used by batched accounting updates.
    pub batch_size: usize,
    /// Default top-K for vector index searches.
    pub vector_search_topk: usize,
    /// Max entries retained in the embedding result cache.
    pub embedding_cache_size: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            processing_interval_s: defaults::DEFAULT_PROCESSING_INTERVAL_S,
            max_concurrent_embeddings: defaults::DEFAULT_MAX_CONCURRENT_EMBEDDINGS,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            vector_search_topk: defaults::DEFAULT_VECTOR_SEARCH_TOPK,
            embedding_cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
