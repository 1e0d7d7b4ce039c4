use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index tunables (spec §4.1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    /// Below this live cardinality, use exhaustive brute-force scan.
    pub brute_threshold: usize,
    /// IVF clusters probed per query.
    pub nprobe: usize,
    /// Upper bound on IVF cluster count (actual is `min(max_ivf_clusters, n/100)`).
    pub max_ivf_clusters: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            brute_threshold: defaults::DEFAULT_BRUTE_THRESHOLD,
            nprobe: defaults::DEFAULT_NPROBE,
            max_ivf_clusters: defaults::DEFAULT_MAX_IVF_CLUSTERS,
        }
    }
}

/// Dedup engine tunables (spec §4.2).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DedupConfig {
    /// Max geodesic distance, in meters, for two located entries to be
    /// considered the same place (relaxable for scene/place object types).
    pub location_tolerance_m: f64,
    /// Fused-similarity threshold used by greedy single-linkage
    /// consolidation clustering (distinct from, and looser than, the
    /// per-object-type dedup threshold table).
    pub cluster_similarity_threshold: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            location_tolerance_m: defaults::DEFAULT_LOCATION_TOLERANCE_M,
            cluster_similarity_threshold: defaults::DEFAULT_CLUSTER_SIMILARITY_THRESHOLD,
        }
    }
}

/// Pipeline coordinator tunables (spec §4.6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum depth of the `pending` backpressure queue.
    pub pending_max: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pending_max: defaults::DEFAULT_PENDING_MAX,
        }
    }
}
