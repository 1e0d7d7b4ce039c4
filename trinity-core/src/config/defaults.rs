//! Named default constants for `TrinityConfig`, per spec §6.

// --- memory ---
pub const DEFAULT_MAX_WORKING: usize = 100;
pub const DEFAULT_EPISODIC_WINDOW_S: i64 = 2_592_000; // 30 days
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.95;
pub const DEFAULT_SEMANTIC_PROMOTION_THRESHOLD: u64 = 10;
pub const DEFAULT_MAX_SEMANTIC: usize = 50_000;
pub const DEFAULT_AUTO_CONSOLIDATION: bool = true;
pub const DEFAULT_CONSOLIDATION_INTERVAL_S: i64 = 3600;

// --- performance ---
pub const DEFAULT_PROCESSING_INTERVAL_S: f64 = 1.0;
pub const DEFAULT_MAX_CONCURRENT_EMBEDDINGS: usize = 4;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_VECTOR_SEARCH_TOPK: usize = 10;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: usize = 1000;

// --- agents ---
pub const DEFAULT_PERCEPTION_MIN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_NAV_CRITICAL_DISTANCE_M: f64 = 0.5;
pub const DEFAULT_NAV_WARNING_DISTANCE_M: f64 = 2.0;
pub const DEFAULT_NAV_SAFE_DISTANCE_M: f64 = 1.0;
pub const DEFAULT_COMM_VERBOSITY: u8 = 1;
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

// --- index ---
pub const DEFAULT_BRUTE_THRESHOLD: usize = 1000;
pub const DEFAULT_NPROBE: usize = 5;
pub const DEFAULT_MAX_IVF_CLUSTERS: usize = 100;

// --- dedup ---
pub const DEFAULT_LOCATION_TOLERANCE_M: f64 = 25.0;
pub const DEFAULT_CLUSTER_SIMILARITY_THRESHOLD: f64 = 0.90;

// --- pipeline ---
pub const DEFAULT_PENDING_MAX: usize = 10;
