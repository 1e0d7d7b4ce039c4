//! # trinity-dedup
//!
//! Type-adaptive deduplication (spec §4.2): a base threshold table by
//! object type, confidence-adjusted strictness, fused similarity scoring
//! over embedding/tags/categories, a fixed merge policy, and greedy
//! single-linkage clustering for consolidation.

mod cluster;
mod engine;
mod fusion;
mod merge;
mod threshold;

pub use cluster::{cluster_entries, representative, Cluster};
pub use engine::DedupEngine;
pub use fusion::{fused_similarity, is_duplicate};
pub use merge::merge_into;
pub use threshold::ThresholdTable;
