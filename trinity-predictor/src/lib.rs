//! # trinity-predictor
//!
//! Online logistic-regression consolidation predictor (spec §4.3): scores
//! whether an entry is ready to move up a memory tier, trained by a single
//! SGD step per labeled observation.

mod features;
mod model;

pub use features::{extract_features, FEATURE_COUNT};
pub use model::ConsolidationPredictor;
