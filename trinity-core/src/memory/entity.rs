use serde::{Deserialize, Serialize};

/// A named entity detected within an observation (spec §3 enhanced entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub entity_type: String,
    pub confidence: f64,
}
