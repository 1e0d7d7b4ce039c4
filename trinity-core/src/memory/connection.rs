use serde::{Deserialize, Serialize};

use super::entry_id::EntryId;

/// Typed edge kind for connections between entries (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionType {
    SpatialProximity,
    TemporalSequence,
    SemanticSimilarity,
    CausalRelation,
    PartOfWhole,
    Conversational,
}

/// A directional edge from one entry to another (spec §3, design note §9:
/// "Represent the memory graph as entries keyed by id with edges carrying
/// target ids only; avoid owning pointers").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionEdge {
    pub target: EntryId,
    pub edge_type: ConnectionType,
    pub strength: f64,
}

impl ConnectionEdge {
    pub fn new(target: EntryId, edge_type: ConnectionType, strength: f64) -> Self {
        Self {
            target,
            edge_type,
            strength: strength.clamp(0.0, 1.0),
        }
    }
}

/// Union two connection lists by target id, keeping the stronger edge per
/// target (spec §4.2 merge policy: "Connection lists are unioned by target
/// id keeping the stronger edge").
pub fn union_connections(a: &[ConnectionEdge], b: &[ConnectionEdge]) -> Vec<ConnectionEdge> {
    let mut by_target: std::collections::HashMap<EntryId, ConnectionEdge> =
        std::collections::HashMap::new();
    for edge in a.iter().chain(b.iter()) {
        by_target
            .entry(edge.target.clone())
            .and_modify(|existing| {
                if edge.strength > existing.strength {
                    *existing = edge.clone();
                }
            })
            .or_insert_with(|| edge.clone());
    }
    by_target.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_keeps_stronger_edge() {
        let target = EntryId::from("e1");
        let a = vec![ConnectionEdge::new(target.clone(), ConnectionType::SemanticSimilarity, 0.4)];
        let b = vec![ConnectionEdge::new(target.clone(), ConnectionType::SemanticSimilarity, 0.9)];
        let merged = union_connections(&a, &b);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].strength, 0.9);
    }
}
