use trinity_core::memory::{cosine_similarity, ConceptualRecord};

/// The relaxed dedup threshold for conceptual records (spec §4.5: "dedup
/// rules are relaxed (threshold τ=0.88)").
pub const CONCEPTUAL_DEDUP_THRESHOLD: f64 = 0.88;

/// Whether `candidate` duplicates `existing`. Conceptual records carry no
/// `Metadata` (tags/location/object_type) the way physical entries do, so
/// this is a narrower rule than `trinity-dedup`'s fused similarity: match
/// on variant tag (spec: "object_type derived from variant tag") plus
/// cosine similarity at or above `tau`.
pub fn is_conceptual_duplicate(existing: &ConceptualRecord, candidate: &ConceptualRecord, tau: f64) -> bool {
    if existing.variant_tag() != candidate.variant_tag() {
        return false;
    }
    let (Some(a), Some(b)) = (existing.embedding(), candidate.embedding()) else {
        return false;
    };
    cosine_similarity(a, b) >= tau
}

#[cfg(test)]
mod tests {
    use super::*;
    use trinity_core::memory::{Idea, IdeaStatus};

    fn idea(embedding: Vec<f32>) -> ConceptualRecord {
        ConceptualRecord::Idea(Idea {
            title: "t".into(),
            description: "d".into(),
            status: IdeaStatus::Draft,
            versions: vec![],
            related_ideas: vec![],
            inspirations: vec![],
            spawned_from: None,
            embedding,
            tags: Default::default(),
        })
    }

    #[test]
    fn matching_variant_and_high_similarity_is_duplicate() {
        let a = idea(vec![1.0, 0.0]);
        let b = idea(vec![0.99, 0.1411]);
        assert!(is_conceptual_duplicate(&a, &b, CONCEPTUAL_DEDUP_THRESHOLD));
    }

    #[test]
    fn dissimilar_embeddings_are_not_duplicates() {
        let a = idea(vec![1.0, 0.0]);
        let b = idea(vec![0.0, 1.0]);
        assert!(!is_conceptual_duplicate(&a, &b, CONCEPTUAL_DEDUP_THRESHOLD));
    }
}
