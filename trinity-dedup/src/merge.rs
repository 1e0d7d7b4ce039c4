use trinity_core::memory::{renormalized_mean, union_connections, BaseEntry};

/// Merge `incoming` into `existing` in place, following the fixed merge
/// policy (spec §4.2 "Merge policy"):
/// - id: the older of the two is kept (existing always predates or ties
///   the incoming observation, so `existing.id` survives unchanged).
/// - embedding: renormalized mean of both embeddings.
/// - tags: union.
/// - confidence: max of the two.
/// - description: the longer of the two; ties favor the existing text.
/// - access_count: summed.
/// - spatial: taken from whichever side has higher confidence.
/// - connections: union, keeping the stronger edge per target.
/// - importance (when both sides carry an enhancement): max of the two.
pub fn merge_into(existing: &mut BaseEntry, incoming: &BaseEntry) {
    existing.embedding = renormalized_mean(&[&existing.embedding, &incoming.embedding]);

    existing
        .metadata
        .tags
        .extend(incoming.metadata.tags.iter().cloned());

    if incoming.metadata.confidence > existing.metadata.confidence {
        existing.metadata.confidence = incoming.metadata.confidence;
    }

    if incoming.metadata.description.len() > existing.metadata.description.len() {
        existing.metadata.description = incoming.metadata.description.clone();
    }

    existing.access_count = existing.access_count.saturating_add(incoming.access_count);

    if incoming.last_accessed > existing.last_accessed {
        existing.last_accessed = incoming.last_accessed;
    }

    let incoming_confidence_wins = match &incoming.metadata.spatial {
        Some(s) => existing
            .metadata
            .spatial
            .as_ref()
            .map(|e| s.confidence > e.confidence)
            .unwrap_or(true),
        None => false,
    };
    if incoming_confidence_wins {
        existing.metadata.spatial = incoming.metadata.spatial.clone();
    }

    if let (Some(existing_enh), Some(incoming_enh)) =
        (existing.enhancement.as_mut(), incoming.enhancement.as_ref())
    {
        existing_enh.connections =
            union_connections(&existing_enh.connections, &incoming_enh.connections);
        for category in &incoming_enh.categories {
            if !existing_enh.categories.contains(category) {
                existing_enh.categories.push(category.clone());
            }
        }
        existing_enh.consolidation_count = existing_enh
            .consolidation_count
            .saturating_add(incoming_enh.consolidation_count.max(1));
        existing_enh.importance = existing_enh.importance.max(incoming_enh.importance);
    } else if incoming.enhancement.is_some() {
        existing.enhancement = incoming.enhancement.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trinity_core::memory::{Metadata, Tier};

    fn entry(tags: &[&str], confidence: f64, description: &str, access_count: u64) -> BaseEntry {
        let mut meta = Metadata::new("chair", description);
        meta.tags = tags.iter().map(|t| t.to_string()).collect();
        meta.confidence = confidence.into();
        let mut e = BaseEntry::new(vec![1.0, 0.0], Tier::Working, meta);
        e.access_count = access_count;
        e
    }

    #[test]
    fn tags_union_and_confidence_max() {
        let mut existing = entry(&["wooden"], 0.6, "a chair", 2);
        let incoming = entry(&["red"], 0.9, "a red chair", 3);
        merge_into(&mut existing, &incoming);
        assert!(existing.metadata.tags.contains("wooden"));
        assert!(existing.metadata.tags.contains("red"));
        assert_eq!(existing.metadata.confidence.value(), 0.9);
    }

    #[test]
    fn longer_description_wins_and_access_counts_sum() {
        let mut existing = entry(&[], 0.5, "chair", 2);
        let incoming = entry(&[], 0.5, "a red wooden chair", 3);
        merge_into(&mut existing, &incoming);
        assert_eq!(existing.metadata.description, "a red wooden chair");
        assert_eq!(existing.access_count, 5);
    }

    #[test]
    fn tie_in_description_length_favors_existing() {
        let mut existing = entry(&[], 0.5, "abc", 0);
        let incoming = entry(&[], 0.5, "xyz", 0);
        merge_into(&mut existing, &incoming);
        assert_eq!(existing.metadata.description, "abc");
    }

    #[test]
    fn importance_is_max_of_both_enhancements() {
        let mut existing = entry(&[], 0.5, "a", 0);
        existing.enhancement_or_default().importance = 0.2.into();
        let mut incoming = entry(&[], 0.5, "b", 0);
        incoming.enhancement_or_default().importance = 0.8.into();
        merge_into(&mut existing, &incoming);
        assert_eq!(existing.enhancement.unwrap().importance.value(), 0.8);
    }

    #[test]
    fn embedding_is_renormalized_mean() {
        let mut existing = entry(&[], 0.5, "a", 0);
        existing.embedding = vec![1.0, 0.0];
        let mut incoming = entry(&[], 0.5, "b", 0);
        incoming.embedding = vec![0.0, 1.0];
        merge_into(&mut existing, &incoming);
        let norm: f32 = existing.embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }
}
