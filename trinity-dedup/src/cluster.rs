use trinity_core::memory::{renormalized_mean, BaseEntry, Importance, Metadata, Tier};

use crate::fusion::fused_similarity;

/// A group of entries judged similar enough by greedy single-linkage
/// clustering (spec §4.2 "Clustering for consolidation").
#[derive(Debug, Clone)]
pub struct Cluster {
    pub members: Vec<usize>,
}

/// Greedily cluster `entries` by single-linkage: an entry joins the first
/// existing cluster containing any member whose fused similarity to it
/// meets `tau`; otherwise it starts a new cluster. Deterministic in input
/// order, single pass, no iterative refinement (spec §4.2, mirrors the
/// index's cold-clustering stance in §4.1).
pub fn cluster_entries(entries: &[BaseEntry], tau: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    'entries: for (i, entry) in entries.iter().enumerate() {
        for cluster in clusters.iter_mut() {
            let links = cluster
                .members
                .iter()
                .any(|&m| fused_similarity(&entries[m], entry) >= tau);
            if links {
                cluster.members.push(i);
                continue 'entries;
            }
        }
        clusters.push(Cluster { members: vec![i] });
    }

    clusters
}

/// Synthesize a single "representative" entry for a cluster: renormalized
/// mean embedding, union of tags, highest confidence, longest description,
/// earliest timestamp, and max importance among members (spec §4.2
/// "Representative").
pub fn representative(entries: &[BaseEntry], cluster: &Cluster) -> Option<BaseEntry> {
    let members: Vec<&BaseEntry> = cluster.members.iter().map(|&i| &entries[i]).collect();
    let first = *members.first()?;

    let embeddings: Vec<&[f32]> = members.iter().map(|e| e.embedding.as_slice()).collect();
    let embedding = renormalized_mean(&embeddings);

    let mut metadata = Metadata::new(first.metadata.object_type.clone(), first.metadata.description.clone());
    let mut best_confidence = 0.0f64;
    let mut earliest_timestamp = first.metadata.timestamp;
    let mut earliest_created = first.created;
    let mut best_importance = Importance::new(0.0);
    for member in &members {
        metadata.tags.extend(member.metadata.tags.iter().cloned());
        if member.metadata.confidence.value() >= best_confidence {
            best_confidence = member.metadata.confidence.value();
        }
        if member.metadata.description.len() > metadata.description.len() {
            metadata.description = member.metadata.description.clone();
        }
        if member.metadata.timestamp < earliest_timestamp {
            earliest_timestamp = member.metadata.timestamp;
        }
        if member.created < earliest_created {
            earliest_created = member.created;
        }
        let member_importance = member
            .enhancement
            .as_ref()
            .map(|e| e.importance)
            .unwrap_or_default();
        best_importance = best_importance.max(member_importance);
    }
    metadata.confidence = best_confidence.into();
    metadata.location = first.metadata.location;
    metadata.timestamp = earliest_timestamp;

    let mut representative = BaseEntry::new(embedding, Tier::Semantic, metadata);
    representative.created = earliest_created;
    representative.access_count = members.iter().map(|e| e.access_count).sum();
    representative.enhancement_or_default().importance = best_importance;
    Some(representative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(object_type: &str, embedding: Vec<f32>) -> BaseEntry {
        BaseEntry::new(embedding, Tier::Episodic, Metadata::new(object_type, "d"))
    }

    #[test]
    fn near_identical_entries_form_one_cluster() {
        let entries = vec![
            entry("chair", vec![1.0, 0.0]),
            entry("chair", vec![0.999, 0.0447]),
            entry("chair", vec![0.0, 1.0]),
        ];
        let clusters = cluster_entries(&entries, 0.9);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn representative_unions_tags_and_picks_longest_description() {
        let mut a = entry("chair", vec![1.0, 0.0]);
        a.metadata.tags.insert("wooden".into());
        a.metadata.description = "chair".into();
        let mut b = entry("chair", vec![1.0, 0.0]);
        b.metadata.tags.insert("red".into());
        b.metadata.description = "a red wooden chair".into();

        let entries = vec![a, b];
        let clusters = cluster_entries(&entries, 0.5);
        assert_eq!(clusters.len(), 1);

        let rep = representative(&entries, &clusters[0]).expect("representative");
        assert!(rep.metadata.tags.contains("wooden"));
        assert!(rep.metadata.tags.contains("red"));
        assert_eq!(rep.metadata.description, "a red wooden chair");
        assert_eq!(rep.tier, Tier::Semantic);
    }

    #[test]
    fn representative_takes_earliest_timestamp_and_max_importance() {
        use chrono::Duration;

        let mut a = entry("chair", vec![1.0, 0.0]);
        a.created = a.created - Duration::hours(2);
        a.metadata.timestamp = a.created;
        a.enhancement_or_default().importance = 0.3.into();

        let mut b = entry("chair", vec![1.0, 0.0]);
        b.metadata.timestamp = b.created;
        b.enhancement_or_default().importance = 0.9.into();

        let entries = vec![a.clone(), b.clone()];
        let clusters = cluster_entries(&entries, 0.5);
        let rep = representative(&entries, &clusters[0]).expect("representative");

        assert_eq!(rep.metadata.timestamp, a.metadata.timestamp);
        assert_eq!(rep.created, a.created);
        assert_eq!(rep.enhancement.unwrap().importance.value(), 0.9);
    }
}
