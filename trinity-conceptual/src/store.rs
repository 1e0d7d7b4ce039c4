use std::collections::HashMap;

use chrono::{Duration as ChronoDuration, Utc};
use tracing::debug;
use trinity_core::config::IndexConfig;
use trinity_core::memory::{ConceptualEntry, ConceptualRecord, Conversation, EntryId, IndexRecord, TierFilter};
use trinity_index::VectorIndex;

use crate::dedup::{is_conceptual_duplicate, CONCEPTUAL_DEDUP_THRESHOLD};

const CONVERSATION_MERGE_THRESHOLD: f64 = 0.92;
const CONVERSATION_MERGE_WINDOW_HOURS: i64 = 24;

/// Thin typed layer over a shared vector space for non-physical memory
/// (spec §4.5). Each record carries its own derived embedding and shares
/// tier/access-count bookkeeping with physical entries without sharing
/// their `Metadata` shape.
pub struct ConceptualStore {
    entries: HashMap<EntryId, ConceptualEntry>,
    index: VectorIndex,
}

impl ConceptualStore {
    pub fn new(index_config: IndexConfig) -> Self {
        Self {
            entries: HashMap::new(),
            index: VectorIndex::new(index_config),
        }
    }

    fn reindex(&mut self, id: &EntryId) {
        if let Some(entry) = self.entries.get(id) {
            self.index.insert(IndexRecord::from(entry));
        }
    }

    /// Insert `record`, applying conversation occurrence-merging (spec
    /// §4.5) or the relaxed general dedup rule, whichever applies. Returns
    /// the id of the stored (or merged-into) entry.
    pub fn add(&mut self, record: ConceptualRecord) -> EntryId {
        if let ConceptualRecord::Conversation(incoming) = &record {
            if let Some(existing_id) = self.find_conversation_to_merge(incoming) {
                self.merge_conversation(&existing_id, incoming.clone());
                return existing_id;
            }
        }

        if let Some(existing_id) = self.find_general_duplicate(&record) {
            if let Some(entry) = self.entries.get_mut(&existing_id) {
                entry.record_access(Utc::now());
            }
            self.reindex(&existing_id);
            return existing_id;
        }

        let entry = ConceptualEntry::new(record);
        let id = entry.id.clone();
        self.entries.insert(id.clone(), entry);
        self.reindex(&id);
        id
    }

    fn find_general_duplicate(&self, candidate: &ConceptualRecord) -> Option<EntryId> {
        self.entries
            .values()
            .find(|existing| is_conceptual_duplicate(&existing.record, candidate, CONCEPTUAL_DEDUP_THRESHOLD))
            .map(|e| e.id.clone())
    }

    fn find_conversation_to_merge(&self, incoming: &Conversation) -> Option<EntryId> {
        let now = Utc::now();
        let window = ChronoDuration::hours(CONVERSATION_MERGE_WINDOW_HOURS);

        self.entries
            .values()
            .filter(|e| matches!(e.record, ConceptualRecord::Conversation(_)))
            .filter(|e| now.signed_duration_since(e.last_accessed) <= window)
            .find(|e| {
                let ConceptualRecord::Conversation(existing) = &e.record else {
                    return false;
                };
                trinity_core::memory::cosine_similarity(&existing.embedding, &incoming.embedding)
                    >= CONVERSATION_MERGE_THRESHOLD
            })
            .map(|e| e.id.clone())
    }

    /// Occurrence-merge `incoming` into the conversation stored at `id`:
    /// increment `occurrences`, union `keyInsights`, and record the merge
    /// chain (spec §4.5 "occurrence merging").
    fn merge_conversation(&mut self, id: &EntryId, incoming: Conversation) {
        if let Some(entry) = self.entries.get_mut(id) {
            if let ConceptualRecord::Conversation(existing) = &mut entry.record {
                existing.occurrences += 1;
                for insight in incoming.key_insights {
                    if !existing.key_insights.contains(&insight) {
                        existing.key_insights.push(insight);
                    }
                }
                existing.merged_from.push(id.clone());
                for topic in incoming.key_topics {
                    if !existing.key_topics.contains(&topic) {
                        existing.key_topics.push(topic);
                    }
                }
            }
            entry.record_access(Utc::now());
            debug!(%id, "merged conversation occurrence");
        }
    }

    pub fn get(&self, id: &EntryId) -> Option<&ConceptualEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-K cosine search over the conceptual vector space, bumping
    /// access accounting on every returned entry.
    pub fn search(&mut self, query: &[f32], k: usize, tier_filter: TierFilter) -> Vec<ConceptualEntry> {
        let hits = self.index.search(query, k, tier_filter);
        let now = Utc::now();
        let mut results = Vec::with_capacity(hits.len());
        for (id, _score) in hits {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.record_access(now);
                self.index.touch(&id, entry.access_count, entry.last_accessed);
                results.push(entry.clone());
            }
        }
        results
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trinity_core::memory::{Idea, IdeaStatus, Message};

    fn idea(embedding: Vec<f32>) -> ConceptualRecord {
        ConceptualRecord::Idea(Idea {
            title: "faster search".into(),
            description: "use an index".into(),
            status: IdeaStatus::Draft,
            versions: vec![],
            related_ideas: vec![],
            inspirations: vec![],
            spawned_from: None,
            embedding,
            tags: Default::default(),
        })
    }

    fn conversation(embedding: Vec<f32>, insights: &[&str]) -> Conversation {
        Conversation {
            participants: vec!["alice".into()],
            messages: vec![Message {
                speaker: "alice".into(),
                text: "hello".into(),
                timestamp: Utc::now(),
            }],
            summary: "greeting".into(),
            key_topics: vec!["greeting".into()],
            key_insights: insights.iter().map(|s| s.to_string()).collect(),
            related_conversations: vec![],
            merged_from: vec![],
            occurrences: 1,
            duration_s: 30.0,
            embedding,
        }
    }

    #[test]
    fn duplicate_idea_is_merged_not_duplicated() {
        let mut store = ConceptualStore::new(IndexConfig::default());
        store.add(idea(vec![1.0, 0.0]));
        store.add(idea(vec![0.99, 0.1411]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn conversation_occurrence_merges_within_window() {
        let mut store = ConceptualStore::new(IndexConfig::default());
        let id = store.add(ConceptualRecord::Conversation(conversation(vec![1.0, 0.0], &["insight1"])));
        let merged_id = store.add(ConceptualRecord::Conversation(conversation(
            vec![0.999, 0.0447],
            &["insight2"],
        )));

        assert_eq!(id, merged_id);
        assert_eq!(store.len(), 1);
        let entry = store.get(&id).expect("entry");
        if let ConceptualRecord::Conversation(c) = &entry.record {
            assert_eq!(c.occurrences, 2);
            assert!(c.key_insights.contains(&"insight1".to_string()));
            assert!(c.key_insights.contains(&"insight2".to_string()));
        } else {
            panic!("expected conversation");
        }
    }

    #[test]
    fn dissimilar_conversations_are_not_merged() {
        let mut store = ConceptualStore::new(IndexConfig::default());
        store.add(ConceptualRecord::Conversation(conversation(vec![1.0, 0.0], &[])));
        store.add(ConceptualRecord::Conversation(conversation(vec![0.0, 1.0], &[])));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn search_returns_stored_record() {
        let mut store = ConceptualStore::new(IndexConfig::default());
        store.add(idea(vec![1.0, 0.0]));
        let results = store.search(&[1.0, 0.0], 5, TierFilter::all());
        assert_eq!(results.len(), 1);
    }
}
