use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::memory::connection::ConnectionEdge;
use crate::memory::entry_id::EntryId;
use crate::memory::importance::Importance;

/// Category of a `Thought` record (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThoughtCategory {
    Reminder,
    Observation,
    Intention,
    Reflection,
    Question,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub content: String,
    pub category: ThoughtCategory,
    pub importance: Importance,
    pub emotional_tone: Option<String>,
    pub linked_location: Option<String>,
    pub linked_objects: Vec<EntryId>,
    pub linked_scene: Option<EntryId>,
    pub embedding: Vec<f32>,
}

/// A single utterance within a `Conversation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub participants: Vec<String>,
    pub messages: Vec<Message>,
    pub summary: String,
    pub key_topics: Vec<String>,
    pub key_insights: Vec<String>,
    pub related_conversations: Vec<EntryId>,
    pub merged_from: Vec<EntryId>,
    pub occurrences: u32,
    pub duration_s: f64,
    pub embedding: Vec<f32>,
}

/// Lifecycle status of an `Idea` (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdeaStatus {
    Draft,
    Refined,
    Implemented,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaVersion {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    pub description: String,
    pub status: IdeaStatus,
    pub versions: Vec<IdeaVersion>,
    pub related_ideas: Vec<EntryId>,
    pub inspirations: Vec<String>,
    pub spawned_from: Option<EntryId>,
    pub embedding: Vec<f32>,
    pub tags: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
    pub is_reminder: bool,
    pub reminder_date: Option<DateTime<Utc>>,
    pub tags: HashSet<String>,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub title: String,
    pub scheduled_date: DateTime<Utc>,
    pub participants: Option<Vec<String>>,
    /// Seconds before `scheduled_date` at which to remind.
    pub reminder_offsets_s: Vec<i64>,
    pub is_completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hybrid {
    pub physical_refs: Vec<EntryId>,
    pub conceptual_refs: Vec<EntryId>,
    pub synthesized_meaning: String,
    pub connections: Vec<ConnectionEdge>,
}

/// Tagged variant over every conceptual record kind (spec §3; design note
/// §9: "A single `kind` discriminator plus per-variant payload suffices" —
/// avoids a shared base class with virtual dispatch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ConceptualRecord {
    Thought(Thought),
    Conversation(Conversation),
    Idea(Idea),
    Note(Note),
    Plan(Plan),
    Hybrid(Hybrid),
}

impl ConceptualRecord {
    /// The record's embedding vector, if it carries one directly. `Hybrid`
    /// has no embedding of its own — it is a pure connective record over
    /// other entries' embeddings.
    pub fn embedding(&self) -> Option<&[f32]> {
        match self {
            ConceptualRecord::Thought(t) => Some(&t.embedding),
            ConceptualRecord::Conversation(c) => Some(&c.embedding),
            ConceptualRecord::Idea(i) => Some(&i.embedding),
            ConceptualRecord::Note(n) => Some(&n.embedding),
            ConceptualRecord::Plan(p) => Some(&p.embedding),
            ConceptualRecord::Hybrid(_) => None,
        }
    }

    /// The discriminator used as `object_type` when this record flows
    /// through the shared dedup engine (spec §4.5: "object_type derived
    /// from variant tag").
    pub fn variant_tag(&self) -> &'static str {
        match self {
            ConceptualRecord::Thought(_) => "thought",
            ConceptualRecord::Conversation(_) => "conversation",
            ConceptualRecord::Idea(_) => "idea",
            ConceptualRecord::Note(_) => "note",
            ConceptualRecord::Plan(_) => "plan",
            ConceptualRecord::Hybrid(_) => "hybrid",
        }
    }

    /// Text used to derive this record's embedding when the caller did not
    /// supply one directly (spec §4.5: "title + description for ideas;
    /// concatenated messages summary for conversations").
    pub fn embedding_source_text(&self) -> String {
        match self {
            ConceptualRecord::Thought(t) => t.content.clone(),
            ConceptualRecord::Conversation(c) => {
                let joined: String = c
                    .messages
                    .iter()
                    .map(|m| m.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{} {}", c.summary, joined)
            }
            ConceptualRecord::Idea(i) => format!("{} {}", i.title, i.description),
            ConceptualRecord::Note(n) => format!("{} {}", n.title, n.content),
            ConceptualRecord::Plan(p) => p.title.clone(),
            ConceptualRecord::Hybrid(h) => h.synthesized_meaning.clone(),
        }
    }
}
