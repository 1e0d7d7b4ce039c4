use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enhanced::Enhancement;
use super::entry_id::EntryId;
use super::metadata::Metadata;
use super::tier::Tier;
use super::vector::is_unit_norm;

/// A single physical-memory record (spec §3 "Entry").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseEntry {
    pub id: EntryId,
    pub embedding: Vec<f32>,
    pub tier: Tier,
    pub access_count: u64,
    pub created: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<Enhancement>,
}

impl BaseEntry {
    pub fn new(embedding: Vec<f32>, tier: Tier, metadata: Metadata) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new(),
            embedding,
            tier,
            access_count: 0,
            created: now,
            last_accessed: now,
            metadata,
            enhancement: None,
        }
    }

    /// Bump access accounting (spec §3 invariant 3: `accessCount >= 0`,
    /// `lastAccessed >= created`).
    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.access_count += 1;
        if at > self.last_accessed {
            self.last_accessed = at;
        }
    }

    /// Whether this entry satisfies the base invariants (embedding unit
    /// norm, access ordering). Used by property tests and by the
    /// persistence layer when validating loaded records.
    pub fn satisfies_invariants(&self) -> bool {
        is_unit_norm(&self.embedding) && self.last_accessed >= self.created
    }

    pub fn enhancement_or_default(&mut self) -> &mut Enhancement {
        self.enhancement.get_or_insert_with(Enhancement::default)
    }
}
