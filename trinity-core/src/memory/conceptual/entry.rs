use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::ConceptualRecord;
use crate::memory::entry_id::EntryId;
use crate::memory::tier::Tier;
use crate::memory::vector_record::VectorRecord;

/// A stored conceptual record plus the bookkeeping it shares with physical
/// entries (spec §4.5: conceptual records "index into the same vector
/// space" as physical entries, with the same tier/access machinery).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptualEntry {
    pub id: EntryId,
    pub record: ConceptualRecord,
    pub tier: Tier,
    pub access_count: u64,
    pub created: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl ConceptualEntry {
    pub fn new(record: ConceptualRecord) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new(),
            record,
            tier: Tier::Working,
            access_count: 0,
            created: now,
            last_accessed: now,
        }
    }

    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.access_count += 1;
        if at > self.last_accessed {
            self.last_accessed = at;
        }
    }
}

impl VectorRecord for ConceptualEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn embedding(&self) -> &[f32] {
        self.record.embedding().unwrap_or(&[])
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn access_count(&self) -> u64 {
        self.access_count
    }

    fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }
}
