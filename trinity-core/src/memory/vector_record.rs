use chrono::{DateTime, Utc};

use super::entry::BaseEntry;
use super::entry_id::EntryId;
use super::tier::Tier;

/// The minimal projection the vector index needs from any record kind
/// (physical entries, conceptual records). Keeping the index generic over
/// this trait rather than `BaseEntry` directly is what lets the conceptual
/// store (spec §4.5: "Records index into the same vector space") share one
/// `trinity-index` instance with the physical memory manager.
pub trait VectorRecord {
    fn id(&self) -> &EntryId;
    fn embedding(&self) -> &[f32];
    fn tier(&self) -> Tier;
    fn access_count(&self) -> u64;
    fn last_accessed(&self) -> DateTime<Utc>;
}

impl VectorRecord for BaseEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn embedding(&self) -> &[f32] {
        &self.embedding
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

/// A lightweight, owned snapshot of a `VectorRecord`'s indexable fields.
/// The index stores these rather than full records so it has no
/// dependency on any specific record type beyond this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    pub id: EntryId,
    pub embedding: Vec<f32>,
    pub tier: Tier,
    pub access_count: u64,
    pub last_accessed: DateTime<Utc>,
}

impl<T: VectorRecord> From<&T> for IndexRecord {
    fn from(r: &T) -> Self {
        Self {
            id: r.id().clone(),
            embedding: r.embedding().to_vec(),
            tier: r.tier(),
            access_count: r.access_count(),
            last_accessed: r.last_accessed(),
        }
    }
}
