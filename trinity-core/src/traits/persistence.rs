use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::TrinityResult;
use crate::memory::Tier;

/// Pluggable persistence backend for a tiered collection of records.
/// The concrete JSON-file-per-tier implementation lives in `trinity-memory`
/// (spec §4.4/§6); this trait exists so the memory manager can be tested
/// against an in-memory fake without touching a filesystem.
pub trait TierStore<T>: Send + Sync
where
    T: Serialize + DeserializeOwned,
{
    /// Atomically overwrite the file for `tier` with `items`.
    fn save(&self, tier: Tier, items: &[T]) -> TrinityResult<()>;

    /// Load `tier`'s records. A malformed or partially-written file is
    /// treated as empty per spec §6's crash-tolerance requirement, and
    /// should be logged by the caller as `TrinityError::IndexCorrupt`
    /// rather than propagated.
    fn load(&self, tier: Tier) -> TrinityResult<Vec<T>>;
}
