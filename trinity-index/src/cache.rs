use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use trinity_core::memory::EntryId;

/// Result-cache entry: the scored ids returned for a given (query, k).
type CachedResult = Vec<(EntryId, f64)>;

/// LRU result cache keyed by a quantized, order-sensitive hash of the query
/// vector plus `k` (spec §4.1 "Cache"). `moka`'s `Cache` already evicts by
/// insertion/access recency; we configure it for pure LRU-by-insertion by
/// giving every entry the same weight and relying on `max_capacity`.
pub struct ResultCache {
    inner: Cache<u64, CachedResult>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, query: &[f32], k: usize) -> Option<CachedResult> {
        let key = cache_key(query, k);
        let hit = self.inner.get(&key);
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    pub fn insert(&self, query: &[f32], k: usize, result: CachedResult) {
        let key = cache_key(query, k);
        self.inner.insert(key, result);
    }

    /// Invalidate the whole cache. Called on any mutation that could affect
    /// a probed IVF cell (spec §4.1: "simplest correct policy: clear on
    /// insert/delete"; finer invalidation is left as an open question).
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

/// Fold a query vector and `k` into a single cache key. Order-sensitive
/// (component order matters) and quantization-aware: each component is
/// rounded to 1e-3 before hashing so near-identical floating point queries
/// collide (spec §4.1).
fn cache_key(query: &[f32], k: usize) -> u64 {
    let mut hasher = blake3::Hasher::new();
    for x in query {
        let quantized = (*x as f64 / 1e-3).round() as i64;
        hasher.update(&quantized.to_le_bytes());
    }
    hasher.update(&(k as u64).to_le_bytes());
    let digest = hasher.finalize();
    u64::from_le_bytes(digest.as_bytes()[0..8].try_into().unwrap())
}
