use crate::errors::TrinityResult;

/// External contract (spec §6 "Embedding provider"). The core does not
/// mandate a specific model; it only requires determinism for equal inputs
/// and a fixed dimensionality across a single process.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed free text into a unit-norm vector of `dim()` components.
    fn embed_text(&self, text: &str) -> TrinityResult<Vec<f32>>;

    /// The fixed output dimensionality for this provider instance.
    fn dim(&self) -> usize;
}

/// Deterministic reference provider used by tests and as a default for
/// callers that have not wired a real embedding model in. Not suitable for
/// semantic search quality — it exists only to satisfy the determinism and
/// unit-norm parts of the contract.
pub struct HashingEmbeddingProvider {
    dim: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_EMBEDDING_DIM)
    }
}

impl EmbeddingProvider for HashingEmbeddingProvider {
    fn embed_text(&self, text: &str) -> TrinityResult<Vec<f32>> {
        Ok(hash_embed(text, self.dim))
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

/// Expand a blake3 hash of `text` into `dim` pseudo-random components via a
/// counter-mode stream of sub-hashes, then renormalize to unit length.
pub fn hash_embed(text: &str, dim: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(dim);
    let mut counter: u64 = 0;
    while out.len() < dim {
        let mut hasher = blake3::Hasher::new();
        hasher.update(text.as_bytes());
        hasher.update(&counter.to_le_bytes());
        let digest = hasher.finalize();
        for chunk in digest.as_bytes().chunks_exact(4) {
            if out.len() == dim {
                break;
            }
            let bits = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            // Map into [-1, 1).
            out.push((bits as f32 / u32::MAX as f32) * 2.0 - 1.0);
        }
        counter += 1;
    }
    crate::memory::renormalize(&out)
}
