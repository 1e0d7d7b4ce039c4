mod embedding;
mod persistence;

pub use embedding::{hash_embed, EmbeddingProvider, HashingEmbeddingProvider};
pub use persistence::TierStore;
