/// Trinity system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default embedding dimensionality.
pub const DEFAULT_EMBEDDING_DIM: usize = 512;

/// Tolerance for the unit-norm invariant on embeddings.
pub const NORM_TOLERANCE: f64 = 1e-4;

/// Maximum number of conceptual record versions retained (ideas).
pub const MAX_IDEA_VERSIONS: usize = 50;

/// Maximum traversal depth when following connection edges.
pub const MAX_CONNECTION_TRAVERSAL_DEPTH: usize = 16;

/// Maximum number of candidates considered per dedup lookup pass.
pub const MAX_DEDUP_CANDIDATES: usize = 1000;
