//! # trinity-core
//!
//! Foundation crate for the Trinity memory system.
//! Defines entry/metadata/conceptual types, the embedding provider and
//! persistence contracts, config, errors, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod rng;
pub mod traits;

pub use config::TrinityConfig;
pub use errors::{TrinityError, TrinityResult};
pub use memory::{BaseEntry, EntryId, Tier};
