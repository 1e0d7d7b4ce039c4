pub mod conceptual;
mod confidence;
mod connection;
mod entity;
mod entry;
mod entry_id;
mod enhanced;
mod importance;
mod metadata;
mod spatial;
mod tier;
mod trigger;
mod vector;
mod vector_record;

pub use conceptual::{
    ConceptualEntry, ConceptualRecord, Conversation, Hybrid, Idea, IdeaStatus, IdeaVersion,
    Message, Note, Plan, Thought, ThoughtCategory,
};
pub use confidence::Confidence;
pub use connection::{union_connections, ConnectionEdge, ConnectionType};
pub use entity::Entity;
pub use entry::BaseEntry;
pub use entry_id::EntryId;
pub use enhanced::Enhancement;
pub use importance::Importance;
pub use metadata::{jaccard, Metadata};
pub use spatial::{BoundingBox3D, GeoCoordinate, Orientation, SpatialData};
pub use tier::{Tier, TierFilter};
pub use trigger::{Trigger, TriggerAction, TriggerContext, TriggerType};
pub use vector::{cosine_similarity, is_unit_norm, renormalize, renormalized_mean};
pub use vector_record::{IndexRecord, VectorRecord};
