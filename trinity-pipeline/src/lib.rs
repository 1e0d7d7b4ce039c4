//! # trinity-pipeline
//!
//! The agent pipeline coordinator (spec §4.6): turns one observation into a
//! perception → context → navigation → communication result with parallel
//! fan-out and bounded backpressure.

mod agents;
mod coordinator;
mod types;

pub use agents::{CommunicationAgent, ContextAgent, Deliverer, NavigationAgent, ObservationEmbedder, PerceptionAgent};
pub use coordinator::Coordinator;
pub use types::{
    derive_priority, ContextOutput, Detected, DeliveryPayload, NavigationOutput, NavigationWarning, Observation,
    PerceptionOutput, Priority, WarningSeverity,
};
