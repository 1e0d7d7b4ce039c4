use trinity_core::errors::TrinityResult;
use trinity_core::memory::{BaseEntry, Orientation, SpatialData};

use crate::types::{ContextOutput, Detected, DeliveryPayload, NavigationOutput, Observation, PerceptionOutput, Priority};

/// Runs perception (ML inference) over a raw frame (spec §4.6 step 1a).
pub trait PerceptionAgent: Send + Sync {
    fn perceive(&self, observation: &Observation) -> TrinityResult<PerceptionOutput>;
}

/// Assembles a context bundle from retrieved search results (spec §4.6
/// step 3, "context_agent(obs, ctx)").
pub trait ContextAgent: Send + Sync {
    fn assemble(&self, observation: &Observation, related: &[BaseEntry]) -> TrinityResult<ContextOutput>;
}

/// Evaluates spatial hazards from the current frame's detections and
/// device heading (spec §4.6 step 3, "navigation_agent(perception.spatial,
/// detections, heading)").
pub trait NavigationAgent: Send + Sync {
    fn navigate(&self, spatial: &[SpatialData], detections: &[Detected], heading: Orientation) -> TrinityResult<NavigationOutput>;
}

/// Produces the final delivery payload from the three upstream outputs
/// plus the derived priority (spec §4.6 step 3, "communication_agent(...)").
pub trait CommunicationAgent: Send + Sync {
    fn communicate(
        &self,
        perception: &PerceptionOutput,
        navigation: &NavigationOutput,
        context: &ContextOutput,
        priority: Priority,
    ) -> TrinityResult<DeliveryPayload>;
}

/// Delivers a finished payload to whatever surface owns speech/haptics/UI
/// (out of scope per spec §1; the coordinator only needs somewhere to hand
/// the payload off to).
pub trait Deliverer: Send + Sync {
    fn deliver(&self, payload: &DeliveryPayload) -> TrinityResult<()>;
}

/// Produces a unit-norm embedding for a whole observation, analogous to
/// `trinity_core::traits::EmbeddingProvider` but over the richer
/// `Observation` shape rather than free text (spec §6: `embed(text|observation)`).
pub trait ObservationEmbedder: Send + Sync {
    fn embed(&self, observation: &Observation) -> TrinityResult<Vec<f32>>;
}
