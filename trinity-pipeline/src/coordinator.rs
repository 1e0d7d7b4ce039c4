use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tracing::{debug, info, warn};
use trinity_core::config::PipelineConfig;
use trinity_core::errors::{retry_with_backoff, RetryPolicy, TrinityError, TrinityResult};
use trinity_core::memory::{Metadata, SpatialData};
use trinity_memory::MemoryManager;

use crate::agents::{CommunicationAgent, ContextAgent, Deliverer, NavigationAgent, ObservationEmbedder, PerceptionAgent};
use crate::types::{derive_priority, DeliveryPayload, Observation, PerceptionOutput};

/// Stateful orchestrator for a single observation stream (spec §4.6). Owns
/// the bounded FIFO `pending` queue, the `in_flight` single-active flag, and
/// references to every pipeline collaborator.
pub struct Coordinator {
    memory: MemoryManager,
    perception: Arc<dyn PerceptionAgent>,
    embedder: Arc<dyn ObservationEmbedder>,
    context_agent: Arc<dyn ContextAgent>,
    navigation_agent: Arc<dyn NavigationAgent>,
    communication_agent: Arc<dyn CommunicationAgent>,
    deliverer: Arc<dyn Deliverer>,
    config: PipelineConfig,
    pending: VecDeque<Observation>,
    in_flight: bool,
    stopped: bool,
    current_embedding_abort: Option<tokio::task::AbortHandle>,
    last_consolidation: DateTime<Utc>,
}

#[allow(clippy::too_many_arguments)]
impl Coordinator {
    pub fn new(
        memory: MemoryManager,
        perception: Arc<dyn PerceptionAgent>,
        embedder: Arc<dyn ObservationEmbedder>,
        context_agent: Arc<dyn ContextAgent>,
        navigation_agent: Arc<dyn NavigationAgent>,
        communication_agent: Arc<dyn CommunicationAgent>,
        deliverer: Arc<dyn Deliverer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            memory,
            perception,
            embedder,
            context_agent,
            navigation_agent,
            communication_agent,
            deliverer,
            config,
            pending: VecDeque::new(),
            in_flight: false,
            stopped: false,
            current_embedding_abort: None,
            last_consolidation: Utc::now(),
        }
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryManager {
        &mut self.memory
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Run a consolidation sweep if `auto_consolidation` is enabled and the
    /// configured interval has elapsed since the last one (spec §4.4
    /// "periodic automatic consolidation pass").
    fn maybe_consolidate(&mut self) {
        let memory_config = &self.memory.config().memory;
        if !memory_config.auto_consolidation {
            return;
        }
        let interval = ChronoDuration::seconds(memory_config.consolidation_interval_s);
        let now = Utc::now();
        if now.signed_duration_since(self.last_consolidation) < interval {
            return;
        }
        self.last_consolidation = now;
        let report = self.memory.consolidate();
        debug!(?report, "automatic consolidation sweep triggered by timer");
    }

    /// Append `observation`, dropping the oldest queued observation first if
    /// `pending` is already at capacity (spec §4.6 "Scheduling").
    fn enqueue(&mut self, observation: Observation) {
        if self.pending.len() >= self.config.pending_max {
            self.pending.pop_front();
        }
        self.pending.push_back(observation);
    }

    /// Submit one observation to the stream. If no iteration is currently
    /// running, drains `pending` (this one included) synchronously,
    /// returning the delivery payload from every iteration that completed
    /// without error. A call arriving while another is mid-drain only
    /// enqueues (spec §4.6: "when in_flight is set, append to pending").
    pub async fn submit(&mut self, observation: Observation) -> Vec<DeliveryPayload> {
        if self.stopped {
            return Vec::new();
        }

        self.maybe_consolidate();
        self.enqueue(observation);
        if self.in_flight {
            return Vec::new();
        }

        self.in_flight = true;
        let mut delivered = Vec::new();
        while let Some(next) = self.pending.pop_front() {
            if self.stopped {
                break;
            }
            match self.run_iteration(next).await {
                Ok(payload) => delivered.push(payload),
                Err(e) => warn!(error = %e, "pipeline iteration aborted"),
            }
        }
        self.in_flight = false;
        delivered
    }

    /// Run the body of one observation through fan-out, ingestion, and the
    /// sequential agent chain (spec §4.6 steps 1-3).
    async fn run_iteration(&mut self, observation: Observation) -> TrinityResult<DeliveryPayload> {
        let (perception_output, embedding) = self.fan_out_perception_and_embed(&observation).await?;

        let related = self
            .memory
            .add_observation(build_metadata(&observation, &perception_output), embedding)?;

        let context_output = self.context_agent.assemble(&observation, &related)?;

        let spatial: Vec<SpatialData> = perception_output
            .detections
            .iter()
            .filter_map(|d| d.spatial_data.clone())
            .collect();
        let navigation_output =
            self.navigation_agent
                .navigate(&spatial, &perception_output.detections, observation.device_orientation)?;

        let priority = derive_priority(&navigation_output);
        let payload = self.communication_agent.communicate(
            &perception_output,
            &navigation_output,
            &context_output,
            priority,
        )?;

        self.deliverer.deliver(&payload)?;
        debug!(?priority, "pipeline iteration delivered");
        Ok(payload)
    }

    /// Run perception and embedding as sibling tasks, joining on
    /// all-success (spec §9 "Asynchronous fan-out"). Tracks the embedding
    /// task's abort handle so `stop()` can cancel it mid-flight. The
    /// embedding call is retried up to 3 times with linear backoff on a
    /// transient failure (spec §7); perception is not retried.
    async fn fan_out_perception_and_embed(&mut self, observation: &Observation) -> TrinityResult<(PerceptionOutput, Vec<f32>)> {
        let perception = Arc::clone(&self.perception);
        let obs_for_perception = observation.clone();
        let perception_handle = tokio::task::spawn_blocking(move || perception.perceive(&obs_for_perception));

        let embedder = Arc::clone(&self.embedder);
        let obs_for_embedding = observation.clone();
        let embedding_handle = tokio::task::spawn_blocking(move || {
            retry_with_backoff(RetryPolicy::default(), || embedder.embed(&obs_for_embedding))
        });
        self.current_embedding_abort = Some(embedding_handle.abort_handle());

        let (perception_res, embedding_res) = tokio::join!(perception_handle, embedding_handle);
        self.current_embedding_abort = None;

        let perception_output = perception_res
            .map_err(|e| TrinityError::Transient(format!("perception task did not complete: {e}")))??;
        let embedding = embedding_res
            .map_err(|e| TrinityError::EmbeddingFailed(format!("embedding task did not complete: {e}")))??;

        Ok((perception_output, embedding))
    }

    /// Halt the stream (spec §4.6 "Cancellation"): discards `pending`,
    /// flushes persistence best-effort, and cancels any in-flight embedding
    /// task. Entries already inserted before this call remain durable.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending.clear();
        if let Some(handle) = self.current_embedding_abort.take() {
            handle.abort();
        }
        if let Err(e) = self.memory.save() {
            warn!(error = %e, "best-effort persistence flush on stop failed");
        } else {
            info!("pipeline stopped, persistence flushed");
        }
    }
}

/// Derive an entry's metadata from the observation and the perception
/// agent's output (spec §4.6 step 2: "Build metadata from observation").
fn build_metadata(observation: &Observation, perception: &PerceptionOutput) -> Metadata {
    let object_type = perception.primary_label.clone().unwrap_or_else(|| "unknown".to_string());
    let description = match &perception.primary_label {
        Some(label) => format!("detected {label}"),
        None => "no confident detection".to_string(),
    };

    let mut metadata = Metadata::new(object_type, description);
    metadata.confidence = perception.max_confidence.into();
    metadata.tags = perception.detections.iter().map(|d| d.label.clone()).collect();
    metadata.location = observation.location;
    metadata.timestamp = observation.timestamp;
    metadata.spatial = perception
        .detections
        .iter()
        .max_by(|a, b| a.confidence.partial_cmp(&b.confidence).unwrap_or(std::cmp::Ordering::Equal))
        .and_then(|d| d.spatial_data.clone());
    metadata
}
