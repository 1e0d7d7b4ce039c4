mod agent_config;
pub mod defaults;
mod index_config;
mod memory_config;
mod performance_config;

pub use agent_config::{AgentConfig, CommunicationConfig, NavigationConfig, PerceptionConfig};
pub use index_config::{DedupConfig, IndexConfig, PipelineConfig};
pub use memory_config::MemoryConfig;
pub use performance_config::PerformanceConfig;

use serde::{Deserialize, Serialize};

/// Top-level, explicit configuration value passed into the Memory Manager
/// and Coordinator at construction (spec §9 design note: "reject implicit
/// singletons"). Loaded from `config.json` at the persisted-state root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TrinityConfig {
    pub memory: MemoryConfig,
    pub performance: PerformanceConfig,
    pub agents: AgentConfig,
    pub index: IndexConfig,
    pub dedup: DedupConfig,
    pub pipeline: PipelineConfig,
}

impl TrinityConfig {
    /// Parse a config value from its JSON representation, falling back to
    /// defaults for any missing field.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
