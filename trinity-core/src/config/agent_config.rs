use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-agent thresholds for the pipeline coordinator's collaborators (spec §6 "agents").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    pub perception: PerceptionConfig,
    pub navigation: NavigationConfig,
    pub communication: CommunicationConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            perception: PerceptionConfig::default(),
            navigation: NavigationConfig::default(),
            communication: CommunicationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerceptionConfig {
    pub min_confidence: f64,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_PERCEPTION_MIN_CONFIDENCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    pub critical_distance_m: f64,
    pub warning_distance_m: f64,
    pub safe_distance_m: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            critical_distance_m: defaults::DEFAULT_NAV_CRITICAL_DISTANCE_M,
            warning_distance_m: defaults::DEFAULT_NAV_WARNING_DISTANCE_M,
            safe_distance_m: defaults::DEFAULT_NAV_SAFE_DISTANCE_M,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommunicationConfig {
    pub verbosity: u8,
    pub language_code: String,
}

impl Default for CommunicationConfig {
    fn default() -> Self {
        Self {
            verbosity: defaults::DEFAULT_COMM_VERBOSITY,
            language_code: defaults::DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }
}
