use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trigger condition kinds (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerType {
    ObjectDetected,
    LocationEntered,
    TimeOfDay,
    SpatialProximity,
    ConversationKeyword,
    Pattern,
}

/// Trigger action kinds (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerAction {
    Notify,
    Speak,
    Retrieve,
    WebSearch,
    Log,
    Custom(String),
}

/// A declarative rule that fires an action when a condition matches the
/// current context (spec §3, glossary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub trigger_type: TriggerType,
    pub condition: String,
    pub action: TriggerAction,
    pub priority: i32,
    pub active: bool,
}

/// Ambient state the pipeline evaluates triggers against. Supplements the
/// spec's inert `Trigger` data with an evaluation entry point (SPEC_FULL.md
/// "Trigger evaluation").
#[derive(Debug, Clone, Default)]
pub struct TriggerContext {
    pub detected_labels: Vec<String>,
    pub location_name: Option<String>,
    pub time_of_day: Option<String>,
    pub keywords: Vec<String>,
    pub current_time: Option<DateTime<Utc>>,
}

impl Trigger {
    /// Whether this trigger's condition is satisfied by `ctx`. Inactive
    /// triggers never match.
    pub fn matches(&self, ctx: &TriggerContext) -> bool {
        if !self.active {
            return false;
        }
        let needle = self.condition.to_lowercase();
        match self.trigger_type {
            TriggerType::ObjectDetected => ctx
                .detected_labels
                .iter()
                .any(|l| l.to_lowercase() == needle),
            TriggerType::LocationEntered => ctx
                .location_name
                .as_deref()
                .map(|l| l.to_lowercase() == needle)
                .unwrap_or(false),
            TriggerType::TimeOfDay => ctx
                .time_of_day
                .as_deref()
                .map(|t| t.to_lowercase() == needle)
                .unwrap_or(false),
            TriggerType::SpatialProximity => ctx
                .detected_labels
                .iter()
                .any(|l| l.to_lowercase().contains(&needle)),
            TriggerType::ConversationKeyword => ctx
                .keywords
                .iter()
                .any(|k| k.to_lowercase() == needle),
            TriggerType::Pattern => ctx
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&needle)),
        }
    }
}
