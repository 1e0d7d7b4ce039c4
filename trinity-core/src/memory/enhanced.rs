use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::connection::ConnectionEdge;
use super::entity::Entity;
use super::entry_id::EntryId;
use super::importance::Importance;
use super::trigger::Trigger;

/// Optional enrichment carried by a record beyond the base metadata (spec
/// §3 "Enhanced entry (optional per record)").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enhancement {
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub entities: Vec<Entity>,
    pub importance: Importance,
    pub time_of_day: Option<String>,
    /// Three-letter day name ("Mon".."Sun"), avoiding a dependency on
    /// chrono's non-serde `Weekday` for the persisted JSON shape.
    pub day_of_week: Option<String>,
    pub location_name: Option<String>,
    pub weather_context: Option<String>,
    pub conversation_context: Option<String>,
    pub intent_context: Option<String>,
    pub connections: Vec<ConnectionEdge>,
    pub cluster_id: Option<String>,
    pub previous_entry: Option<EntryId>,
    pub next_entry: Option<EntryId>,
    pub triggers: Vec<Trigger>,
    pub source_type: Option<String>,
    pub quality: f64,
    pub consolidation_count: u32,
    pub last_enriched: Option<DateTime<Utc>>,
}
