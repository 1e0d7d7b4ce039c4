use chrono::{DateTime, Utc};
use trinity_core::memory::{BaseEntry, BoundingBox3D, GeoCoordinate, Orientation, SpatialData};

/// One detected object within a sensor frame (spec §6 observation contract).
#[derive(Debug, Clone, PartialEq)]
pub struct Detected {
    pub id: String,
    pub label: String,
    pub confidence: f64,
    pub bbox3d: BoundingBox3D,
    pub spatial_data: Option<SpatialData>,
}

/// A single sensor frame handed to the pipeline (spec §6 `Observation`).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub camera_image: Option<Vec<u8>>,
    pub depth_map: Option<Vec<u8>>,
    pub detected_objects: Vec<Detected>,
    pub location: Option<GeoCoordinate>,
    pub device_orientation: Orientation,
}

/// Perception agent's output for one observation: the detections it
/// extracted plus the strongest signal among them.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptionOutput {
    pub detections: Vec<Detected>,
    pub primary_label: Option<String>,
    pub max_confidence: f64,
}

/// Severity of a single navigation-agent warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationWarning {
    pub severity: WarningSeverity,
    pub message: String,
    pub distance_m: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationOutput {
    pub warnings: Vec<NavigationWarning>,
    pub safe_to_proceed: bool,
}

/// Retrieved search context assembled for the downstream agents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextOutput {
    pub related: Vec<BaseEntry>,
    pub summary: String,
}

/// Priority derived from navigation warnings (spec §4.6 "Priority").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Normal,
    High,
    Critical,
}

/// The final message handed to the communication collaborator for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPayload {
    pub message: String,
    pub priority: Priority,
}

/// Derive a [`Priority`] from the strongest warning severity present (spec
/// §4.6: "critical → Critical, high → High, medium → Normal, otherwise
/// Low").
pub fn derive_priority(navigation: &NavigationOutput) -> Priority {
    navigation
        .warnings
        .iter()
        .map(|w| match w.severity {
            WarningSeverity::Critical => Priority::Critical,
            WarningSeverity::High => Priority::High,
            WarningSeverity::Medium => Priority::Normal,
            WarningSeverity::Low => Priority::Low,
        })
        .max()
        .unwrap_or(Priority::Low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_warnings_yields_low_priority() {
        let nav = NavigationOutput::default();
        assert_eq!(derive_priority(&nav), Priority::Low);
    }

    #[test]
    fn strongest_warning_wins() {
        let nav = NavigationOutput {
            warnings: vec![
                NavigationWarning {
                    severity: WarningSeverity::Medium,
                    message: "crack in pavement".into(),
                    distance_m: 1.5,
                },
                NavigationWarning {
                    severity: WarningSeverity::Critical,
                    message: "stairs ahead".into(),
                    distance_m: 0.3,
                },
            ],
            safe_to_proceed: false,
        };
        assert_eq!(derive_priority(&nav), Priority::Critical);
    }
}
