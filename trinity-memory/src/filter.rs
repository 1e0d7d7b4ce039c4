use trinity_core::memory::Metadata;

/// Object-type labels the default admission predicate treats as worth
/// storing (spec §4.4 "Intelligent filtering").
const DEFAULT_ADMITTED_LABELS: &[&str] =
    &["person", "obstacle", "stairs", "door", "sign", "text", "vehicle", "animal"];

/// Caller-supplied admission predicate deciding whether an observation is
/// stored, independent of dedup (spec §4.4: "Rejected observations still
/// contribute to search context but are not stored").
pub trait AdmissionPredicate: Send + Sync {
    fn admit(&self, metadata: &Metadata) -> bool;
}

/// The default policy: confidence above 0.75 and at least one detected
/// label — the primary object type or any tag — drawn from the fixed label
/// set above (spec §4.4: "at least one detected label in the admitted set").
pub struct DefaultAdmissionPredicate {
    pub min_confidence: f64,
}

impl Default for DefaultAdmissionPredicate {
    fn default() -> Self {
        Self { min_confidence: 0.75 }
    }
}

impl AdmissionPredicate for DefaultAdmissionPredicate {
    fn admit(&self, metadata: &Metadata) -> bool {
        let detected_labels = std::iter::once(metadata.object_type.as_str()).chain(metadata.tags.iter().map(String::as_str));
        metadata.confidence.value() > self.min_confidence
            && detected_labels.any(|detected| DEFAULT_ADMITTED_LABELS.iter().any(|label| detected.eq_ignore_ascii_case(label)))
    }
}
