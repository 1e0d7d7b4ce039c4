use std::collections::HashSet;

use trinity_core::memory::{cosine_similarity, jaccard, BaseEntry, GeoCoordinate};

const W_EMBEDDING: f64 = 0.6;
const W_TAGS: f64 = 0.2;
const W_CATEGORIES: f64 = 0.2;

/// Fused similarity score combining embedding cosine, tag Jaccard, and
/// category Jaccard (spec §4.2 "Similarity fusion").
pub fn fused_similarity(a: &BaseEntry, b: &BaseEntry) -> f64 {
    let cos = cosine_similarity(&a.embedding, &b.embedding);
    let tag_j = jaccard(&a.metadata.tags, &b.metadata.tags);
    let cat_j = jaccard(&categories_of(a), &categories_of(b));
    W_EMBEDDING * cos + W_TAGS * tag_j + W_CATEGORIES * cat_j
}

fn categories_of(entry: &BaseEntry) -> HashSet<String> {
    entry
        .enhancement
        .as_ref()
        .map(|e| e.categories.iter().cloned().collect())
        .unwrap_or_default()
}

/// Object types for which the location check is relaxed (spec §4.2).
fn relaxes_location(object_type: &str) -> bool {
    matches!(object_type.to_lowercase().as_str(), "scene" | "place")
}

/// Full duplicate predicate: fused score at or above the type-adjusted
/// threshold, matching object type, and (when both are located) within the
/// configured location tolerance unless the object type relaxes it.
pub fn is_duplicate(existing: &BaseEntry, candidate: &BaseEntry, tau: f64, location_tolerance_m: f64) -> bool {
    if !existing.metadata.object_type_matches(&candidate.metadata) {
        return false;
    }

    if fused_similarity(existing, candidate) < tau {
        return false;
    }

    if let (Some(loc_a), Some(loc_b)) = (&existing.metadata.location, &candidate.metadata.location) {
        if !relaxes_location(&existing.metadata.object_type) {
            return within_tolerance(loc_a, loc_b, location_tolerance_m);
        }
    }

    true
}

fn within_tolerance(a: &GeoCoordinate, b: &GeoCoordinate, tolerance_m: f64) -> bool {
    a.distance_m(b) <= tolerance_m
}
