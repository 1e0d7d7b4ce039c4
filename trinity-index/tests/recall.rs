//! End-to-end scenario: approximate search recall under the IVF strategy
//! (spec §8 "Approximate search recall").

use trinity_core::config::IndexConfig;
use trinity_core::memory::{cosine_similarity, renormalize, EntryId, IndexRecord, Tier, TierFilter};
use trinity_core::rng::SplitMix64;
use trinity_index::VectorIndex;

const DIM: usize = 8;
const HAYSTACK: usize = 5000;
const SEEDS: u64 = 20;

fn random_unit_vector(rng: &mut SplitMix64) -> Vec<f32> {
    let raw: Vec<f32> = (0..DIM).map(|_| rng.next_f64_range(-1.0, 1.0) as f32).collect();
    renormalize(&raw)
}

fn record(id: &str, embedding: Vec<f32>) -> IndexRecord {
    IndexRecord {
        id: EntryId::from(id),
        embedding,
        tier: Tier::Semantic,
        access_count: 0,
        last_accessed: chrono::Utc::now(),
    }
}

/// With 5000 random unit vectors and a query near a known inserted vector,
/// `search(k=10)` should surface it under the IVF strategy (nprobe=5) in at
/// least 95% of random seeds.
#[test]
fn ivf_recalls_near_neighbor_in_top_10() {
    let mut hits = 0u64;

    for seed in 0..SEEDS {
        let mut rng = SplitMix64::new(0xA11CE ^ seed);
        let mut index = VectorIndex::new(IndexConfig {
            brute_threshold: 100,
            max_ivf_clusters: 100,
            nprobe: 5,
        });

        for i in 0..HAYSTACK {
            index.insert(record(&format!("noise-{i}"), random_unit_vector(&mut rng)));
        }

        let target = random_unit_vector(&mut rng);
        index.insert(record("target", target.clone()));

        // Perturb the target slightly to build a query that is near, but
        // not identical to, the stored vector (spec scenario: cosine ~0.99).
        let noise: Vec<f32> = (0..DIM).map(|_| rng.next_f64_range(-0.05, 0.05) as f32).collect();
        let perturbed: Vec<f32> = target.iter().zip(&noise).map(|(a, b)| a + b).collect();
        let query = renormalize(&perturbed);
        assert!(cosine_similarity(&query, &target) > 0.9, "perturbation too large to be a meaningful near-neighbor probe");

        let results = index.search(&query, 10, TierFilter::all());
        if results.iter().any(|(id, _)| id.as_str() == "target") {
            hits += 1;
        }
    }

    let recall = hits as f64 / SEEDS as f64;
    assert!(recall >= 0.95, "recall {recall} fell below the 95% target ({hits}/{SEEDS} seeds)");
}
