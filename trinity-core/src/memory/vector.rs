//! Shared vector arithmetic used by the index, dedup engine, and predictor.

/// Renormalize a vector to unit length. A zero vector is returned unchanged
/// (there is no direction to normalize to).
pub fn renormalize(v: &[f32]) -> Vec<f32> {
    let norm: f64 = v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| (*x as f64 / norm) as f32).collect()
}

/// Renormalized mean of a set of vectors. Panics-free on an empty slice,
/// returning an empty vector (callers must not call this on an empty set).
pub fn renormalized_mean(vectors: &[&[f32]]) -> Vec<f32> {
    if vectors.is_empty() {
        return Vec::new();
    }
    let dim = vectors[0].len();
    let mut sum = vec![0f64; dim];
    for v in vectors {
        for (i, x) in v.iter().enumerate().take(dim) {
            sum[i] += *x as f64;
        }
    }
    let n = vectors.len() as f64;
    let mean: Vec<f32> = sum.iter().map(|s| (s / n) as f32).collect();
    renormalize(&mean)
}

/// Cosine similarity between two vectors. Returns 0.0 for a zero-magnitude
/// vector or a dimension mismatch; never returns NaN (spec §4.1 "Cosine
/// contract").
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a * norm_b);
    if sim.is_nan() {
        0.0
    } else {
        sim
    }
}

/// Whether `v` is unit-norm within the documented tolerance (§3 invariant 1).
pub fn is_unit_norm(v: &[f32]) -> bool {
    let norm: f64 = v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    (norm - 1.0).abs() < crate::constants::NORM_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_self_similarity_near_one() {
        let v = renormalize(&[1.0, 2.0, 3.0]);
        assert!(cosine_similarity(&v, &v) > 1.0 - 1e-4);
    }

    #[test]
    fn cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_dimension_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_never_nan() {
        let sim = cosine_similarity(&[f32::NAN, 0.0], &[1.0, 0.0]);
        assert!(!sim.is_nan());
    }

    #[test]
    fn renormalized_mean_is_unit_norm() {
        let a = renormalize(&[1.0, 0.0, 0.0]);
        let b = renormalize(&[0.0, 1.0, 0.0]);
        let mean = renormalized_mean(&[&a, &b]);
        assert!(is_unit_norm(&mean));
    }

    proptest::proptest! {
        #[test]
        fn cosine_is_bounded(a in proptest::collection::vec(-10.0f32..10.0, 1..16),
                              b in proptest::collection::vec(-10.0f32..10.0, 1..16)) {
            if a.len() == b.len() {
                let sim = cosine_similarity(&a, &b);
                proptest::prop_assert!(sim >= -1.0 - 1e-6 && sim <= 1.0 + 1e-6);
            }
        }
    }
}
