//! Optional product quantization for semantic-tier storage compaction
//! (§4.1 "Optional product quantization"). Not wired into
//! `VectorIndex::search` by default — scalar storage is the baseline, and a
//! caller opts into PQ later without an ABI change.

use trinity_core::rng::SplitMix64;

/// A trained product-quantization codebook: `M` subvectors, each quantized
/// to an 8-bit code against its own 256-entry sub-codebook.
pub struct ProductQuantizer {
    m: usize,
    sub_dim: usize,
    /// `codebooks[s][code]` is the `sub_dim`-wide centroid for subvector `s`.
    codebooks: Vec<Vec<Vec<f32>>>,
}

impl ProductQuantizer {
    /// Train `m` sub-codebooks (256 codes each) over `training_vectors`
    /// using a handful of Lloyd iterations per subvector. Offline only —
    /// never called from the query path.
    pub fn train(training_vectors: &[Vec<f32>], m: usize, seed: u64) -> Option<Self> {
        let dim = training_vectors.first()?.len();
        if dim % m != 0 {
            return None;
        }
        let sub_dim = dim / m;
        let mut codebooks = Vec::with_capacity(m);
        let mut rng = SplitMix64::new(seed);

        for s in 0..m {
            let subvectors: Vec<Vec<f32>> = training_vectors
                .iter()
                .map(|v| v[s * sub_dim..(s + 1) * sub_dim].to_vec())
                .collect();
            codebooks.push(train_sub_codebook(&subvectors, 256, &mut rng));
        }

        Some(Self { m, sub_dim, codebooks })
    }

    /// Encode a full-dimension vector into `m` 8-bit codes.
    pub fn encode(&self, v: &[f32]) -> Vec<u8> {
        (0..self.m)
            .map(|s| {
                let sub = &v[s * self.sub_dim..(s + 1) * self.sub_dim];
                nearest_code(&self.codebooks[s], sub)
            })
            .collect()
    }

    /// Asymmetric distance: the full-precision query is compared directly
    /// against each subvector's codebook entry (spec: "quantized entries
    /// support asymmetric distance only (scored against full query)").
    /// Returns squared Euclidean distance (lower is closer).
    pub fn asymmetric_distance(&self, query: &[f32], codes: &[u8]) -> f32 {
        let mut total = 0f32;
        for s in 0..self.m {
            let centroid = &self.codebooks[s][codes[s] as usize];
            let q_sub = &query[s * self.sub_dim..(s + 1) * self.sub_dim];
            total += q_sub
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f32>();
        }
        total
    }
}

fn nearest_code(codebook: &[Vec<f32>], sub: &[f32]) -> u8 {
    codebook
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let d: f32 = sub.iter().zip(c.iter()).map(|(a, b)| (a - b).powi(2)).sum();
            (i, d)
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i as u8)
        .unwrap_or(0)
}

/// A handful of Lloyd iterations over one subvector's training set.
fn train_sub_codebook(subvectors: &[Vec<f32>], k: usize, rng: &mut SplitMix64) -> Vec<Vec<f32>> {
    let k = k.min(subvectors.len()).max(1);
    let dim = subvectors[0].len();
    let init_idx = rng.sample_indices(subvectors.len(), k);
    let mut centroids: Vec<Vec<f32>> = init_idx.iter().map(|&i| subvectors[i].clone()).collect();

    for _ in 0..4 {
        let mut sums = vec![vec![0f32; dim]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for v in subvectors {
            let c = nearest_code(&centroids, v) as usize;
            for (d, x) in sums[c].iter_mut().zip(v.iter()) {
                *d += x;
            }
            counts[c] += 1;
        }
        for (c, (sum, count)) in sums.into_iter().zip(counts.into_iter()).enumerate() {
            if count > 0 {
                centroids[c] = sum.into_iter().map(|x| x / count as f32).collect();
            }
        }
    }
    centroids
}
