/// Cache hit-rate counters, exposed per spec §4.1 ("hit-rate counters
/// exposed"), plus a couple of structural stats that help observability
/// dashboards reason about the dual strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndexStats {
    pub hits: u64,
    pub misses: u64,
    pub live_count: usize,
    pub using_ivf: bool,
    pub ivf_clusters: usize,
}

impl IndexStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
