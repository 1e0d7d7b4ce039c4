use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance score clamped to [0.0, 1.0] (§3: `importance ∈ [0,1]`).
///
/// Unlike a discrete importance level, this tracks a continuous score
/// directly since promotion/consolidation math (§4.3 feature 6) reads it
/// as a real number, not a bucket.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Importance(f64);

impl Importance {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Merge policy: importance of a merged entry is the max of the two (spec §3 invariant 6).
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(0.5)
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Importance {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Importance> for f64 {
    fn from(i: Importance) -> Self {
        i.0
    }
}
