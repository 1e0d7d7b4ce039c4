use serde::{Deserialize, Serialize};

/// The three memory tiers (spec §3 invariant 2: every entry resides in
/// exactly one tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Working,
    Episodic,
    Semantic,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Working, Tier::Episodic, Tier::Semantic];

    pub fn file_name(self) -> &'static str {
        match self {
            Tier::Working => "working.json",
            Tier::Episodic => "episodic.json",
            Tier::Semantic => "semantic.json",
        }
    }
}

/// A bitmask-like filter over tiers, used by `search(..., tier_filter)` (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierFilter {
    working: bool,
    episodic: bool,
    semantic: bool,
}

impl TierFilter {
    pub fn all() -> Self {
        Self {
            working: true,
            episodic: true,
            semantic: true,
        }
    }

    pub fn only(tier: Tier) -> Self {
        let mut f = Self::default();
        f.allow(tier);
        f
    }

    pub fn allow(&mut self, tier: Tier) -> &mut Self {
        match tier {
            Tier::Working => self.working = true,
            Tier::Episodic => self.episodic = true,
            Tier::Semantic => self.semantic = true,
        }
        self
    }

    pub fn contains(&self, tier: Tier) -> bool {
        match tier {
            Tier::Working => self.working,
            Tier::Episodic => self.episodic,
            Tier::Semantic => self.semantic,
        }
    }
}

impl From<Tier> for TierFilter {
    fn from(tier: Tier) -> Self {
        Self::only(tier)
    }
}
