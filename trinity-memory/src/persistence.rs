use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use trinity_core::errors::TrinityResult;
use trinity_core::memory::Tier;
use trinity_core::traits::TierStore;

/// JSON-array-per-tier persistence backend (spec §4.4/§6). Each tier is one
/// file under `root`; writes are atomic (write-to-temp, then rename) and a
/// malformed file on load is treated as empty rather than propagated, per
/// §7's `IndexCorrupt` handling.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, tier: Tier) -> PathBuf {
        self.root.join(tier.file_name())
    }
}

impl<T> TierStore<T> for JsonFileStore
where
    T: Serialize + DeserializeOwned,
{
    fn save(&self, tier: Tier, items: &[T]) -> TrinityResult<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(tier);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(items)?;
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, tier: Tier) -> TrinityResult<Vec<T>> {
        let path = self.path_for(tier);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(?tier, error = %e, "tier file corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }
}
