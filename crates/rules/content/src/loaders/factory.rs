//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use rules_core::{MapLocalization, RulesConfig};

use crate::cache::SnapshotCache;
use crate::loaders::{ConfigLoader, LoadResult, LocalizationLoader, SnapshotLoader};

/// Loads everything a rules host needs from one data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml        (optional, standard rules when absent)
/// ├── lang/
/// │   └── en.toml
/// └── actors/
///     ├── hero.json
///     └── wolf.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load ruleset configuration from `rules.toml`.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rules.toml, using standard rules");
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the `lang/{lang}.toml` string table.
    pub fn load_localization(&self, lang: &str) -> LoadResult<MapLocalization> {
        let path = self.data_dir.join("lang").join(format!("{lang}.toml"));
        LocalizationLoader::load(&path)
    }

    /// Load every actor under `actors/` into a snapshot cache.
    pub fn load_snapshots(&self) -> LoadResult<SnapshotCache> {
        let dir = self.data_dir.join("actors");
        let mut cache = SnapshotCache::new();
        for actor in SnapshotLoader::load_dir(&dir)? {
            let id = actor.id.clone();
            if cache.insert(actor).is_some() {
                tracing::warn!(actor = %id, "duplicate actor id, keeping the later file");
            }
        }
        tracing::info!(actors = cache.len(), dir = %dir.display(), "loaded actor snapshots");
        Ok(cache)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
