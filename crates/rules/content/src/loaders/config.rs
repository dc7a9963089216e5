//! Ruleset configuration loader.

use std::path::Path;

use rules_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
///
/// Missing keys keep their standard values, so a table that only changes
/// the crit range is a one-line file.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.fumble >= config.crit {
            anyhow::bail!(
                "Invalid config: fumble range ({}) overlaps crit range ({})",
                config.fumble,
                config.crit
            );
        }

        Ok(config)
    }
}
