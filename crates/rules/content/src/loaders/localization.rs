//! Localization table loader.

use std::path::Path;

use rules_core::MapLocalization;
use serde_json::Value;

use crate::loaders::{DataFormat, LoadResult, read_file};

/// Loads a key/string table into a [`MapLocalization`].
///
/// Nested tables are flattened into dotted keys, so
///
/// ```toml
/// [RULES]
/// Bonus = "Bonus"
/// AbilityAbbr.dex = "Dex"
/// ```
///
/// yields `RULES.Bonus` and `RULES.AbilityAbbr.dex`. Non-string leaves are
/// skipped.
pub struct LocalizationLoader;

impl LocalizationLoader {
    pub fn load(path: &Path) -> LoadResult<MapLocalization> {
        let content = read_file(path)?;
        let value: Value = match DataFormat::require(path)? {
            DataFormat::Toml => toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse localization TOML: {}", e))?,
            DataFormat::Json => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse localization JSON: {}", e))?,
            DataFormat::Ron => ron::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse localization RON: {}", e))?,
        };
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> MapLocalization {
        let mut entries = Vec::new();
        flatten("", value, &mut entries);
        entries.into_iter().collect()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) if !prefix.is_empty() => out.push((prefix.to_owned(), text.clone())),
        _ => tracing::warn!(key = prefix, "skipping non-string localization entry"),
    }
}
