//! Loaders that read rules data from files.
//!
//! Actor snapshots are stored as JSON (the host's persistence format) or
//! RON (hand-written fixtures). Configuration and localization tables are
//! TOML.

pub mod config;
pub mod factory;
pub mod localization;
pub mod snapshots;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use localization::LocalizationLoader;
pub use snapshots::SnapshotLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// On-disk encoding, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Ron,
    Toml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "ron" => Some(Self::Ron),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub(crate) fn require(path: &Path) -> LoadResult<Self> {
        Self::from_path(path)
            .ok_or_else(|| anyhow::anyhow!("Unsupported file extension: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a/b.json")), Some(DataFormat::Json));
        assert_eq!(DataFormat::from_path(Path::new("hero.RON")), Some(DataFormat::Ron));
        assert_eq!(DataFormat::from_path(Path::new("rules.toml")), Some(DataFormat::Toml));
        assert_eq!(DataFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(DataFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_file(Path::new("/nonexistent/hero.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hero.json"));
    }
}
