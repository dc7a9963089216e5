//! Platform-specific directory utilities.

use std::path::PathBuf;

/// Get the rules data directory.
///
/// `RULES_DATA_DIR` wins when set. Otherwise follows platform conventions:
/// - macOS: `~/Library/Application Support/rules`
/// - Linux: `~/.local/share/rules` (or `$XDG_DATA_HOME/rules`)
/// - Windows: `%APPDATA%\rules`
/// - Fallback: `./data`
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("RULES_DATA_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("", "", "rules")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
