use std::collections::HashMap;

/// Turns a localization key into a display string.
///
/// Only used for human-readable part names; the engine never branches on the
/// returned text.
pub trait LocalizationOracle {
    fn localize(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyLocalization;

impl LocalizationOracle for KeyLocalization {
    fn localize(&self, key: &str) -> String {
        key.to_owned()
    }
}

/// Fixed key table, falling back to the key itself.
#[derive(Clone, Debug, Default)]
pub struct MapLocalization {
    entries: HashMap<String, String>,
}

impl MapLocalization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapLocalization {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl LocalizationOracle for MapLocalization {
    fn localize(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}
