//! Collaborators injected into every resolution pass.
//!
//! The engine never reaches for ambient services. Display names go through a
//! [`LocalizationOracle`], cross-actor references through a
//! [`SnapshotOracle`], and ruleset constants come from a [`RulesConfig`].
//! [`Env`] bundles them; dice are passed separately because rolling is the
//! only stateful operation.
mod dice;
mod localization;
mod snapshots;

pub use dice::{DiceRoller, PcgRoller, ScriptedRoller};
pub use localization::{KeyLocalization, LocalizationOracle, MapLocalization};
pub use snapshots::{NoSnapshots, SnapshotOracle};

use crate::config::{RulesConfig, STANDARD_CONFIG};

/// Aggregates the read-only collaborators used by recomputation and rolls.
pub struct Env<'a, L, S>
where
    L: LocalizationOracle + ?Sized,
    S: SnapshotOracle + ?Sized,
{
    localization: Option<&'a L>,
    snapshots: Option<&'a S>,
    config: &'a RulesConfig,
}

impl<L, S> Clone for Env<'_, L, S>
where
    L: LocalizationOracle + ?Sized,
    S: SnapshotOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, S> Copy for Env<'_, L, S>
where
    L: LocalizationOracle + ?Sized,
    S: SnapshotOracle + ?Sized,
{
}

pub type RulesEnv<'a> = Env<'a, dyn LocalizationOracle + 'a, dyn SnapshotOracle + 'a>;

impl<'a, L, S> Env<'a, L, S>
where
    L: LocalizationOracle + ?Sized,
    S: SnapshotOracle + ?Sized,
{
    pub fn new(
        localization: Option<&'a L>,
        snapshots: Option<&'a S>,
        config: &'a RulesConfig,
    ) -> Self {
        Self {
            localization,
            snapshots,
            config,
        }
    }

    pub fn with_all(localization: &'a L, snapshots: &'a S, config: &'a RulesConfig) -> Self {
        Self::new(Some(localization), Some(snapshots), config)
    }

    /// No localization, no cross-actor snapshots, standard config.
    pub fn empty() -> Self {
        Self::new(None, None, &STANDARD_CONFIG)
    }

    pub fn config(&self) -> &'a RulesConfig {
        self.config
    }

    /// Localized display string. Keys pass through unchanged when no
    /// localization is installed.
    pub fn localize(&self, key: &str) -> String {
        match self.localization {
            Some(localization) => localization.localize(key),
            None => key.to_owned(),
        }
    }

    pub fn snapshots(&self) -> Option<&'a S> {
        self.snapshots
    }

    pub fn with_config(self, config: &'a RulesConfig) -> Self {
        Self { config, ..self }
    }
}

impl<'a> RulesEnv<'a> {
    /// Erases concrete oracle types.
    pub fn from_parts<L, S>(localization: &'a L, snapshots: &'a S, config: &'a RulesConfig) -> Self
    where
        L: LocalizationOracle + 'a,
        S: SnapshotOracle + 'a,
    {
        Self::with_all(
            localization as &(dyn LocalizationOracle + 'a),
            snapshots as &(dyn SnapshotOracle + 'a),
            config,
        )
    }
}

impl Default for RulesEnv<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
