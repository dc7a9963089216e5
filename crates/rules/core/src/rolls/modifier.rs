//! Roll modifiers: advantage, extra dice, rerolls, minimums and crit range.

use super::mode::{RollMode, determine_advantage};
use crate::config::RulesConfig;
use crate::effect::data::RollModData;
use crate::filter::FilterView;
use crate::index::ComponentIndex;

/// Every roll modifier affecting one roll, combined.
///
/// `mode` keeps every mode input; [`RollMod::effective_mode`] reduces it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollMod {
    /// Dice below this count as this.
    pub min: i32,
    /// Dice below this are rerolled.
    pub reroll: i32,
    /// Extra (or, when negative, fewer) d20s.
    pub ndice: i32,
    pub mode: Vec<RollMode>,
    /// Dice are treated as rolling their maximum.
    pub max: bool,
    /// Lowest natural roll that counts as a critical.
    pub mcrit: i32,
}

impl RollMod {
    /// A modifier that changes nothing.
    pub fn identity() -> Self {
        Self::with_modes([RollMode::Reg])
    }

    pub fn with_modes(modes: impl IntoIterator<Item = RollMode>) -> Self {
        Self {
            min: 1,
            reroll: 1,
            ndice: 0,
            mode: modes.into_iter().collect(),
            max: false,
            mcrit: RulesConfig::D20 as i32,
        }
    }

    pub fn effective_mode(&self) -> RollMode {
        determine_advantage(self.mode.iter().copied())
    }
}

impl Default for RollMod {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&RollModData> for RollMod {
    fn from(data: &RollModData) -> Self {
        Self {
            min: data.min,
            reroll: data.reroll,
            ndice: data.ndice,
            mode: vec![data.mode],
            max: data.max,
            mcrit: data.mcrit,
        }
    }
}

/// Combines any number of roll modifiers into one.
///
/// Highest minimum and reroll threshold, summed extra dice, every mode kept,
/// `max` if any asks for it, and the widest crit range (clamped to 0-20).
/// An empty input behaves as [`RollMod::identity`].
pub fn combine_roll_mods<I>(mods: I) -> RollMod
where
    I: IntoIterator<Item = RollMod>,
{
    let mut mods = mods.into_iter().peekable();
    if mods.peek().is_none() {
        return combine_roll_mods([RollMod::identity()]);
    }

    let mut out = RollMod {
        min: i32::MIN,
        reroll: i32::MIN,
        ndice: 0,
        mode: Vec::new(),
        max: false,
        mcrit: i32::MAX,
    };
    for m in mods {
        out.min = out.min.max(m.min);
        out.reroll = out.reroll.max(m.reroll);
        out.ndice = out.ndice.saturating_add(m.ndice);
        out.mode.extend(m.mode);
        out.max |= m.max;
        out.mcrit = out.mcrit.min(m.mcrit);
    }
    out.mcrit = out.mcrit.clamp(0, RulesConfig::D20 as i32);
    out
}

/// Collects the roll modifiers of one roll in two passes.
///
/// Some modifiers only apply to rolls made with advantage (or
/// disadvantage), so the mode has to be known before they can be found.
/// The first pass uses `pred(None)` to settle the mode from the
/// mode-independent modifiers; the second pass re-queries with
/// `pred(Some(mode))`. `global` (the sheet-wide mode) joins both passes.
pub fn determine_roll_mods<F, P>(index: &ComponentIndex<'_>, global: &RollMod, pred: F) -> RollMod
where
    F: Fn(Option<RollMode>) -> P,
    P: Fn(&FilterView<'_>) -> bool,
{
    let pass = |mode: Option<RollMode>| {
        let found = index.mods(pred(mode));
        combine_roll_mods(
            found
                .into_iter()
                .map(|m| RollMod::from(m.data))
                .chain(std::iter::once(global.clone())),
        )
    };

    let mode = pass(None).effective_mode();
    pass(Some(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut RollMod)) -> RollMod {
        let mut m = RollMod::identity();
        f(&mut m);
        m
    }

    #[test]
    fn empty_is_identity() {
        assert_eq!(combine_roll_mods([]), RollMod::identity());
    }

    #[test]
    fn combination_rules() {
        let combined = combine_roll_mods([
            with(|m| {
                m.min = 10;
                m.mode = vec![RollMode::Adv];
                m.mcrit = 19;
            }),
            with(|m| {
                m.reroll = 3;
                m.ndice = 1;
                m.mode = vec![RollMode::Dis];
            }),
            with(|m| {
                m.ndice = 1;
                m.max = true;
                m.mcrit = 25;
            }),
        ]);
        assert_eq!(combined.min, 10);
        assert_eq!(combined.reroll, 3);
        assert_eq!(combined.ndice, 2);
        assert_eq!(combined.mode, vec![RollMode::Adv, RollMode::Dis, RollMode::Reg]);
        assert!(combined.max);
        assert_eq!(combined.mcrit, 19);
        assert_eq!(combined.effective_mode(), RollMode::Reg);
    }

    #[test]
    fn mcrit_is_clamped() {
        let combined = combine_roll_mods([with(|m| m.mcrit = -4)]);
        assert_eq!(combined.mcrit, 0);
    }
}
