//! d20 roll construction: base dice, rerolls, crits and advantage culling.

use arrayvec::ArrayVec;
use tracing::trace;

use super::die::{roll_die, roll_plain, sum_rolls};
use super::mode::RollMode;
use super::modifier::{RollMod, combine_roll_mods};
use crate::bonus::{Part, total};
use crate::config::RulesConfig;
use crate::env::{DiceRoller, RulesEnv};
use crate::model::ActorSnapshot;

/// Most d20s a single roll can show.
pub const MAX_D20: usize = 2 + RulesConfig::MAX_EXTRA_D20;

/// One d20 of a roll and its total.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct D20Result {
    /// Natural results, rerolls included.
    pub rolls: Vec<u32>,
    /// The natural value that counts.
    pub roll: u32,
    pub total: i32,
    pub breakdown: String,
    /// Critical success.
    pub positive: bool,
    /// Fumble.
    pub negative: bool,
    /// Shown but discarded by advantage or disadvantage.
    pub grey: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct D20Roll {
    pub results: ArrayVec<D20Result, MAX_D20>,
    pub mode: RollMode,
    pub crit: u32,
    pub fumble: u32,
}

impl D20Roll {
    /// The authoritative result: the first one for regular rolls, the kept
    /// one otherwise.
    pub fn chosen(&self) -> Option<&D20Result> {
        self.results
            .iter()
            .find(|r| !r.grey)
            .or_else(|| self.results.first())
    }
}

/// Caller-supplied modifiers for [`resolve_d20`].
#[derive(Clone, Debug, Default)]
pub struct D20Inputs {
    /// Roll modifiers already determined for this roll.
    pub mods: Vec<RollMod>,
    /// Extra advantage inputs, such as the save's own roll setting.
    pub modes: Vec<RollMode>,
    pub crit: Option<u32>,
    pub fumble: Option<u32>,
}

/// Rolls a d20 for `actor` with flat `parts`.
///
/// The sheet-wide roll mode always joins the advantage inputs.
pub fn resolve_d20<R>(
    actor: &ActorSnapshot,
    parts: &[Part],
    inputs: &D20Inputs,
    env: &RulesEnv<'_>,
    roller: &mut R,
) -> D20Roll
where
    R: DiceRoller + ?Sized,
{
    let config = env.config();
    let modes = std::iter::once(actor.sheet.roll).chain(inputs.modes.iter().copied());
    let roll_mod = combine_roll_mods(
        inputs
            .mods
            .iter()
            .cloned()
            .chain(std::iter::once(RollMod::with_modes(modes))),
    );
    let crit = inputs.crit.unwrap_or(config.crit);
    let fumble = inputs.fumble.unwrap_or(config.fumble);
    roll_d20(parts, &roll_mod, crit, fumble, roller)
}

/// Rolls `2 + ndice` d20s (at least one) and annotates them.
///
/// Two dice are rolled even for regular rolls so both are on display.
/// Dice parts (bless, bane) are rolled once and shared by every result.
/// The combined modifier's `mcrit` can only widen the crit range.
pub fn roll_d20<R>(
    parts: &[Part],
    roll_mod: &RollMod,
    crit: u32,
    fumble: u32,
    roller: &mut R,
) -> D20Roll
where
    R: DiceRoller + ?Sized,
{
    let count = (2 + roll_mod.ndice).clamp(1, MAX_D20 as i32) as usize;
    let crit = crit.min(roll_mod.mcrit.max(0) as u32);

    let flat = total(parts);
    let mut bonus_dice: i32 = 0;
    let mut tail = String::new();
    for part in parts {
        match part.dice {
            Some(dice) if dice.ndice != 0 => {
                let rolled = sum_rolls(&roll_plain(roller, dice.ndice.unsigned_abs(), dice.die))
                    * dice.ndice.signum();
                bonus_dice = bonus_dice.saturating_add(rolled);
                tail.push_str(&signed(rolled, &format!("{dice} {}", part.name)));
            }
            _ if part.modifier != 0.0 => {
                tail.push_str(&signed(part.modifier.floor() as i32, &part.name));
            }
            _ => {}
        }
    }

    let results = (0..count)
        .map(|_| {
            let die = roll_die(roller, RulesConfig::D20, roll_mod);
            let roll = die.value;
            D20Result {
                total: (roll as i32).saturating_add(flat).saturating_add(bonus_dice),
                breakdown: format!("{roll}{tail}"),
                positive: roll >= crit,
                negative: roll < crit && roll <= fumble,
                grey: false,
                rolls: die.rolls,
                roll,
            }
        })
        .collect();

    let mut roll = D20Roll {
        results,
        mode: roll_mod.effective_mode(),
        crit,
        fumble,
    };
    annotate_advantage(roll.mode, &mut roll.results);
    trace!(mode = %roll.mode, results = roll.results.len(), "d20 rolled");
    roll
}

/// Greys out every result except the highest (advantage) or lowest
/// (disadvantage) total. Ties keep the first.
pub fn annotate_advantage(mode: RollMode, results: &mut [D20Result]) {
    if mode == RollMode::Reg || results.len() < 2 {
        return;
    }
    // max_by_key keeps the last maximum, hence the reversal.
    let keep = match mode {
        RollMode::Adv => results
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, r)| r.total)
            .map(|(i, _)| i),
        RollMode::Dis => results
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.total)
            .map(|(i, _)| i),
        RollMode::Reg => None,
    };
    for (i, result) in results.iter_mut().enumerate() {
        result.grey = Some(i) != keep;
    }
}

/// ` + 3 [Name]` / ` - 1 [Name]`.
pub(crate) fn signed(value: i32, name: &str) -> String {
    let sign = if value < 0 { '-' } else { '+' };
    if name.is_empty() {
        format!(" {sign} {}", value.unsigned_abs())
    } else {
        format!(" {sign} {} [{name}]", value.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::Dice;
    use crate::env::ScriptedRoller;

    #[test]
    fn regular_roll_keeps_both_dice_active() {
        let mut roller = ScriptedRoller::new([7, 12]);
        let roll = roll_d20(&[Part::flat(3, "Mod")], &RollMod::identity(), 20, 1, &mut roller);
        assert_eq!(roll.results.len(), 2);
        assert!(roll.results.iter().all(|r| !r.grey));
        assert_eq!(roll.chosen().map(|r| r.total), Some(10));
        assert_eq!(roll.results[1].breakdown, "12 + 3 [Mod]");
    }

    #[test]
    fn disadvantage_keeps_the_lowest() {
        let mut roller = ScriptedRoller::new([18, 4]);
        let roll_mod = RollMod::with_modes([RollMode::Dis]);
        let roll = roll_d20(&[], &roll_mod, 20, 1, &mut roller);
        assert!(roll.results[0].grey);
        assert_eq!(roll.chosen().map(|r| r.roll), Some(4));
    }

    #[test]
    fn crit_and_fumble_annotations() {
        let mut roller = ScriptedRoller::new([19, 1]);
        let roll_mod = RollMod {
            mcrit: 19,
            ..RollMod::identity()
        };
        let roll = roll_d20(&[], &roll_mod, 20, 1, &mut roller);
        assert!(roll.results[0].positive);
        assert!(roll.results[1].negative);
        assert_eq!(roll.crit, 19);
    }

    #[test]
    fn extra_dice_add_results() {
        let mut roller = ScriptedRoller::new([3, 9, 16]);
        let roll_mod = RollMod {
            ndice: 1,
            mode: vec![RollMode::Adv],
            ..RollMod::identity()
        };
        let roll = roll_d20(&[], &roll_mod, 20, 1, &mut roller);
        assert_eq!(roll.results.len(), 3);
        assert_eq!(roll.chosen().map(|r| r.roll), Some(16));
    }

    #[test]
    fn dice_parts_are_rolled_once() {
        // d4 first, then the two d20s.
        let mut roller = ScriptedRoller::new([3, 10, 11]);
        let bless = Part {
            dice: Some(Dice::new(1, 4)),
            ..Part::flat(0, "Bless")
        };
        let roll = roll_d20(&[bless], &RollMod::identity(), 20, 1, &mut roller);
        assert_eq!(roll.results[0].total, 13);
        assert_eq!(roll.results[1].total, 14);
        assert_eq!(roll.results[0].breakdown, "10 + 3 [1d4 Bless]");
    }
}
