//! Damage rolls: dice under roll modifiers, flat parts and crit dice.

use super::d20::signed;
use super::die::{MAX_DICE, roll_die, roll_plain, sum_rolls};
use super::modifier::RollMod;
use crate::bonus::{Dice, Part, total};
use crate::effect::data::ExtraCritData;
use crate::env::DiceRoller;
use crate::model::DamageType;

/// A damage component resolved against an actor, ready to roll.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSpec {
    pub name: String,
    pub damage: Option<DamageType>,
    /// `None` for fixed damage.
    pub dice: Option<Dice>,
    /// Extra dice rolled on a critical hit.
    pub ncrit: i32,
    /// Flat and bonus-dice parts. The component's own bonus is the part
    /// marked `constant`.
    pub parts: Vec<Part>,
    pub extra_crit: Vec<ExtraCritData>,
    pub versatile: bool,
}

impl DamageSpec {
    pub fn constant_mut(&mut self) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.constant)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub name: String,
    pub damage: Option<DamageType>,
    pub versatile: bool,
    /// Values of the component's own dice.
    pub rolls: Vec<u32>,
    /// Values of the extra dice rolled in case of a critical.
    pub crit_rolls: Vec<u32>,
    pub total: i32,
    /// Total if the attack was a critical hit.
    pub crit_total: i32,
    pub breakdown: String,
}

/// Rolls every die of `spec`. Crit dice are always rolled so the result
/// can be shown either way.
pub fn roll_damage<R>(spec: &DamageSpec, roll_mod: &RollMod, roller: &mut R) -> DamageRoll
where
    R: DiceRoller + ?Sized,
{
    let mut breakdown = String::new();
    let mut rolls = Vec::new();

    if let Some(dice) = spec.dice.filter(|d| d.ndice > 0) {
        rolls = (0..clamp_dice(dice.ndice))
            .map(|_| roll_die(roller, dice.die, roll_mod).value)
            .collect();
        breakdown = format!("{} [{dice}]", sum_rolls(&rolls));
    }
    let mut sum = sum_rolls(&rolls);

    for part in &spec.parts {
        match part.dice {
            Some(dice) if dice.ndice != 0 => {
                let rolled = sum_rolls(&roll_plain(roller, dice.ndice.unsigned_abs(), dice.die))
                    * dice.ndice.signum();
                sum = sum.saturating_add(rolled);
                breakdown.push_str(&signed(rolled, &format!("{dice} {}", part.name)));
            }
            _ if part.modifier != 0.0 => {
                breakdown.push_str(&signed(part.modifier.floor() as i32, &part.name));
            }
            _ => {}
        }
    }
    let total = sum.saturating_add(total(&spec.parts)).max(0);

    let mut crit_rolls = Vec::new();
    if let Some(dice) = spec.dice.filter(|_| spec.ncrit > 0) {
        crit_rolls.extend(
            (0..clamp_dice(spec.ncrit)).map(|_| roll_die(roller, dice.die, roll_mod).value),
        );
    }
    let mut crit_bonus: i32 = 0;
    for extra in &spec.extra_crit {
        if extra.ndice > 0 {
            crit_rolls.extend(roll_plain(roller, extra.ndice as u32, extra.die));
        }
        crit_bonus = crit_bonus.saturating_add(extra.bonus);
    }
    let crit_total = total
        .saturating_add(sum_rolls(&crit_rolls))
        .saturating_add(crit_bonus);

    let breakdown = breakdown.trim_start_matches([' ', '+']).to_owned();
    DamageRoll {
        name: spec.name.clone(),
        damage: spec.damage,
        versatile: spec.versatile,
        rolls,
        crit_rolls,
        total,
        crit_total,
        breakdown,
    }
}

fn clamp_dice(ndice: i32) -> u32 {
    ndice.max(0).unsigned_abs().min(MAX_DICE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRoller;

    fn longsword() -> DamageSpec {
        DamageSpec {
            name: "Longsword".into(),
            damage: Some(DamageType::Slashing),
            dice: Some(Dice::new(1, 8)),
            ncrit: 1,
            parts: vec![Part {
                constant: true,
                ..Part::flat(3, "Str")
            }],
            ..DamageSpec::default()
        }
    }

    #[test]
    fn normal_and_crit_totals() {
        let mut roller = ScriptedRoller::new([5, 7]);
        let roll = roll_damage(&longsword(), &RollMod::identity(), &mut roller);
        assert_eq!(roll.rolls, vec![5]);
        assert_eq!(roll.total, 8);
        assert_eq!(roll.crit_rolls, vec![7]);
        assert_eq!(roll.crit_total, 15);
        assert_eq!(roll.breakdown, "5 [1d8] + 3 [Str]");
    }

    #[test]
    fn reroll_applies_to_damage_dice() {
        let roll_mod = RollMod {
            reroll: 3,
            ..RollMod::identity()
        };
        let mut roller = ScriptedRoller::new([1, 6, 8]);
        let roll = roll_damage(&longsword(), &roll_mod, &mut roller);
        assert_eq!(roll.rolls, vec![6]);
    }

    #[test]
    fn extra_crit_dice_only_count_on_crits() {
        let mut spec = longsword();
        spec.extra_crit.push(ExtraCritData {
            ndice: 1,
            die: 6,
            bonus: 2,
        });
        let mut roller = ScriptedRoller::new([4, 4, 6]);
        let roll = roll_damage(&spec, &RollMod::identity(), &mut roller);
        assert_eq!(roll.total, 7);
        assert_eq!(roll.crit_total, 7 + 4 + 6 + 2);
    }

    #[test]
    fn damage_never_goes_negative() {
        let spec = DamageSpec {
            dice: Some(Dice::new(1, 4)),
            parts: vec![Part::flat(-3, "Penalty")],
            ..DamageSpec::default()
        };
        let mut roller = ScriptedRoller::new([1]);
        assert_eq!(roll_damage(&spec, &RollMod::identity(), &mut roller).total, 0);
    }

    #[test]
    fn runaway_dice_counts_are_clamped() {
        let spec = DamageSpec {
            dice: Some(Dice::new(2_000_000_000, 6)),
            ncrit: 2_000_000_000,
            ..longsword()
        };
        let mut roller = ScriptedRoller::new([]).with_fallback(6);
        let roll = roll_damage(&spec, &RollMod::identity(), &mut roller);
        assert_eq!(roll.rolls.len(), MAX_DICE as usize);
        assert_eq!(roll.crit_rolls.len(), MAX_DICE as usize);
        assert_eq!(roll.total, 6 * 100 + 3);
        assert_eq!(roll.crit_total, 6 * 200 + 3);
    }
}
