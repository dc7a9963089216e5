//! Spending hit dice during a rest.

use super::context::RollContext;
use super::die::{roll_plain, sum_rolls};
use crate::bonus::Dice;
use crate::env::DiceRoller;
use crate::model::Ability;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitDiceRoll {
    /// Results per spent pool, in the order given.
    pub rolls: Vec<Vec<u32>>,
    /// Constitution modifier added once per die.
    pub con_bonus: i32,
    pub total: i32,
    /// `2d10+1d8 + 6 = (3+7) + (5) + 6`
    pub breakdown: String,
}

/// Rolls the hit dice spent from each pool. Every die adds the actor's
/// Constitution modifier. Pools with no dice are skipped.
pub fn roll_hit_dice<R>(ctx: &RollContext<'_>, spent: &[Dice], roller: &mut R) -> HitDiceRoll
where
    R: DiceRoller + ?Sized,
{
    let spent: Vec<Dice> = spent.iter().copied().filter(|d| d.ndice > 0).collect();
    let rolls: Vec<Vec<u32>> = spent
        .iter()
        .map(|dice| roll_plain(roller, dice.ndice.unsigned_abs(), dice.die))
        .collect();

    let count: i32 = rolls.iter().map(|r| r.len() as i32).sum();
    let con_bonus = ctx.ability_mod(Ability::Con).saturating_mul(count);
    let total = rolls
        .iter()
        .map(|r| sum_rolls(r))
        .fold(con_bonus, i32::saturating_add);

    let formula = spent
        .iter()
        .map(Dice::to_string)
        .collect::<Vec<_>>()
        .join("+");
    let results = rolls
        .iter()
        .map(|r| {
            let faces = r.iter().map(u32::to_string).collect::<Vec<_>>().join("+");
            format!("({faces})")
        })
        .collect::<Vec<_>>()
        .join(" + ");
    let sign = if con_bonus < 0 { '-' } else { '+' };
    let bonus = con_bonus.unsigned_abs();
    let breakdown = format!("{formula} {sign} {bonus} = {results} {sign} {bonus}");

    HitDiceRoll {
        rolls,
        con_bonus,
        total,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{RulesEnv, ScriptedRoller};
    use crate::model::ActorSnapshot;

    #[test]
    fn every_die_adds_the_con_modifier() {
        let mut actor = ActorSnapshot::new("a", "Fighter Wizard");
        actor.abilities.con = 14;
        let env = RulesEnv::default();
        let ctx = RollContext::new(&actor, &env);
        let mut roller = ScriptedRoller::new([3, 7, 5]);

        let roll = roll_hit_dice(&ctx, &[Dice::new(2, 10), Dice::new(1, 6)], &mut roller);
        assert_eq!(roll.rolls, vec![vec![3, 7], vec![5]]);
        assert_eq!(roll.con_bonus, 6);
        assert_eq!(roll.total, 3 + 7 + 5 + 6);
        assert_eq!(roll.breakdown, "2d10+1d6 + 6 = (3+7) + (5) + 6");
    }

    #[test]
    fn low_constitution_subtracts_and_empty_pools_are_skipped() {
        let mut actor = ActorSnapshot::new("a", "Frail");
        actor.abilities.con = 8;
        let env = RulesEnv::default();
        let ctx = RollContext::new(&actor, &env);
        let mut roller = ScriptedRoller::new([4]);

        let roll = roll_hit_dice(&ctx, &[Dice::new(0, 10), Dice::new(1, 8)], &mut roller);
        assert_eq!(roll.rolls, vec![vec![4]]);
        assert_eq!(roll.total, 3);
        assert_eq!(roll.breakdown, "1d8 - 1 = (4) - 1");
    }
}
