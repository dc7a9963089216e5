//! Death saving throws.

use super::checks::roll_check;
use super::context::RollContext;
use super::d20::D20Roll;
use crate::bonus::Part;
use crate::config::RulesConfig;
use crate::env::DiceRoller;
use crate::filter::applies_to;
use crate::model::DeathSaves;

/// Tallies at which the creature is stable or dead.
const TALLY_LIMIT: u8 = 3;

/// Result of a death save and the sheet state it leads to.
///
/// The snapshot is never modified; the caller persists `death`, `hp` and
/// the unconscious flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathSaveOutcome {
    pub roll: D20Roll,
    pub success: bool,
    /// Success, Failure, Stable or Deceased, localized.
    pub label: String,
    /// Tally of the kind this save added to, after the save.
    pub tally: u8,
    pub death: DeathSaves,
    pub hp: i32,
    pub clears_unconscious: bool,
}

/// Rolls a death save.
///
/// A natural 1 counts as two failures. A natural 20 resets both tallies and
/// brings the creature back to at least 1 HP.
pub fn resolve_death_save<R>(ctx: &RollContext<'_>, roller: &mut R) -> DeathSaveOutcome
where
    R: DiceRoller + ?Sized,
{
    let actor = ctx.actor;
    let env = ctx.env();
    let death = &actor.death;

    let parts = vec![Part::flat(
        actor.saves.bonus + death.bonus,
        env.localize("RULES.Bonus"),
    )];
    let roll = roll_check(
        ctx,
        parts,
        None,
        &[actor.saves.roll, death.roll],
        applies_to::death_saves,
        roller,
    );

    let (natural, total) = roll.chosen().map_or((0, 0), |r| (r.roll, r.total));
    let success = total >= death.threshold;

    let previous = if success { death.success } else { death.failure };
    let mut tally = previous + 1;
    if natural == 1 {
        tally += 1;
    }
    let tally = tally.min(TALLY_LIMIT);

    let key = match (success, tally >= TALLY_LIMIT) {
        (true, true) => "RULES.Stable",
        (false, true) => "RULES.Deceased",
        (true, false) => "RULES.Success",
        (false, false) => "RULES.Failure",
    };

    let mut next = death.clone();
    let mut hp = actor.attributes.hp.value;
    let revived = natural == RulesConfig::D20;
    if revived {
        next.success = 0;
        next.failure = 0;
        hp = hp.max(1);
    } else if success {
        next.success = tally;
    } else {
        next.failure = tally;
    }

    DeathSaveOutcome {
        roll,
        success,
        label: env.localize(key),
        tally,
        death: next,
        hp,
        clears_unconscious: revived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{RulesEnv, ScriptedRoller};
    use crate::model::ActorSnapshot;

    fn dying() -> ActorSnapshot {
        let mut actor = ActorSnapshot::new("a", "Dying");
        actor.attributes.hp.max = 12;
        actor.attributes.hp.value = 0;
        actor
    }

    fn save(actor: &ActorSnapshot, rolls: [u32; 2]) -> DeathSaveOutcome {
        let env = RulesEnv::default();
        let ctx = RollContext::new(actor, &env);
        resolve_death_save(&ctx, &mut ScriptedRoller::new(rolls))
    }

    #[test]
    fn success_adds_to_the_tally() {
        let outcome = save(&dying(), [12, 3]);
        assert!(outcome.success);
        assert_eq!(outcome.death.success, 1);
        assert_eq!(outcome.label, "RULES.Success");
    }

    #[test]
    fn natural_one_counts_twice() {
        let mut actor = dying();
        actor.death.failure = 1;
        let outcome = save(&actor, [1, 15]);
        assert!(!outcome.success);
        assert_eq!(outcome.tally, 3);
        assert_eq!(outcome.label, "RULES.Deceased");
    }

    #[test]
    fn third_success_stabilises() {
        let mut actor = dying();
        actor.death.success = 2;
        let outcome = save(&actor, [10, 2]);
        assert_eq!(outcome.label, "RULES.Stable");
    }

    #[test]
    fn natural_twenty_revives() {
        let mut actor = dying();
        actor.death.failure = 2;
        actor.death.success = 1;
        let outcome = save(&actor, [20, 5]);
        assert_eq!(outcome.death.success, 0);
        assert_eq!(outcome.death.failure, 0);
        assert_eq!(outcome.hp, 1);
        assert!(outcome.clears_unconscious);
    }
}
