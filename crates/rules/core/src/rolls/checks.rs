//! d20 rolls made from the sheet: ability checks, initiative, saving throws,
//! skill and tool checks.
//!
//! Every roll gathers its roll modifiers first so that bonuses restricted to
//! advantage or disadvantage rolls can be picked up against the settled mode.

use super::context::RollContext;
use super::d20::{D20Roll, roll_d20};
use super::mode::RollMode;
use super::modifier::{RollMod, determine_roll_mods};
use crate::aggregate::Pipeline;
use crate::bonus::{Part, total};
use crate::env::DiceRoller;
use crate::error::RollError;
use crate::filter::{FilterView, applies_to};
use crate::model::{Ability, Skill, SkillEntry};

pub fn roll_ability_check<R>(ctx: &RollContext<'_>, ability: Ability, roller: &mut R) -> D20Roll
where
    R: DiceRoller + ?Sized,
{
    let mut parts = vec![mod_part(ctx, ability)];
    if ctx.actor.skills.joat {
        parts.extend(ctx.prof_part(0.5));
    }
    roll_check(
        ctx,
        parts,
        None,
        &[],
        |mode| applies_to::ability_checks(ability, mode),
        roller,
    )
}

pub fn roll_initiative<R>(ctx: &RollContext<'_>, roller: &mut R) -> D20Roll
where
    R: DiceRoller + ?Sized,
{
    let init = &ctx.actor.attributes.init;
    let parts = vec![
        mod_part(ctx, init.ability),
        Part::flat(init.bonus, ctx.env().localize("RULES.Bonus")),
    ];
    roll_check(
        ctx,
        parts,
        init.override_value,
        &[init.roll],
        |mode| applies_to::initiative(init.ability, mode),
        roller,
    )
}

pub fn roll_saving_throw<R>(ctx: &RollContext<'_>, ability: Ability, roller: &mut R) -> D20Roll
where
    R: DiceRoller + ?Sized,
{
    let settings = &ctx.actor.saves;
    let entry = settings.entry(ability).cloned().unwrap_or_default();

    let mut parts = vec![
        mod_part(ctx, ability),
        Part::flat(
            settings.bonus + entry.bonus,
            ctx.env().localize("RULES.Bonus"),
        ),
    ];
    parts.extend(ctx.prof_part(entry.proficient));

    roll_check(
        ctx,
        parts,
        entry.override_value,
        &[settings.roll, entry.roll],
        |mode| applies_to::saving_throws(ability.as_ref(), mode),
        roller,
    )
}

/// Rolls a built-in or custom skill by key (`prc`, `ath`, ...).
pub fn roll_skill_check<R>(
    ctx: &RollContext<'_>,
    key: &str,
    roller: &mut R,
) -> Result<D20Roll, RollError>
where
    R: DiceRoller + ?Sized,
{
    let settings = &ctx.actor.skills;
    let entry = settings
        .entries
        .get(key)
        .cloned()
        .or_else(|| {
            key.parse::<Skill>()
                .ok()
                .map(|skill| SkillEntry::for_ability(skill.ability()))
        })
        .ok_or_else(|| RollError::UnknownCheck(key.to_owned()))?;

    let parts = check_parts(ctx, entry.ability, entry.value, entry.bonus);
    Ok(roll_check(
        ctx,
        parts,
        entry.override_value,
        &[settings.roll, entry.roll],
        |mode| applies_to::skill_checks(false, key, entry.ability, mode),
        roller,
    ))
}

pub fn roll_tool_check<R>(
    ctx: &RollContext<'_>,
    id: &str,
    roller: &mut R,
) -> Result<D20Roll, RollError>
where
    R: DiceRoller + ?Sized,
{
    let settings = &ctx.actor.skills;
    let tool = settings
        .tools
        .iter()
        .find(|tool| tool.id == id)
        .ok_or_else(|| RollError::UnknownCheck(id.to_owned()))?;

    let parts = check_parts(ctx, tool.ability, tool.value, tool.bonus);
    Ok(roll_check(
        ctx,
        parts,
        tool.override_value,
        &[settings.roll, tool.roll],
        |mode| applies_to::skill_checks(true, id, tool.ability, mode),
        roller,
    ))
}

// ============================================================================
// Shared
// ============================================================================

fn mod_part(ctx: &RollContext<'_>, ability: Ability) -> Part {
    Part::flat(ctx.ability_mod(ability), ctx.env().localize("RULES.Mod"))
}

fn check_parts(ctx: &RollContext<'_>, ability: Ability, value: f64, bonus: i32) -> Vec<Part> {
    let settings = &ctx.actor.skills;
    let mut parts = vec![
        mod_part(ctx, ability),
        Part::flat(settings.bonus + bonus, ctx.env().localize("RULES.Bonus")),
    ];
    let value = if value == 0.0 && settings.joat { 0.5 } else { value };
    parts.extend(ctx.prof_part(value));
    parts
}

/// Rolls `parts` (or the override alone) under the roll modifiers matching
/// `pred`. `modes` join the sheet-wide mode as advantage inputs.
pub(crate) fn roll_check<F, P, R>(
    ctx: &RollContext<'_>,
    parts: Vec<Part>,
    override_value: Option<i32>,
    modes: &[RollMode],
    pred: F,
    roller: &mut R,
) -> D20Roll
where
    F: Fn(Option<RollMode>) -> P,
    P: Fn(&FilterView<'_>) -> bool,
    R: DiceRoller + ?Sized,
{
    let global =
        RollMod::with_modes(std::iter::once(ctx.actor.sheet.roll).chain(modes.iter().copied()));
    let roll_mod = determine_roll_mods(ctx.index(), &global, &pred);

    let parts = match override_value {
        Some(value) => vec![Part::flat(value, ctx.env().localize("RULES.Override"))],
        None => {
            let pred = pred(Some(roll_mod.effective_mode()));
            let parts = ctx.with_bonuses(parts, &pred);
            adjust_to_score(ctx, parts, &pred)
        }
    };

    let config = ctx.env().config();
    roll_d20(&parts, &roll_mod, config.crit, config.fumble, roller)
}

/// Runs multipliers and setters over the flat total, as the sheet does, and
/// records any change as one extra part so dice parts survive.
fn adjust_to_score<P>(ctx: &RollContext<'_>, mut parts: Vec<Part>, pred: &P) -> Vec<Part>
where
    P: Fn(&FilterView<'_>) -> bool,
{
    let pipeline = Pipeline::new(ctx.index(), ctx.resolver());
    let flat = total(&parts);
    let adjusted = pipeline.apply_setters(pred, pipeline.apply_multipliers(pred, flat));
    if adjusted != flat {
        parts.push(Part::flat(
            adjusted - flat,
            ctx.env().localize("RULES.Adjustment"),
        ));
    }
    parts
}
