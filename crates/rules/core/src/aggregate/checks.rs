//! Initiative, saving throws, skills, tools and passive scores.

use std::collections::BTreeMap;

use super::pipeline::Pipeline;
use super::{SkillStat, ToolStat};
use crate::bonus::Part;
use crate::filter::applies_to;
use crate::model::{Ability, ActorSnapshot, Skill, SkillEntry};
use crate::rolls::determine_advantage;

/// Derived statistics the check modifiers read.
pub struct CheckBasis<'s> {
    pub actor: &'s ActorSnapshot,
    pub prof: i32,
    pub ability_mods: &'s BTreeMap<Ability, i32>,
}

impl CheckBasis<'_> {
    fn ability_mod(&self, ability: Ability) -> i32 {
        self.ability_mods.get(&ability).copied().unwrap_or(0)
    }

    /// Proficiency part for a multiplier, if it contributes at all.
    fn prof_part(&self, value: f64, name: &str) -> Option<Part> {
        (value > 0.0).then(|| {
            Part::proficiency((value * f64::from(self.prof)).floor(), value, name)
        })
    }
}

pub fn initiative(pipeline: &Pipeline<'_, '_>, basis: &CheckBasis<'_>) -> i32 {
    let init = &basis.actor.attributes.init;
    let base = basis.ability_mod(init.ability) + init.bonus;
    pipeline.score(
        base,
        applies_to::initiative(init.ability, None),
        init.override_value,
    )
}

pub fn saves(
    pipeline: &Pipeline<'_, '_>,
    basis: &CheckBasis<'_>,
    prof_name: &str,
) -> BTreeMap<Ability, i32> {
    let settings = &basis.actor.saves;
    Ability::ALL
        .into_iter()
        .map(|ability| {
            let entry = settings.entry(ability).cloned().unwrap_or_default();
            let mut parts = vec![Part::flat(basis.ability_mod(ability), ability.as_ref())];
            parts.extend(basis.prof_part(entry.proficient, prof_name));
            parts.push(Part::flat(settings.bonus + entry.bonus, ""));

            let value = pipeline.score_parts(
                parts,
                applies_to::saving_throws(ability.as_ref(), None),
                entry.override_value,
            );
            (ability, value)
        })
        .collect()
}

/// Built-in skills are always present; stored entries refine or extend them.
pub fn skills(
    pipeline: &Pipeline<'_, '_>,
    basis: &CheckBasis<'_>,
    prof_name: &str,
) -> BTreeMap<String, SkillStat> {
    let settings = &basis.actor.skills;
    let config = pipeline.resolver().env().config();

    let mut entries: BTreeMap<String, SkillEntry> = Skill::ALL
        .into_iter()
        .map(|skill| (skill.to_string(), SkillEntry::for_ability(skill.ability())))
        .collect();
    for (key, entry) in &settings.entries {
        entries.insert(key.clone(), entry.clone());
    }

    entries
        .into_iter()
        .map(|(key, entry)| {
            let parts = check_parts(basis, entry.ability, entry.value, entry.bonus, prof_name);
            let modifier = pipeline.score_parts(
                parts,
                applies_to::skill_checks(false, &key, entry.ability, None),
                entry.override_value,
            );

            let advantage = determine_advantage([entry.roll, settings.roll]).sign();
            let passive = config.passive_base
                + modifier
                + entry.passive_bonus
                + config.passive_adv_shift * advantage;
            let passive = pipeline.score(passive, applies_to::passive(&key), None);

            let stat = SkillStat {
                ability: entry.ability,
                modifier,
                passive,
                label: entry.label,
            };
            (key, stat)
        })
        .collect()
}

pub fn tools(
    pipeline: &Pipeline<'_, '_>,
    basis: &CheckBasis<'_>,
    prof_name: &str,
) -> Vec<ToolStat> {
    basis
        .actor
        .skills
        .tools
        .iter()
        .map(|tool| {
            let parts = check_parts(basis, tool.ability, tool.value, tool.bonus, prof_name);
            let modifier = pipeline.score_parts(
                parts,
                applies_to::skill_checks(true, &tool.id, tool.ability, None),
                tool.override_value,
            );
            ToolStat {
                id: tool.id.clone(),
                label: tool.label.clone(),
                ability: tool.ability,
                modifier,
            }
        })
        .collect()
}

/// Ability modifier, proficiency (or half proficiency under jack of all
/// trades) and the flat sheet bonuses of a skill or tool check.
fn check_parts(
    basis: &CheckBasis<'_>,
    ability: Ability,
    value: f64,
    bonus: i32,
    prof_name: &str,
) -> Vec<Part> {
    let settings = &basis.actor.skills;
    let mut parts = vec![Part::flat(basis.ability_mod(ability), ability.as_ref())];
    if value > 0.0 {
        parts.extend(basis.prof_part(value, prof_name));
    } else if settings.joat {
        parts.extend(basis.prof_part(0.5, prof_name));
    }
    parts.push(Part::flat(settings.bonus + bonus, ""));
    parts
}
