//! Derived statistics for one actor.
//!
//! [`recompute_actor`] is a pure function of the snapshot and the injected
//! environment. Each stage reads the output of the ones before it:
//!
//! 1. component index and active conditions
//! 2. ability scores (score pipeline per ability)
//! 3. proficiency bonus
//! 4. armour class, hit points, speeds
//! 5. initiative, saves, skills, tools, passives
//! 6. spellcasting, resources, defenses
//!
//! Nothing here mutates the snapshot. Cross-actor references are read from
//! cached snapshots through the environment and never recomputed.
mod armour;
mod checks;
mod defenses;
mod pipeline;
mod resources;
mod setter;
mod speed;
mod spellcasting;

use std::collections::BTreeMap;

use tracing::debug;

pub use armour::{base_ac, heavy_armour_too_heavy};
pub use pipeline::Pipeline;
pub use resources::resource_max;
pub use setter::{apply_setter, combine_setters};
pub use speed::{SpeedState, adjust_speed};

use crate::bonus::BonusResolver;
use crate::env::RulesEnv;
use crate::filter::{self, applies_to};
use crate::index::ComponentIndex;
use crate::model::{
    Ability, AbilityScores, ActorKind, ActorSnapshot, ComponentId, Condition, ConditionSet,
    DamageType, ItemId, RuleFlags, SpeedKind, Speeds, ability_modifier,
};

// ============================================================================
// Output
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillStat {
    pub ability: Ability,
    pub modifier: i32,
    pub passive: i32,
    /// Display label of a custom skill.
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolStat {
    pub id: String,
    pub label: String,
    pub ability: Ability,
    pub modifier: i32,
}

/// Spell attack bonus and save DC of one spellcasting class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellcastingStats {
    pub class: ItemId,
    pub ability: Ability,
    pub modifier: i32,
    pub attack: i32,
    pub save: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceStat {
    pub component: ComponentId,
    pub name: String,
    pub max: i32,
    pub remaining: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDefenseStat {
    pub damage: DamageType,
    /// Qualifiers such as "non-magical", empty when unconditional.
    pub magic: String,
    pub material: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Defenses {
    pub resistances: Vec<DamageDefenseStat>,
    pub immunities: Vec<DamageDefenseStat>,
    pub vulnerabilities: Vec<DamageDefenseStat>,
    pub condition_immunities: Vec<Condition>,
    pub disease: bool,
    pub sleep: bool,
    /// Largest flat damage reduction granted.
    pub dr: Option<i32>,
}

/// Everything the sheet displays that is computed rather than stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedActorStats {
    pub abilities: AbilityScores,
    pub ability_mods: BTreeMap<Ability, i32>,
    pub prof: i32,
    pub ac: i32,
    pub hp_max: i32,
    pub speeds: Speeds,
    pub initiative: i32,
    pub saves: BTreeMap<Ability, i32>,
    pub skills: BTreeMap<String, SkillStat>,
    pub tools: Vec<ToolStat>,
    pub spellcasting: Vec<SpellcastingStats>,
    pub conditions: ConditionSet,
    pub exhaustion: u8,
    pub rules: RuleFlags,
    pub resources: Vec<ResourceStat>,
    pub defenses: Defenses,
}

// ============================================================================
// Recompute
// ============================================================================

/// Derives every computed statistic of `actor`.
pub fn recompute_actor(actor: &ActorSnapshot, env: &RulesEnv<'_>) -> DerivedActorStats {
    let index = ComponentIndex::build(actor);
    let conditions = actor.conditions.set()
        | index
            .conditions()
            .iter()
            .map(|c| c.data.condition)
            .collect::<ConditionSet>();

    // Raw stats: ability scores may not reference themselves.
    let resolver = BonusResolver::new(actor, env);

    let abilities = {
        let pipeline = Pipeline::new(&index, &resolver);
        let raw = &actor.abilities;
        let [str, dex, con, int, wis, cha] =
            Ability::ALL.map(|a| pipeline.score(raw.get(a), applies_to::ability_scores(a), None));
        AbilityScores::new(str, dex, con, int, wis, cha)
    };

    let base_prof = actor.base_prof();
    let resolver = resolver.with_stats(abilities.clone(), base_prof);
    let prof = Pipeline::new(&index, &resolver).score(base_prof, filter::is_prof, None);
    let resolver = resolver.with_stats(abilities.clone(), prof);
    let pipeline = Pipeline::new(&index, &resolver);
    let config = env.config();

    let ability_mods: BTreeMap<Ability, i32> = abilities
        .to_map()
        .into_iter()
        .map(|(ability, score)| (ability, ability_modifier(score)))
        .collect();

    let ac = pipeline.score(
        base_ac(actor, abilities.modifier(Ability::Dex), config),
        filter::is_ac,
        actor.attributes.ac.override_value,
    );

    let exhaustion = actor.conditions.exhaustion;
    let mut hp_max = pipeline.score(actor.attributes.hp.max, filter::is_hp, None);
    if exhaustion > 3 {
        hp_max = hp_max.div_euclid(2);
    }

    let mut rules = actor.rules;
    if heavy_armour_too_heavy(actor, abilities.str) {
        rules |= RuleFlags::HEAVY_ARMOUR;
    }
    let speeds = if actor.kind == ActorKind::Vehicle {
        actor.attributes.movement
    } else {
        let state = SpeedState {
            conditions,
            exhaustion,
            rules,
        };
        let mut speeds = Speeds::default();
        for kind in SpeedKind::ALL {
            let raw = actor.attributes.movement.get(kind);
            let value = pipeline.score(raw, applies_to::speed_scores(kind), None);
            speeds.set(kind, adjust_speed(value, state, config));
        }
        speeds
    };

    let basis = checks::CheckBasis {
        actor,
        prof,
        ability_mods: &ability_mods,
    };
    let prof_name = env.localize("RULES.ProfAbbr");
    let initiative = checks::initiative(&pipeline, &basis);
    let saves = checks::saves(&pipeline, &basis, &prof_name);
    let skills = checks::skills(&pipeline, &basis, &prof_name);
    let tools = checks::tools(&pipeline, &basis, &prof_name);

    let spellcasting = spellcasting::spellcasting(&pipeline);
    let resources = resources::resources(&index, resolver.context());
    let defenses = defenses::defenses(&index);

    debug!(actor = %actor.id, ac, hp_max, prof, "recomputed actor");

    DerivedActorStats {
        abilities,
        ability_mods,
        prof,
        ac,
        hp_max,
        speeds,
        initiative,
        saves,
        skills,
        tools,
        spellcasting,
        conditions,
        exhaustion,
        rules,
        resources,
        defenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::data::{
        BonusData, BonusMethod, ConditionData, FilterData, FilterKind, FormulaValue, Multi,
        MultiplierData, ScoreKind,
    };
    use crate::effect::{Component, ComponentKind, Effect, Setter};
    use crate::model::{Item, ItemKind};

    fn score_filter(score: ScoreKind, collection: &[&str]) -> ComponentKind {
        ComponentKind::Filter(FilterData {
            filter: FilterKind::Score,
            score,
            multi: if collection.is_empty() { Multi::Any } else { Multi::Some },
            collection: collection.iter().map(|s| s.to_string()).collect(),
            ..FilterData::default()
        })
    }

    fn flat_bonus(value: f64) -> ComponentKind {
        ComponentKind::Bonus(BonusData {
            formula: true,
            method: BonusMethod::Formula,
            value: None,
            constant: value,
            ..BonusData::default()
        })
    }

    fn effect(id: &str, kinds: Vec<ComponentKind>) -> Effect {
        kinds
            .into_iter()
            .enumerate()
            .fold(Effect::new(id, id), |effect, (i, kind)| {
                effect.with_component(Component::new(format!("{id}-{i}"), kind))
            })
    }

    #[test]
    fn bare_actor_gets_standard_values() {
        let mut actor = ActorSnapshot::new("a", "Commoner");
        actor.attributes.hp.max = 4;
        actor.attributes.movement.walk = 30;
        let stats = recompute_actor(&actor, &RulesEnv::default());

        assert_eq!(stats.ac, 10);
        assert_eq!(stats.hp_max, 4);
        assert_eq!(stats.prof, 2);
        assert_eq!(stats.speeds.walk, 30);
        assert_eq!(stats.skills.len(), 18);
        assert_eq!(stats.skills["prc"].passive, 10);
    }

    #[test]
    fn ability_bonus_feeds_modifiers() {
        let mut actor = ActorSnapshot::new("a", "Belt Wearer");
        actor.effects.push(effect(
            "giant",
            vec![
                score_filter(ScoreKind::Ability, &["str"]),
                ComponentKind::Setter(Setter {
                    score: 21,
                    min: true,
                }),
            ],
        ));
        let stats = recompute_actor(&actor, &RulesEnv::default());
        assert_eq!(stats.abilities.str, 21);
        assert_eq!(stats.ability_mods[&Ability::Str], 5);
        assert_eq!(stats.saves[&Ability::Str], 5);
        assert_eq!(stats.skills["ath"].modifier, 5);
    }

    #[test]
    fn hp_multiplier_then_exhaustion_halving() {
        let mut actor = ActorSnapshot::new("a", "Tough");
        actor.attributes.hp.max = 21;
        actor.conditions.exhaustion = 4;
        actor.effects.push(effect(
            "hp",
            vec![
                score_filter(ScoreKind::MaxHp, &[]),
                flat_bonus(4.0),
                ComponentKind::Multiplier(MultiplierData {
                    multiplier: Some(1.5),
                }),
            ],
        ));
        let stats = recompute_actor(&actor, &RulesEnv::default());
        // (21 + 4) * 1.5 = 37.5 -> 37, halved -> 18
        assert_eq!(stats.hp_max, 18);
    }

    #[test]
    fn condition_components_stop_movement() {
        let mut actor = ActorSnapshot::new("a", "Webbed");
        actor.attributes.movement.walk = 30;
        actor.effects.push(effect(
            "web",
            vec![ComponentKind::Condition(ConditionData {
                condition: Condition::Restrained,
                temp: false,
            })],
        ));
        let stats = recompute_actor(&actor, &RulesEnv::default());
        assert!(stats.conditions.has(Condition::Restrained));
        assert_eq!(stats.speeds.walk, 0);
    }

    #[test]
    fn vehicles_keep_stored_speeds() {
        let mut actor = ActorSnapshot::new("v", "Cart");
        actor.kind = ActorKind::Vehicle;
        actor.attributes.movement.walk = 20;
        actor.conditions.exhaustion = 6;
        let stats = recompute_actor(&actor, &RulesEnv::default());
        assert_eq!(stats.speeds.walk, 20);
    }

    #[test]
    fn prof_bonus_effects_reach_saves() {
        let mut actor = ActorSnapshot::new("a", "Lucky");
        actor.level = 1;
        let proficient = crate::model::SaveEntry {
            proficient: 1.0,
            ..Default::default()
        };
        actor.saves.abilities.insert(Ability::Wis, proficient);
        actor.effects.push(effect(
            "prof",
            vec![score_filter(ScoreKind::Prof, &[]), flat_bonus(1.0)],
        ));
        let stats = recompute_actor(&actor, &RulesEnv::default());
        assert_eq!(stats.prof, 3);
        assert_eq!(stats.saves[&Ability::Wis], 3);
    }

    #[test]
    fn spell_dc_and_attack_per_class() {
        let mut actor = ActorSnapshot::new("a", "Wizard");
        actor.abilities.int = 18;
        let mut class = Item::new("wiz", "Wizard", ItemKind::Class);
        class.class = Some(crate::model::ClassData {
            key: crate::model::ClassKey::Wizard,
            levels: 5,
            spellcasting: None,
        });
        actor.items.push(class);
        actor.effects.push(effect(
            "robe",
            vec![
                score_filter(ScoreKind::Dc, &["spell"]),
                ComponentKind::Bonus(BonusData {
                    formula: true,
                    method: BonusMethod::Formula,
                    value: Some(FormulaValue::Prof),
                    constant: 0.0,
                    ..BonusData::default()
                }),
            ],
        ));
        let stats = recompute_actor(&actor, &RulesEnv::default());
        let wizard = &stats.spellcasting[0];
        assert_eq!(wizard.attack, 3 + 4);
        assert_eq!(wizard.save, 8 + 3 + 4 + 3);
    }
}
