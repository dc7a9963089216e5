//! Bonus component → [`Part`] resolution.

use tracing::debug;

use super::part::{Dice, Part};
use crate::effect::data::{BonusData, BonusMethod, BonusOperator, FormulaValue, LevelKey};
use crate::effect::Effect;
use crate::env::RulesEnv;
use crate::error::ResolveError;
use crate::index::BonusRef;
use crate::model::{
    Ability, AbilityRef, AbilityScores, ActorSnapshot, ComponentId, Item, ability_modifier,
};

/// The statistics a bonus is computed against.
#[derive(Clone, Debug)]
pub struct ActorContext<'a> {
    pub actor: &'a ActorSnapshot,
    pub abilities: AbilityScores,
    pub prof: i32,
}

impl<'a> ActorContext<'a> {
    /// Stored scores and level-derived proficiency, without effects. Used for
    /// other actors so that resolution never recomputes them.
    pub fn raw(actor: &'a ActorSnapshot) -> Self {
        Self {
            actor,
            abilities: actor.abilities.clone(),
            prof: actor.base_prof(),
        }
    }

    pub fn ability_mod(&self, ability: Ability) -> i32 {
        ability_modifier(self.abilities.get(ability))
    }

    /// Modifier of the spellcasting ability of a class item on this actor.
    fn class_spell_mod(&self, class: &crate::model::ItemId) -> Option<i32> {
        self.actor
            .item(class)
            .and_then(|item| item.class.as_ref())
            .and_then(|class| class.spell_ability())
            .map(|ability| self.ability_mod(ability))
    }
}

/// Resolves bonuses owned by one actor.
///
/// Holds the actor's current derived statistics; recomputation refreshes them
/// with [`BonusResolver::with_stats`] as abilities and proficiency settle.
pub struct BonusResolver<'a> {
    own: ActorContext<'a>,
    env: &'a RulesEnv<'a>,
}

impl<'a> BonusResolver<'a> {
    pub fn new(actor: &'a ActorSnapshot, env: &'a RulesEnv<'a>) -> Self {
        Self {
            own: ActorContext::raw(actor),
            env,
        }
    }

    pub fn with_stats(mut self, abilities: AbilityScores, prof: i32) -> Self {
        self.own.abilities = abilities;
        self.own.prof = prof;
        self
    }

    pub fn context(&self) -> &ActorContext<'a> {
        &self.own
    }

    pub fn env(&self) -> &'a RulesEnv<'a> {
        self.env
    }

    /// Parts contributed by every bonus, concatenated in input order.
    pub fn parts_of(&self, bonuses: &[BonusRef<'a>]) -> Vec<Part> {
        bonuses.iter().flat_map(|b| self.bonus_to_parts(*b)).collect()
    }

    /// Converts one bonus into additive parts.
    ///
    /// Unresolvable cross-actor references yield no parts.
    pub fn bonus_to_parts(&self, bonus: BonusRef<'a>) -> Vec<Part> {
        self.resolve(bonus.data, bonus.effect, bonus.item)
    }

    /// Same as [`bonus_to_parts`](Self::bonus_to_parts) for a bonus that is
    /// not wrapped in a filter query result.
    pub fn resolve(&self, data: &BonusData, effect: &Effect, item: Option<&Item>) -> Vec<Part> {
        let mut foreign: Option<&ActorSnapshot> = None;

        if effect.active_effect {
            if let Some(link) = item.and_then(|item| item.duration.as_ref()) {
                match self.lookup(&link.uuid) {
                    Some(source) => foreign = Some(source),
                    None => return Vec::new(),
                }
            }
        }

        let mut summoning_item = None;
        let current = foreign.unwrap_or(self.own.actor);
        if (!data.formula || data.method == BonusMethod::Formula) && data.summoner {
            if let Some(summon) = &current.summon {
                let Some(summoner) = self.lookup(&summon.summoner) else {
                    return Vec::new();
                };
                summoning_item = find_owning_item(summoner, &summon.parent_component);
                foreign = Some(summoner);
            }
        }

        let ctx = match foreign {
            Some(actor) => ActorContext::raw(actor),
            None => self.own.clone(),
        };

        let builder = PartBuilder {
            ctx: &ctx,
            own: self.own.actor,
            data,
            name: bonus_name(data, effect, item),
            owning_item: item,
            summoning_item,
            env: self.env,
        };
        builder.build()
    }

    fn lookup(&self, reference: &crate::model::SnapshotRef) -> Option<&'a ActorSnapshot> {
        let found = self
            .env
            .snapshots()
            .and_then(|snapshots| snapshots.resolve(reference));
        if found.is_none() {
            let err = ResolveError::UnresolvedReference(reference.to_string());
            debug!(%err, "bonus contributes nothing");
        }
        found
    }
}

/// Bonus name, else effect name, else item name.
fn bonus_name(data: &BonusData, effect: &Effect, item: Option<&Item>) -> String {
    [Some(data.name.as_str()), Some(effect.name.as_str()), item.map(|i| i.name.as_str())]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or_default()
        .to_owned()
}

fn find_owning_item<'s>(actor: &'s ActorSnapshot, component: &ComponentId) -> Option<&'s Item> {
    actor.items.iter().find(|item| {
        item.effects
            .iter()
            .any(|e| e.components.iter().any(|c| &c.uuid == component))
    })
}

struct PartBuilder<'b, 'a> {
    ctx: &'b ActorContext<'b>,
    own: &'a ActorSnapshot,
    data: &'b BonusData,
    name: String,
    owning_item: Option<&'b Item>,
    summoning_item: Option<&'b Item>,
    env: &'a RulesEnv<'a>,
}

impl PartBuilder<'_, '_> {
    fn build(self) -> Vec<Part> {
        let data = self.data;
        let mut parts = Vec::new();

        if data.formula {
            match data.method {
                BonusMethod::Dice => parts.push(self.dice(f64::from(data.bonus))),
                BonusMethod::Formula => {
                    let (multiplier, constant) = match data.operator {
                        BonusOperator::Plus => (1.0, data.constant),
                        BonusOperator::Mult => (data.constant, 0.0),
                    };
                    match data.value {
                        Some(FormulaValue::Prof) => parts.push(self.prof(
                            multiplier * f64::from(self.ctx.prof) + constant,
                            multiplier,
                            &data.name,
                        )),
                        Some(FormulaValue::Abl) => parts.push(self.ability(multiplier, constant)),
                        Some(FormulaValue::Chr) => {
                            parts.extend(self.level(LevelKey::Chr, multiplier, constant))
                        }
                        Some(FormulaValue::Cls) => {
                            parts.extend(self.level(LevelKey::Cls, multiplier, constant))
                        }
                        None if constant != 0.0 => {
                            parts.push(Part::flat(constant, self.name.clone()))
                        }
                        None => {}
                    }
                }
            }
        } else {
            if data.ndice != 0 {
                parts.push(self.dice(0.0));
            }
            if let Some(prof) = data.prof.filter(|p| *p != 0.0) {
                parts.push(self.prof(prof * f64::from(self.ctx.prof), prof, ""));
            }
            if let Some(key) = data.level {
                parts.extend(self.level(key, 1.0, 0.0));
            }
        }

        parts
    }

    fn dice(&self, modifier: f64) -> Part {
        let data = self.data;
        Part {
            dice: Some(Dice::new(data.ndice, data.die)),
            damage: data.dmg.enabled.then_some(data.dmg.damage).flatten(),
            ..Part::flat(modifier, self.name.clone())
        }
    }

    fn prof(&self, modifier: f64, value: f64, name: &str) -> Part {
        let name = if name.is_empty() {
            self.env.localize("RULES.ProfAbbr")
        } else {
            name.to_owned()
        };
        Part::proficiency(modifier.floor(), value, name)
    }

    fn ability(&self, multiplier: f64, constant: f64) -> Part {
        let data = self.data;
        let modifier = match data.ability {
            Some(AbilityRef::Spell) => self.spell_mod(),
            Some(ability) => ability.ability().map_or(0, |a| self.ctx.ability_mod(a)),
            None => 0,
        };
        let name = match data.ability {
            Some(ability) if data.name.is_empty() => {
                self.env.localize(&format!("RULES.AbilityAbbr.{ability}"))
            }
            _ => self.name.clone(),
        };
        Part::flat((multiplier * f64::from(modifier) + constant).floor(), name)
    }

    /// `spell` resolves through the summoning item when summoned, otherwise
    /// through the class the owning item was granted by.
    fn spell_mod(&self) -> i32 {
        let class_mod = |item: Option<&Item>, holder: &ActorContext<'_>| {
            item.and_then(Item::source_class)
                .and_then(|class| holder.class_spell_mod(class))
        };
        match self.summoning_item {
            Some(item) => class_mod(Some(item), self.ctx),
            None => class_mod(self.owning_item, self.ctx),
        }
        .unwrap_or(0)
    }

    fn level(&self, key: LevelKey, multiplier: f64, constant: f64) -> Option<Part> {
        let level = match key {
            LevelKey::Chr => Some(self.ctx.actor.character_level()),
            LevelKey::Cls => self
                .data
                .class
                .as_ref()
                .and_then(|class| self.own.class_level(class)),
        }
        .filter(|level| *level > 0)?;

        Some(Part::flat(
            (multiplier * f64::from(level) + constant).floor(),
            self.name.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::data::DamageTag;
    use crate::effect::data::DescriptionData;
    use crate::effect::{Component, ComponentKind};
    use crate::env::{KeyLocalization, NoSnapshots, SnapshotOracle};
    use crate::model::{
        ClassData, ClassKey, DamageType, DurationLink, ItemId, ItemKind, ItemSource, SnapshotRef,
        SourceKind, SummonLink,
    };

    /// Other actors keyed by reference.
    struct Cached(Vec<(SnapshotRef, ActorSnapshot)>);

    impl SnapshotOracle for Cached {
        fn resolve(&self, reference: &SnapshotRef) -> Option<&ActorSnapshot> {
            self.0.iter().find(|(r, _)| r == reference).map(|(_, a)| a)
        }
    }

    fn abl_bonus(ability: AbilityRef) -> BonusData {
        BonusData {
            formula: true,
            method: BonusMethod::Formula,
            value: Some(FormulaValue::Abl),
            ability: Some(ability),
            ..BonusData::default()
        }
    }

    /// A level 5 wizard whose Find Familiar spell carries `summon-c`.
    fn wizard() -> ActorSnapshot {
        let mut wizard = ActorSnapshot::new("wiz", "Wizard");
        wizard.abilities.int = 18;
        wizard.abilities.str = 8;
        let mut class = Item::new("wiz-cls", "Wizard", ItemKind::Class);
        class.class = Some(ClassData {
            key: ClassKey::Wizard,
            levels: 5,
            spellcasting: None,
        });
        wizard.items.push(class);
        let mut spell = Item::new("ff", "Find Familiar", ItemKind::Spell).with_effect(
            Effect::new("ff-e", "Find Familiar").with_component(Component::new(
                "summon-c",
                ComponentKind::Description(DescriptionData::default()),
            )),
        );
        spell.source = Some(ItemSource {
            kind: SourceKind::Class,
            class: Some(ItemId::new("wiz-cls")),
        });
        wizard.items.push(spell);
        wizard
    }

    fn env() -> RulesEnv<'static> {
        RulesEnv::from_parts(&KeyLocalization, &NoSnapshots, &crate::config::STANDARD_CONFIG)
    }

    fn fighter() -> ActorSnapshot {
        let mut actor = ActorSnapshot::new("a", "Fighter");
        actor.abilities.str = 16;
        actor.level = 5;
        actor
    }

    #[test]
    fn formula_ability_bonus() {
        let actor = fighter();
        let env = env();
        let resolver = BonusResolver::new(&actor, &env);
        let bonus = BonusData {
            formula: true,
            method: BonusMethod::Formula,
            value: Some(FormulaValue::Abl),
            ability: Some(AbilityRef::Str),
            operator: BonusOperator::Plus,
            constant: 1.0,
            ..BonusData::default()
        };
        let parts = resolver.resolve(&bonus, &Effect::default(), None);
        assert_eq!(parts, vec![Part::flat(4, "RULES.AbilityAbbr.str")]);
    }

    #[test]
    fn mult_prof_bonus_is_floored_per_part() {
        let actor = fighter();
        let env = env();
        let resolver = BonusResolver::new(&actor, &env);
        let bonus = BonusData {
            formula: true,
            method: BonusMethod::Formula,
            value: Some(FormulaValue::Prof),
            operator: BonusOperator::Mult,
            constant: 0.5,
            ..BonusData::default()
        };
        let parts = resolver.resolve(&bonus, &Effect::new("e", "Remarkable Athlete"), None);
        assert_eq!(parts, vec![Part::proficiency(1, 0.5, "RULES.ProfAbbr")]);
    }

    #[test]
    fn lightweight_bonus_emits_dice_prof_and_level() {
        let mut actor = fighter();
        let mut class = Item::new("cls", "Fighter", ItemKind::Class);
        class.class = Some(ClassData {
            key: ClassKey::Fighter,
            levels: 5,
            spellcasting: None,
        });
        actor.items.push(class);
        let env = env();
        let resolver = BonusResolver::new(&actor, &env);
        let bonus = BonusData {
            ndice: 1,
            die: 6,
            prof: Some(1.0),
            level: Some(LevelKey::Cls),
            class: Some(ItemId::new("cls")),
            dmg: DamageTag {
                enabled: true,
                damage: Some(DamageType::Fire),
            },
            ..BonusData::default()
        };
        let item = Item::new("w", "Flame Tongue", ItemKind::Weapon);
        let parts = resolver.resolve(&bonus, &Effect::default(), Some(&item));

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].dice, Some(Dice::new(1, 6)));
        assert_eq!(parts[0].damage, Some(DamageType::Fire));
        assert_eq!(parts[0].name, "Flame Tongue");
        assert_eq!(parts[1].modifier, 3.0);
        assert!(parts[1].is_proficiency());
        assert_eq!(parts[2].modifier, 5.0);
    }

    #[test]
    fn spell_ability_uses_the_granting_class() {
        let mut actor = fighter();
        actor.abilities.wis = 18;
        let mut class = Item::new("clr", "Cleric", ItemKind::Class);
        class.class = Some(ClassData {
            key: ClassKey::Cleric,
            levels: 1,
            spellcasting: None,
        });
        actor.items.push(class);
        let mut feature = Item::new("f", "Channel Divinity", ItemKind::Feat);
        feature.source = Some(ItemSource {
            kind: SourceKind::Class,
            class: Some(ItemId::new("clr")),
        });

        let env = env();
        let resolver = BonusResolver::new(&actor, &env);
        let bonus = BonusData {
            formula: true,
            method: BonusMethod::Formula,
            value: Some(FormulaValue::Abl),
            ability: Some(AbilityRef::Spell),
            ..BonusData::default()
        };
        let parts = resolver.resolve(&bonus, &Effect::default(), Some(&feature));
        assert_eq!(parts[0].modifier, 4.0);
    }

    #[test]
    fn unresolved_duration_source_contributes_nothing() {
        let actor = fighter();
        let env = env();
        let resolver = BonusResolver::new(&actor, &env);
        let mut item = Item::new("d", "Bless", ItemKind::Spell);
        item.duration = Some(crate::model::DurationLink {
            uuid: "Actor.missing".parse().unwrap(),
            remaining: None,
        });
        let mut effect = Effect::new("e", "Bless");
        effect.active_effect = true;
        let bonus = BonusData {
            ndice: 1,
            die: 4,
            ..BonusData::default()
        };
        assert!(resolver.resolve(&bonus, &effect, Some(&item)).is_empty());
    }

    #[test]
    fn summoner_bonuses_read_the_summoner() {
        let cache = Cached(vec![("Actor.wiz".parse().unwrap(), wizard())]);
        let env = RulesEnv::from_parts(&KeyLocalization, &cache, &crate::config::STANDARD_CONFIG);

        let mut owl = ActorSnapshot::new("owl", "Owl");
        owl.abilities.str = 3;
        owl.summon = Some(SummonLink {
            summoner: "Actor.wiz".parse().unwrap(),
            parent_component: ComponentId::new("summon-c"),
        });
        let resolver = BonusResolver::new(&owl, &env);
        let effect = Effect::new("bond", "Familiar Bond");

        let spell = BonusData {
            summoner: true,
            ..abl_bonus(AbilityRef::Spell)
        };
        let parts = resolver.resolve(&spell, &effect, None);
        assert_eq!(parts, vec![Part::flat(4, "RULES.AbilityAbbr.spell")]);

        let strength = BonusData {
            summoner: true,
            ..abl_bonus(AbilityRef::Str)
        };
        assert_eq!(resolver.resolve(&strength, &effect, None)[0].modifier, -1.0);

        // Without the flag the owl's own scores apply.
        let own = resolver.resolve(&abl_bonus(AbilityRef::Str), &effect, None);
        assert_eq!(own[0].modifier, -4.0);
    }

    #[test]
    fn missing_summoner_contributes_nothing() {
        let mut owl = ActorSnapshot::new("owl", "Owl");
        owl.summon = Some(SummonLink {
            summoner: "Actor.wiz".parse().unwrap(),
            parent_component: ComponentId::new("summon-c"),
        });
        let env = env();
        let resolver = BonusResolver::new(&owl, &env);
        let bonus = BonusData {
            summoner: true,
            ..abl_bonus(AbilityRef::Spell)
        };
        assert!(resolver.resolve(&bonus, &Effect::default(), None).is_empty());
    }

    #[test]
    fn duration_effects_read_the_token_that_applied_them() {
        let mut paladin = ActorSnapshot::new("pal", "Paladin");
        paladin.abilities.cha = 16;
        let token: SnapshotRef = "Scene.s1.Token.t1".parse().unwrap();
        let cache = Cached(vec![(token.clone(), paladin)]);
        let env = RulesEnv::from_parts(&KeyLocalization, &cache, &crate::config::STANDARD_CONFIG);

        let actor = fighter();
        let resolver = BonusResolver::new(&actor, &env);
        let mut item = Item::new("d", "Aura of Protection", ItemKind::Feat);
        item.duration = Some(DurationLink {
            uuid: token,
            remaining: None,
        });
        let mut effect = Effect::new("e", "Aura of Protection");
        let bonus = abl_bonus(AbilityRef::Cha);

        // Only duration effects are re-pointed.
        assert_eq!(resolver.resolve(&bonus, &effect, Some(&item))[0].modifier, 0.0);

        effect.active_effect = true;
        let parts = resolver.resolve(&bonus, &effect, Some(&item));
        assert_eq!(parts, vec![Part::flat(3, "RULES.AbilityAbbr.cha")]);
    }

    #[test]
    fn unnamed_ability_part_falls_back_to_the_bonus_name() {
        let actor = fighter();
        let env = env();
        let resolver = BonusResolver::new(&actor, &env);
        let bonus = BonusData {
            formula: true,
            method: BonusMethod::Formula,
            value: Some(FormulaValue::Abl),
            constant: 2.0,
            ..BonusData::default()
        };
        let parts = resolver.resolve(&bonus, &Effect::new("e", "Lucky Charm"), None);
        assert_eq!(parts, vec![Part::flat(2, "Lucky Charm")]);
    }
}
