//! Rolling an effect: attacks, damage, save and check DCs, expressions.
//!
//! An effect without filters carries its bonuses, roll modifiers and extra
//! crit dice as local addons to its own rolls. Filtered components are found
//! through the component index like everywhere else.

use tracing::debug;

use super::context::RollContext;
use super::d20::{D20Roll, roll_d20};
use super::damage::{DamageRoll, DamageSpec, roll_damage};
use super::die::roll_plain;
use super::expression::{Expression, ExpressionRoll};
use super::modifier::{RollMod, combine_roll_mods, determine_roll_mods};
use crate::bonus::{Dice, Part};
use crate::effect::data::{
    AttackData, BonusData, CalcMode, CheckData, ConsumeCalc, ConsumeTarget, DamageData,
    ExtraCritData, ResourceLink, SaveData, ScalingMethod,
};
use crate::effect::{ComponentKind, Effect};
use crate::env::{DiceRoller, RulesEnv};
use crate::error::RollError;
use crate::filter::applies_to;
use crate::model::{
    Ability, AbilityRef, ActorSnapshot, ComponentId, DamageType, EffectId, Item, ItemId,
};
use crate::scaling::{Scaling, cantrip_scale, get_scaling, scale_damage};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectRollOptions {
    /// Spell slots above the base level, resource spent, or a breakpoint
    /// value. Cantrips fall back to the character level when unset.
    pub scaled_amount: Option<i32>,
    pub with_duration: bool,
}

/// One chat-ready result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollMessage {
    pub effect: EffectId,
    pub title: String,
    pub body: RollBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollBody {
    Attack {
        /// `mw`, `rw`, `ms` or `rs`.
        key: String,
        roll: D20Roll,
    },
    /// Every damage component of the effect, rolled together.
    Damage(Vec<DamageRoll>),
    Save {
        target: Ability,
        dc: i32,
        /// What happens on a failed save.
        effect: String,
        /// What happens on a successful save.
        save: String,
    },
    Check {
        target: Ability,
        skill: String,
        dc: i32,
    },
    Expression {
        flavour: String,
        roll: ExpressionRoll,
    },
    /// Spends `amount` from a resource, spell slot or item quantity.
    Consume(ResourceUse),
    /// Refills a resource, spell slot or item quantity by `amount`.
    Produce(ResourceUse),
    Description(String),
    Duration {
        rounds: u32,
        concentration: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceUse {
    pub target: ConsumeTarget,
    pub amount: u32,
    /// Spell slot level, for spell targets.
    pub slot: u32,
    /// The linked resource component, when the target has one and it exists.
    pub resource: Option<LinkedResourceRef>,
}

/// Owned identifiers of a resolved resource component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkedResourceRef {
    pub item: Option<ItemId>,
    pub effect: EffectId,
    pub component: ComponentId,
    pub name: String,
    pub remaining: Option<i32>,
}

/// Rolls everything `effect` on `actor` carries.
///
/// Messages come out as attacks, then damage, then save and check DCs,
/// expressions, resource use, the description, and the duration when asked
/// for.
pub fn resolve_effect_roll<R>(
    actor: &ActorSnapshot,
    effect: &EffectId,
    options: &EffectRollOptions,
    env: &RulesEnv<'_>,
    roller: &mut R,
) -> Result<Vec<RollMessage>, RollError>
where
    R: DiceRoller + ?Sized,
{
    let ctx = RollContext::new(actor, env);
    roll_effect(&ctx, effect, options, roller)
}

/// [`resolve_effect_roll`] against an existing context.
pub fn roll_effect<R>(
    ctx: &RollContext<'_>,
    effect: &EffectId,
    options: &EffectRollOptions,
    roller: &mut R,
) -> Result<Vec<RollMessage>, RollError>
where
    R: DiceRoller + ?Sized,
{
    let entry = ctx
        .index()
        .entry(effect)
        .ok_or_else(|| RollError::UnknownEffect(effect.to_string()))?;
    let rolling = EffectRoll {
        ctx,
        effect: entry.effect,
        item: entry.item,
        addons: Addons::of(entry.effect),
    };
    rolling.roll(options, roller)
}

// ============================================================================
// Addons
// ============================================================================

/// Unfiltered bonuses, roll modifiers and extra crit dice of the effect.
#[derive(Default)]
struct Addons<'e> {
    hit: Vec<&'e BonusData>,
    damage: Vec<&'e BonusData>,
    mods: Vec<RollMod>,
    extra_crit: Vec<ExtraCritData>,
}

impl<'e> Addons<'e> {
    fn of(effect: &'e Effect) -> Self {
        let mut addons = Self::default();
        if effect.has_filter() {
            return addons;
        }
        for component in &effect.components {
            match &component.kind {
                ComponentKind::Bonus(data) if data.dmg.enabled => addons.damage.push(data),
                ComponentKind::Bonus(data) => addons.hit.push(data),
                ComponentKind::RollMod(data) => addons.mods.push(RollMod::from(data)),
                ComponentKind::ExtraCrit(data) => addons.extra_crit.push(data.clone()),
                _ => {}
            }
        }
        addons
    }
}

// ============================================================================
// Rolling
// ============================================================================

struct EffectRoll<'c, 'a> {
    ctx: &'c RollContext<'a>,
    effect: &'a Effect,
    item: Option<&'a Item>,
    addons: Addons<'a>,
}

impl EffectRoll<'_, '_> {
    fn title(&self) -> String {
        match self.item {
            Some(item) if self.effect.name.is_empty() => item.name.clone(),
            _ => self.effect.name.clone(),
        }
    }

    fn message(&self, body: RollBody) -> RollMessage {
        RollMessage {
            effect: self.effect.uuid.clone(),
            title: self.title(),
            body,
        }
    }

    fn attacks(&self) -> impl Iterator<Item = &AttackData> {
        self.effect.components.iter().filter_map(|c| match &c.kind {
            ComponentKind::Attack(data) => Some(data),
            _ => None,
        })
    }

    fn roll<R>(
        &self,
        options: &EffectRollOptions,
        roller: &mut R,
    ) -> Result<Vec<RollMessage>, RollError>
    where
        R: DiceRoller + ?Sized,
    {
        let mut attacks = Vec::new();
        let mut dcs = Vec::new();
        let mut expressions = Vec::new();
        let mut usage = Vec::new();
        let mut tail = Vec::new();

        for attack in self.attacks() {
            let roll = self.roll_attack(attack, roller);
            attacks.push(self.message(RollBody::Attack {
                key: attack.key().to_owned(),
                roll,
            }));
        }

        let damage = self.damage_rolls(options, roller);
        if !damage.is_empty() {
            attacks.push(self.message(RollBody::Damage(damage)));
        }

        for component in &self.effect.components {
            match &component.kind {
                ComponentKind::Save(data) => dcs.push(self.message(RollBody::Save {
                    target: data.target,
                    dc: self.save_dc(data),
                    effect: data.effect.clone(),
                    save: data.save.clone(),
                })),
                ComponentKind::Check(data) => dcs.push(self.message(RollBody::Check {
                    target: data.target,
                    skill: data.skill.clone(),
                    dc: self.check_dc(data),
                })),
                ComponentKind::Expression(data) => {
                    let expr: Expression = data.expr.parse()?;
                    expressions.push(self.message(RollBody::Expression {
                        flavour: data.flavour.clone(),
                        roll: expr.roll(roller),
                    }));
                }
                ComponentKind::Consume(data) => usage.push(self.message(RollBody::Consume(
                    self.resource_use(&data.link(), data.calc, data.fixed, data.slot, options),
                ))),
                ComponentKind::Produce(data) => usage.push(self.message(RollBody::Produce(
                    self.resource_use(&data.link(), data.calc, data.fixed, data.slot, options),
                ))),
                ComponentKind::Description(data) => {
                    tail.push(self.message(RollBody::Description(data.raw.clone())));
                }
                ComponentKind::Duration(data) if options.with_duration => {
                    let rounds = match data.ndice {
                        Some(n) if n > 0 => roll_plain(roller, n, data.die)
                            .into_iter()
                            .fold(0, u32::saturating_add),
                        _ => data.duration,
                    };
                    let concentration = data.concentration
                        || self
                            .item
                            .and_then(|item| item.spell.as_ref())
                            .is_some_and(|spell| spell.concentration);
                    tail.push(self.message(RollBody::Duration {
                        rounds,
                        concentration,
                    }));
                }
                _ => {}
            }
        }

        attacks.extend(dcs);
        attacks.extend(expressions);
        attacks.extend(usage);
        attacks.extend(tail);
        Ok(attacks)
    }

    /// Variable amounts take the amount chosen at roll time.
    fn resource_use(
        &self,
        link: &ResourceLink<'_>,
        calc: ConsumeCalc,
        fixed: u32,
        slot: u32,
        options: &EffectRollOptions,
    ) -> ResourceUse {
        let amount = match (calc, options.scaled_amount) {
            (ConsumeCalc::Var, Some(chosen)) => chosen.max(0).unsigned_abs(),
            _ => fixed,
        };
        let resource = self
            .ctx
            .index()
            .linked_resource(&self.effect.uuid, link)
            .map(|linked| LinkedResourceRef {
                item: linked.item.map(|item| item.id.clone()),
                effect: linked.effect.uuid.clone(),
                component: linked.component.uuid.clone(),
                name: if linked.data.name.is_empty() {
                    linked.effect.name.clone()
                } else {
                    linked.data.name.clone()
                },
                remaining: linked.data.remaining,
            });
        if resource.is_none() && !matches!(link.target, ConsumeTarget::Spell | ConsumeTarget::Qty) {
            debug!(reference = link.reference, "linked resource not found");
        }
        ResourceUse {
            target: link.target,
            amount,
            slot,
            resource,
        }
    }

    // ------------------------------------------------------------------------
    // Abilities
    // ------------------------------------------------------------------------

    /// Spellcasting ability and modifier of the class the item belongs to.
    fn spell_ability(&self) -> Option<(Ability, i32)> {
        let class = self.item.and_then(Item::source_class)?;
        let found = self.ctx.spell_ability(class);
        if found.is_none() {
            debug!(class = %class, "spellcasting class not found on actor");
        }
        found
    }

    fn resolve_ability(&self, ability: Option<AbilityRef>) -> Option<(Ability, i32)> {
        match ability? {
            AbilityRef::Spell => self.spell_ability(),
            other => other.ability().map(|a| (a, self.ctx.ability_mod(a))),
        }
    }

    fn ability_mod(&self, ability: Option<AbilityRef>) -> i32 {
        self.resolve_ability(ability).map_or(0, |(_, modifier)| modifier)
    }

    // ------------------------------------------------------------------------
    // DCs
    // ------------------------------------------------------------------------

    fn save_dc(&self, data: &SaveData) -> i32 {
        self.dc(data.calc, data.fixed, data.bonus, data.prof, data.ability)
    }

    fn check_dc(&self, data: &CheckData) -> i32 {
        self.dc(data.calc, data.fixed, data.bonus, data.prof, data.ability)
    }

    /// `bonus + prof * multiplier + ability modifier`, or the fixed value.
    fn dc(
        &self,
        calc: CalcMode,
        fixed: i32,
        bonus: Option<i32>,
        prof: f64,
        ability: Option<AbilityRef>,
    ) -> i32 {
        match calc {
            CalcMode::Fixed => fixed,
            CalcMode::Formula => {
                let base = bonus.unwrap_or(self.ctx.env().config().save_dc_base);
                let prof = (f64::from(self.ctx.stats.prof) * prof).floor() as i32;
                base + prof + self.ability_mod(ability)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Attacks
    // ------------------------------------------------------------------------

    fn attack_ability(&self, attack: &AttackData) -> Option<Ability> {
        self.resolve_ability(attack.ability).map(|(ability, _)| ability)
    }

    fn hit_parts(&self, attack: &AttackData) -> Vec<Part> {
        let env = self.ctx.env();
        let mut parts = vec![Part::flat(attack.bonus, env.localize("RULES.Bonus"))];
        if let Some((ability, modifier)) = self.resolve_ability(attack.ability) {
            parts.push(Part::flat(modifier, env.localize(&ability.abbr_key())));
        }
        if attack.proficient || attack.ability == Some(AbilityRef::Spell) {
            parts.extend(self.ctx.prof_part(1.0));
        }
        let resolver = self.ctx.resolver();
        for bonus in &self.addons.hit {
            parts.extend(resolver.resolve(bonus, self.effect, self.item));
        }
        parts
    }

    fn roll_attack<R>(&self, attack: &AttackData, roller: &mut R) -> D20Roll
    where
        R: DiceRoller + ?Sized,
    {
        let ability = self.attack_ability(attack);
        let global = RollMod::with_modes([self.ctx.actor.sheet.roll]);
        let found = determine_roll_mods(self.ctx.index(), &global, |mode| {
            applies_to::attack_rolls(attack, ability, mode)
        });
        let roll_mod =
            combine_roll_mods(std::iter::once(found).chain(self.addons.mods.iter().cloned()));

        let parts = self.ctx.with_bonuses(
            self.hit_parts(attack),
            applies_to::attack_rolls(attack, ability, Some(roll_mod.effective_mode())),
        );
        let crit = attack.crit_threshold().clamp(1, 20) as u32;
        roll_d20(&parts, &roll_mod, crit, self.ctx.env().config().fumble, roller)
    }

    // ------------------------------------------------------------------------
    // Damage
    // ------------------------------------------------------------------------

    fn damage_name(&self, damage: Option<DamageType>) -> String {
        damage.map_or_else(String::new, |d| self.ctx.env().localize(&d.name_key()))
    }

    /// Damage before bonuses: dice, crit dice and the constant part.
    fn damage_spec(&self, data: &DamageData) -> DamageSpec {
        let name = self.damage_name(data.damage);
        let (dice, ncrit, modifier) = match data.calc {
            CalcMode::Fixed => (None, 0, data.bonus),
            CalcMode::Formula => (
                Some(Dice::new(data.ndice, data.die)),
                data.ndice.saturating_mul(data.crit_multiple()),
                data.bonus + self.ability_mod(data.ability),
            ),
        };
        DamageSpec {
            damage: data.damage,
            dice,
            ncrit,
            parts: vec![Part {
                constant: true,
                ..Part::flat(modifier, name.clone())
            }],
            extra_crit: Vec::new(),
            versatile: data.versatile,
            name,
        }
    }

    fn scaling(&self, options: &EffectRollOptions) -> Option<(Scaling<'_>, i32)> {
        let index = self.ctx.index();
        let id = &self.effect.uuid;
        let children = index.scaling_children(id);
        let (_, first) = children.first()?;

        let level = self.ctx.actor.character_level();
        let (lookup, amount) = match (options.scaled_amount, first.method) {
            (Some(amount), _) => (amount, amount),
            (None, ScalingMethod::Cantrip) => (level as i32, cantrip_scale(level) - 1),
            (None, _) => return None,
        };
        get_scaling(index, id, lookup).map(|scaling| (scaling, amount))
    }

    fn damage_rolls<R>(&self, options: &EffectRollOptions, roller: &mut R) -> Vec<DamageRoll>
    where
        R: DiceRoller + ?Sized,
    {
        let mut specs: Vec<DamageSpec> = self
            .effect
            .components
            .iter()
            .filter_map(|c| match &c.kind {
                ComponentKind::Damage(data) => Some(self.damage_spec(data)),
                _ => None,
            })
            .collect();

        if let Some((scaling, amount)) = self.scaling(options) {
            specs = scale_damage(&scaling, amount, specs, |data| self.damage_spec(data));
        }
        self.add_damage_addons(&mut specs);

        let attack = self
            .attacks()
            .next()
            .map(|attack| (attack, self.attack_ability(attack)));
        let local_mods = if attack.is_none() {
            self.addons.mods.as_slice()
        } else {
            &[]
        };

        specs
            .into_iter()
            .map(|mut spec| {
                let pred = applies_to::damage(attack, spec.damage);
                spec.parts = self.ctx.with_bonuses(std::mem::take(&mut spec.parts), &pred);
                let found = self
                    .ctx
                    .index()
                    .mods(&pred)
                    .into_iter()
                    .map(|m| RollMod::from(m.data));
                let roll_mod = combine_roll_mods(found.chain(local_mods.iter().cloned()));
                roll_damage(&spec, &roll_mod, roller)
            })
            .collect()
    }

    /// Local damage bonuses and extra crit dice.
    ///
    /// A bonus without a damage type adds to the weapon's own damage (and its
    /// versatile alternative). A typed bonus joins the component of that type,
    /// or becomes a damage roll of its own.
    fn add_damage_addons(&self, specs: &mut Vec<DamageSpec>) {
        let resolver = self.ctx.resolver();
        for bonus in &self.addons.damage {
            let parts = resolver.resolve(bonus, self.effect, self.item);
            match bonus.dmg.damage {
                None => {
                    let regular = specs.iter().position(|s| !s.versatile);
                    let versatile = specs.iter().position(|s| s.versatile);
                    for i in [regular, versatile].into_iter().flatten() {
                        specs[i].parts.extend(parts.iter().cloned());
                    }
                }
                Some(damage) => match specs.iter_mut().find(|s| s.damage == Some(damage)) {
                    Some(spec) => spec.parts.extend(parts),
                    None => specs.push(DamageSpec {
                        name: self.damage_name(Some(damage)),
                        damage: Some(damage),
                        parts,
                        ..DamageSpec::default()
                    }),
                },
            }
        }

        if let Some(first) = specs.iter_mut().find(|s| !s.versatile) {
            first.extra_crit.extend(self.addons.extra_crit.iter().cloned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Component;
    use crate::effect::data::{
        AttackCategory, ConsumeData, DamageTag, DescriptionData, DurationData, ExpressionData,
        ProduceData, ResourceData, RollModData, ScalingData,
    };
    use crate::env::ScriptedRoller;
    use crate::model::{ClassData, ClassKey, ItemKind, ItemSource, SourceKind, SpellData};
    use crate::rolls::RollMode;

    fn effect(id: &str, name: &str, kinds: Vec<ComponentKind>) -> Effect {
        kinds
            .into_iter()
            .enumerate()
            .fold(Effect::new(id, name), |effect, (i, kind)| {
                effect.with_component(Component::new(format!("{id}-{i}"), kind))
            })
    }

    fn roll(
        actor: &ActorSnapshot,
        id: &str,
        options: EffectRollOptions,
        dice: Vec<u32>,
    ) -> Vec<RollMessage> {
        let env = RulesEnv::default();
        let mut roller = ScriptedRoller::new(dice);
        resolve_effect_roll(actor, &EffectId::new(id), &options, &env, &mut roller).unwrap()
    }

    fn longsword_wielder() -> ActorSnapshot {
        let mut actor = ActorSnapshot::new("a", "Knight");
        actor.level = 1;
        actor.abilities.str = 16;
        let sword = Item::new("sword", "Longsword", ItemKind::Weapon).with_effect(effect(
            "swing",
            "",
            vec![
                ComponentKind::Attack(AttackData {
                    ability: Some(AbilityRef::Str),
                    proficient: true,
                    ..AttackData::default()
                }),
                ComponentKind::Damage(DamageData {
                    ndice: 1,
                    die: 8,
                    ability: Some(AbilityRef::Str),
                    damage: Some(DamageType::Slashing),
                    ..DamageData::default()
                }),
            ],
        ));
        actor.items.push(sword);
        actor
    }

    #[test]
    fn attack_then_damage() {
        let actor = longsword_wielder();
        let messages = roll(&actor, "swing", EffectRollOptions::default(), vec![12, 9, 6, 2]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].title, "Longsword");

        let RollBody::Attack { key, roll } = &messages[0].body else {
            panic!("expected an attack first");
        };
        assert_eq!(key, "mw");
        // d20 + 3 Str + 2 prof
        assert_eq!(roll.results[0].total, 17);

        let RollBody::Damage(damage) = &messages[1].body else {
            panic!("expected damage second");
        };
        assert_eq!(damage[0].total, 6 + 3);
        assert_eq!(damage[0].crit_total, 6 + 3 + 2);
    }

    #[test]
    fn unfiltered_addons_join_the_effect_rolls() {
        let mut actor = longsword_wielder();
        let flame = ComponentKind::Bonus(BonusData {
            ndice: 2,
            die: 6,
            dmg: DamageTag {
                enabled: true,
                damage: Some(DamageType::Fire),
            },
            ..BonusData::default()
        });
        let advantage = ComponentKind::RollMod(RollModData {
            mode: RollMode::Adv,
            ..RollModData::default()
        });
        actor.items[0].effects[0].components.extend(
            [flame, advantage]
                .into_iter()
                .enumerate()
                .map(|(i, kind)| Component::new(format!("extra-{i}"), kind)),
        );

        let messages = roll(&actor, "swing", EffectRollOptions::default(), vec![4, 15, 5, 1, 3, 2]);
        let RollBody::Attack { roll, .. } = &messages[0].body else {
            panic!("expected an attack");
        };
        assert_eq!(roll.mode, RollMode::Adv);
        assert_eq!(roll.chosen().map(|r| r.roll), Some(15));

        let RollBody::Damage(damage) = &messages[1].body else {
            panic!("expected damage");
        };
        assert_eq!(damage.len(), 2);
        assert_eq!(damage[1].damage, Some(DamageType::Fire));
        assert_eq!(damage[1].total, 3 + 2);
    }

    #[test]
    fn spell_save_dc_uses_the_class_ability() {
        let mut actor = ActorSnapshot::new("a", "Cleric");
        actor.abilities.wis = 16;
        let mut class = Item::new("cleric", "Cleric", ItemKind::Class);
        class.class = Some(ClassData {
            key: ClassKey::Cleric,
            levels: 5,
            spellcasting: None,
        });
        let mut spell = Item::new("flame", "Sacred Flame", ItemKind::Spell).with_effect(effect(
            "flame-e",
            "",
            vec![ComponentKind::Save(SaveData {
                calc: CalcMode::Formula,
                ability: Some(AbilityRef::Spell),
                target: Ability::Dex,
                ..SaveData::default()
            })],
        ));
        spell.source = Some(ItemSource {
            kind: SourceKind::Class,
            class: Some(crate::model::ItemId::new("cleric")),
        });
        actor.items.push(class);
        actor.items.push(spell);

        let messages = roll(&actor, "flame-e", EffectRollOptions::default(), vec![]);
        assert_eq!(
            messages[0].body,
            RollBody::Save {
                target: Ability::Dex,
                dc: 8 + 3 + 3,
                effect: String::new(),
                save: String::new(),
            }
        );
    }

    #[test]
    fn cantrip_breakpoint_replaces_damage() {
        let mut actor = ActorSnapshot::new("a", "Sorcerer");
        actor.level = 5;
        let bolt = |ndice| {
            ComponentKind::Damage(DamageData {
                ndice,
                die: 10,
                damage: Some(DamageType::Fire),
                ..DamageData::default()
            })
        };
        let tier = |id: &str, threshold, ndice| {
            effect(
                id,
                id,
                vec![
                    ComponentKind::Scaling(ScalingData {
                        method: ScalingMethod::Cantrip,
                        threshold: Some(threshold),
                        reference: EffectId::new("bolt"),
                        ..ScalingData::default()
                    }),
                    bolt(ndice),
                ],
            )
        };
        actor.effects = vec![
            effect("bolt", "Fire Bolt", vec![bolt(1)]),
            tier("t5", 5, 2),
            tier("t11", 11, 3),
        ];

        let messages = roll(&actor, "bolt", EffectRollOptions::default(), vec![4, 7, 1, 1]);
        let RollBody::Damage(damage) = &messages[0].body else {
            panic!("expected damage");
        };
        assert_eq!(damage[0].rolls, vec![4, 7]);
    }

    #[test]
    fn expressions_descriptions_and_durations_come_last() {
        let mut actor = ActorSnapshot::new("a", "Druid");
        let mut spell = Item::new("s", "Moonbeam", ItemKind::Spell).with_effect(effect(
            "beam",
            "Moonbeam",
            vec![
                ComponentKind::Duration(DurationData {
                    duration: 10,
                    ..DurationData::default()
                }),
                ComponentKind::Description(DescriptionData {
                    raw: "A silvery beam.".into(),
                }),
                ComponentKind::Expression(ExpressionData {
                    expr: "1d4 + 1".into(),
                    flavour: "Light".into(),
                }),
            ],
        ));
        spell.spell = Some(SpellData {
            level: 2,
            concentration: true,
        });
        actor.items.push(spell);

        let options = EffectRollOptions {
            with_duration: true,
            ..EffectRollOptions::default()
        };
        let messages = roll(&actor, "beam", options, vec![3]);
        assert_eq!(messages.len(), 3);
        assert!(matches!(&messages[0].body, RollBody::Expression { roll, .. } if roll.total == 4));
        assert!(matches!(messages[1].body, RollBody::Description(_)));
        assert_eq!(
            messages[2].body,
            RollBody::Duration {
                rounds: 10,
                concentration: true
            }
        );
    }

    #[test]
    fn bad_expression_and_unknown_effect_are_errors() {
        let mut actor = ActorSnapshot::new("a", "Bard");
        actor.effects.push(effect(
            "e",
            "Mockery",
            vec![ComponentKind::Expression(ExpressionData {
                expr: "d".into(),
                flavour: String::new(),
            })],
        ));
        let env = RulesEnv::default();
        let mut roller = ScriptedRoller::new([]);
        let options = EffectRollOptions::default();

        let err = resolve_effect_roll(&actor, &EffectId::new("e"), &options, &env, &mut roller);
        assert!(matches!(err, Err(RollError::MalformedExpression { .. })));

        let err = resolve_effect_roll(&actor, &EffectId::new("nope"), &options, &env, &mut roller);
        assert_eq!(err, Err(RollError::UnknownEffect("nope".into())));
    }

    #[test]
    fn spell_attacks_are_always_proficient() {
        let mut actor = ActorSnapshot::new("a", "Warlock");
        actor.level = 1;
        actor.effects.push(effect(
            "blast",
            "Eldritch Blast",
            vec![ComponentKind::Attack(AttackData {
                category: AttackCategory::Spell,
                ability: Some(AbilityRef::Spell),
                ..AttackData::default()
            })],
        ));
        let messages = roll(&actor, "blast", EffectRollOptions::default(), vec![10, 10]);
        let RollBody::Attack { key, roll } = &messages[0].body else {
            panic!("expected an attack");
        };
        assert_eq!(key, "ms");
        // No class to cast from: only proficiency.
        assert_eq!(roll.results[0].total, 12);
    }

    #[test]
    fn consumers_and_producers_report_their_resource() {
        let mut actor = ActorSnapshot::new("a", "Monk");
        actor.items.push(Item::new("monk", "Monk", ItemKind::Feat).with_effect(effect(
            "ki",
            "Ki",
            vec![ComponentKind::Resource(ResourceData {
                remaining: Some(3),
                ..ResourceData::default()
            })],
        )));
        actor.effects.push(effect(
            "flurry",
            "Flurry of Blows",
            vec![
                ComponentKind::Description(DescriptionData {
                    raw: "Two unarmed strikes.".into(),
                }),
                ComponentKind::Consume(ConsumeData {
                    target: ConsumeTarget::Feat,
                    feat_id: ItemId::new("monk"),
                    reference: "ki-0".into(),
                    ..ConsumeData::default()
                }),
                ComponentKind::Produce(ProduceData {
                    target: ConsumeTarget::Spell,
                    calc: ConsumeCalc::Var,
                    slot: 2,
                    ..ProduceData::default()
                }),
            ],
        ));

        let options = EffectRollOptions {
            scaled_amount: Some(2),
            ..EffectRollOptions::default()
        };
        let messages = roll(&actor, "flurry", options, vec![]);
        assert_eq!(messages.len(), 3);

        let RollBody::Consume(spent) = &messages[0].body else {
            panic!("expected a consume message, got {:?}", messages[0].body);
        };
        assert_eq!(spent.amount, 1);
        assert_eq!(
            spent.resource,
            Some(LinkedResourceRef {
                item: Some(ItemId::new("monk")),
                effect: EffectId::new("ki"),
                component: ComponentId::new("ki-0"),
                name: "Ki".into(),
                remaining: Some(3),
            })
        );

        assert_eq!(
            messages[1].body,
            RollBody::Produce(ResourceUse {
                target: ConsumeTarget::Spell,
                amount: 2,
                slot: 2,
                resource: None,
            })
        );
        assert!(matches!(messages[2].body, RollBody::Description(_)));
    }
}
