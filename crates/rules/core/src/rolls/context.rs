use crate::aggregate::{DerivedActorStats, recompute_actor};
use crate::bonus::{BonusResolver, Part, highest_proficiency};
use crate::env::RulesEnv;
use crate::filter::FilterView;
use crate::index::ComponentIndex;
use crate::model::{Ability, ActorSnapshot, ItemId};

/// Everything a roll reads about the rolling actor, computed once.
///
/// Rolls never use stored modifiers directly: the context recomputes the
/// actor first so that ability and proficiency effects are in place.
pub struct RollContext<'a> {
    pub actor: &'a ActorSnapshot,
    pub stats: DerivedActorStats,
    index: ComponentIndex<'a>,
    resolver: BonusResolver<'a>,
}

impl<'a> RollContext<'a> {
    pub fn new(actor: &'a ActorSnapshot, env: &'a RulesEnv<'a>) -> Self {
        let stats = recompute_actor(actor, env);
        let resolver =
            BonusResolver::new(actor, env).with_stats(stats.abilities.clone(), stats.prof);
        Self {
            actor,
            index: ComponentIndex::build(actor),
            resolver,
            stats,
        }
    }

    pub fn index(&self) -> &ComponentIndex<'a> {
        &self.index
    }

    pub fn resolver(&self) -> &BonusResolver<'a> {
        &self.resolver
    }

    pub fn env(&self) -> &'a RulesEnv<'a> {
        self.resolver.env()
    }

    pub fn ability_mod(&self, ability: Ability) -> i32 {
        self.stats.ability_mods.get(&ability).copied().unwrap_or(0)
    }

    /// Ability and modifier a class casts with.
    pub fn spell_ability(&self, class: &ItemId) -> Option<(Ability, i32)> {
        self.stats
            .spellcasting
            .iter()
            .find(|stats| &stats.class == class)
            .map(|stats| (stats.ability, stats.modifier))
    }

    pub fn prof_name(&self) -> String {
        self.env().localize("RULES.ProfAbbr")
    }

    /// Proficiency part scaled by `value`, if it contributes at all.
    pub fn prof_part(&self, value: f64) -> Option<Part> {
        (value > 0.0).then(|| {
            Part::proficiency(
                (value * f64::from(self.stats.prof)).floor(),
                value,
                self.prof_name(),
            )
        })
    }

    /// `parts` plus every filtered bonus matching `pred`, with proficiency
    /// counted once.
    pub fn with_bonuses<P>(&self, mut parts: Vec<Part>, pred: P) -> Vec<Part>
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        parts.extend(self.resolver.parts_of(&self.index.bonuses(pred)));
        highest_proficiency(parts)
    }
}
