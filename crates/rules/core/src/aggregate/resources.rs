use tracing::debug;

use super::ResourceStat;
use crate::bonus::ActorContext;
use crate::effect::ComponentKind;
use crate::effect::data::{BonusOperator, CalcMode, ResourceData, ResourceKey};
use crate::index::ComponentIndex;

/// Maximum and remaining uses of every resource component.
///
/// Resources on inactive effects still have a pool; they are listed too.
pub fn resources(index: &ComponentIndex<'_>, ctx: &ActorContext<'_>) -> Vec<ResourceStat> {
    index
        .entries()
        .iter()
        .flat_map(|entry| {
            entry.effect.components.iter().filter_map(move |component| {
                let ComponentKind::Resource(data) = &component.kind else {
                    return None;
                };
                let name = [&data.name, &entry.effect.name]
                    .into_iter()
                    .chain(entry.item.map(|item| &item.name))
                    .find(|name| !name.is_empty())
                    .cloned()
                    .unwrap_or_default();
                let max = resource_max(data, ctx);
                let remaining = data.remaining.unwrap_or(max).clamp(0, max);
                Some(ResourceStat {
                    component: component.uuid.clone(),
                    name,
                    max,
                    remaining,
                })
            })
        })
        .collect()
}

/// `fixed` uses, or `bonus` combined with the keyed statistic and floored
/// at `min`. Never negative.
pub fn resource_max(data: &ResourceData, ctx: &ActorContext<'_>) -> i32 {
    let max = match data.calc {
        CalcMode::Fixed => data.fixed,
        CalcMode::Formula => {
            let value = match data.key {
                ResourceKey::Abl => data.ability.map_or(0, |a| ctx.ability_mod(a)),
                ResourceKey::Chr => ctx.actor.character_level() as i32,
                ResourceKey::Cls => match &data.class {
                    Some(class) => ctx.actor.class_level(class).unwrap_or_else(|| {
                        debug!(%class, "resource class not found");
                        0
                    }) as i32,
                    None => 0,
                },
            };
            let max = match data.operator {
                BonusOperator::Plus => data.bonus + value,
                BonusOperator::Mult => data.bonus * value,
            };
            max.max(data.min)
        }
    };
    max.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActorSnapshot, Ability};

    fn data(calc: CalcMode) -> ResourceData {
        ResourceData {
            calc,
            ..ResourceData::default()
        }
    }

    #[test]
    fn ability_formula_respects_minimum() {
        let mut actor = ActorSnapshot::new("a", "Bard");
        actor.abilities.cha = 8;
        let ctx = ActorContext::raw(&actor);
        let bardic = ResourceData {
            key: ResourceKey::Abl,
            ability: Some(Ability::Cha),
            min: 1,
            ..data(CalcMode::Formula)
        };
        assert_eq!(resource_max(&bardic, &ctx), 1);
    }

    #[test]
    fn level_multiplier() {
        let mut actor = ActorSnapshot::new("a", "Paladin");
        actor.level = 4;
        let ctx = ActorContext::raw(&actor);
        let lay_on_hands = ResourceData {
            key: ResourceKey::Chr,
            operator: BonusOperator::Mult,
            bonus: 5,
            ..data(CalcMode::Formula)
        };
        assert_eq!(resource_max(&lay_on_hands, &ctx), 20);
    }

    #[test]
    fn fixed_ignores_formula_fields() {
        let actor = ActorSnapshot::new("a", "Fighter");
        let ctx = ActorContext::raw(&actor);
        let surge = ResourceData {
            fixed: 2,
            bonus: 10,
            ..data(CalcMode::Fixed)
        };
        assert_eq!(resource_max(&surge, &ctx), 2);
    }
}
