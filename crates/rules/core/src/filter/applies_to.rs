//! Predicate builders keyed by the attribute being computed.
//!
//! Each builder closes over its target and returns a predicate suitable for
//! [`ComponentIndex`](crate::index::ComponentIndex) queries.

use super::FilterView;
use crate::effect::data::{AttackData, CheckKind, DamageFilterKind, Multi, RollKind, ScoreKind};
use crate::model::{Ability, DamageType, SpeedKind};
use crate::rolls::RollMode;

pub fn speed_scores(speed: SpeedKind) -> impl Fn(&FilterView<'_>) -> bool {
    move |view| view.is_score(ScoreKind::Speed) && view.matches_key(speed.as_ref())
}

pub fn ability_scores(ability: Ability) -> impl Fn(&FilterView<'_>) -> bool {
    move |view| view.is_score(ScoreKind::Ability) && view.matches_key(ability.as_ref())
}

pub fn passive(key: &str) -> impl Fn(&FilterView<'_>) -> bool {
    move |view| view.is_score(ScoreKind::Passive) && view.matches_key(key)
}

/// Initiative is a check in its own right and also an ability check.
pub fn initiative(ability: Ability, mode: Option<RollMode>) -> impl Fn(&FilterView<'_>) -> bool {
    move |view| {
        view.matches_mode(mode)
            && (view.is_check(CheckKind::Init)
                || (view.is_check(CheckKind::Ability) && view.matches_key(ability.as_ref())))
    }
}

pub fn spell_attacks(view: &FilterView<'_>) -> bool {
    view.is_roll(RollKind::Attack) && (view.matches_key("ms") || view.matches_key("rs"))
}

pub fn spell_dcs(view: &FilterView<'_>) -> bool {
    view.is_score(ScoreKind::Dc) && view.matches_key("spell")
}

pub fn ability_checks(ability: Ability, mode: Option<RollMode>) -> impl Fn(&FilterView<'_>) -> bool {
    move |view| {
        view.matches_mode(mode)
            && view.is_check(CheckKind::Ability)
            && view.matches_key(ability.as_ref())
    }
}

/// `key` is an ability code or `death`.
pub fn saving_throws(key: &str, mode: Option<RollMode>) -> impl Fn(&FilterView<'_>) -> bool {
    move |view| view.matches_mode(mode) && view.is_roll(RollKind::Save) && view.matches_key(key)
}

pub fn death_saves(mode: Option<RollMode>) -> impl Fn(&FilterView<'_>) -> bool {
    saving_throws("death", mode)
}

/// Skill or tool checks by key, plus ability checks for the ability used.
pub fn skill_checks(
    is_tool: bool,
    key: &str,
    ability: Ability,
    mode: Option<RollMode>,
) -> impl Fn(&FilterView<'_>) -> bool {
    let kind = if is_tool { CheckKind::Tool } else { CheckKind::Skill };
    move |view| {
        view.matches_mode(mode)
            && ((view.is_check(kind) && view.matches_key(key))
                || (view.is_check(CheckKind::Ability) && view.matches_key(ability.as_ref())))
    }
}

/// `ability` is the resolved ability the attack rolls with.
pub fn attack_rolls(
    attack: &AttackData,
    ability: Option<Ability>,
    mode: Option<RollMode>,
) -> impl Fn(&FilterView<'_>) -> bool {
    let key = attack.key();
    move |view| {
        view.matches_mode(mode)
            && view.is_roll(RollKind::Attack)
            && view.matches_key(key)
            && view.uses_ability(ability)
    }
}

/// Damage bonuses for one damage component.
///
/// Without an attack in the same effect, only `any` attack filters apply.
/// Without a damage type, only `any` damage-type filters apply.
pub fn damage(
    attack: Option<(&AttackData, Option<Ability>)>,
    damage: Option<DamageType>,
) -> impl Fn(&FilterView<'_>) -> bool {
    let attack = attack.map(|(attack, ability)| (attack.key(), ability));
    move |view| {
        if !view.is_roll(RollKind::Damage) {
            return false;
        }
        let by_attack = view.filter.dmg == DamageFilterKind::Attack
            && match attack {
                Some((key, ability)) => view.in_collection(key) && view.uses_ability(ability),
                None => view.filter.multi == Multi::Any,
            };
        let by_type = view.filter.dmg == DamageFilterKind::Damage
            && match damage {
                Some(damage) => view.in_collection(damage.as_ref()),
                None => view.filter.multi == Multi::Any,
            };
        by_attack || by_type
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::effect::data::{FilterData, FilterKind, UsesAbilityData};
    use crate::effect::{Component, ComponentKind, Effect};

    fn roll_filter(roll: RollKind, multi: Multi, keys: &[&str]) -> FilterData {
        FilterData {
            filter: FilterKind::Roll,
            roll,
            multi,
            collection: keys.iter().map(|k| k.to_string()).collect(),
            ..FilterData::default()
        }
    }

    #[test]
    fn advantage_only_filters_wait_for_the_mode() {
        let effect = Effect::default();
        let mut filter = roll_filter(RollKind::Save, Multi::Any, &[]);
        filter.mode = Some(RollMode::Adv);
        let view = FilterView::new(&filter, &effect);

        assert!(!saving_throws("dex", None)(&view));
        assert!(!saving_throws("dex", Some(RollMode::Dis))(&view));
        assert!(saving_throws("dex", Some(RollMode::Adv))(&view));
    }

    #[test]
    fn skill_checks_include_ability_checks_of_their_ability() {
        let effect = Effect::default();
        let mut filter = roll_filter(RollKind::Check, Multi::Some, &["dex"]);
        filter.check = CheckKind::Ability;
        let view = FilterView::new(&filter, &effect);

        assert!(skill_checks(false, "ste", Ability::Dex, None)(&view));
        assert!(!skill_checks(false, "ath", Ability::Str, None)(&view));
    }

    #[test]
    fn attack_rolls_honour_uses_ability() {
        let mut abilities = BTreeMap::new();
        abilities.insert(Ability::Dex, true);
        let effect = Effect::new("e", "Archery").with_component(Component::new(
            "u",
            ComponentKind::UsesAbility(UsesAbilityData { abilities }),
        ));
        let filter = roll_filter(RollKind::Attack, Multi::Some, &["rw"]);
        let view = FilterView::new(&filter, &effect);

        let mut bow = AttackData::default();
        bow.attack = crate::effect::data::AttackKind::Ranged;
        assert!(attack_rolls(&bow, Some(Ability::Dex), None)(&view));
        assert!(!attack_rolls(&bow, Some(Ability::Str), None)(&view));
        assert!(!attack_rolls(&AttackData::default(), Some(Ability::Dex), None)(&view));
    }

    #[test]
    fn damage_filters_by_type_or_attack() {
        let effect = Effect::default();
        let mut fire = roll_filter(RollKind::Damage, Multi::Some, &["fir"]);
        fire.dmg = DamageFilterKind::Damage;
        let view = FilterView::new(&fire, &effect);
        assert!(damage(None, Some(DamageType::Fire))(&view));
        assert!(!damage(None, Some(DamageType::Cold))(&view));
        assert!(!damage(None, None)(&view));

        let mut any_attack = roll_filter(RollKind::Damage, Multi::Any, &[]);
        any_attack.dmg = DamageFilterKind::Attack;
        let view = FilterView::new(&any_attack, &effect);
        assert!(damage(None, Some(DamageType::Cold))(&view));
    }
}
