//! Predicates selecting which effects contribute to a computed score or roll.
//!
//! A predicate sees one filter component at a time, together with the effect
//! that owns it. When it returns true, every bonus/multiplier/setter/roll-mod
//! in that effect applies.
pub mod applies_to;

use crate::effect::Effect;
use crate::effect::data::{
    CheckKind, DamageFilterKind, FilterData, FilterKind, Multi, RollKind, ScoreKind,
};
use crate::model::{Ability, DamageType};
use crate::rolls::RollMode;

/// A filter component seen in the context of its owning effect.
#[derive(Clone, Copy, Debug)]
pub struct FilterView<'a> {
    pub filter: &'a FilterData,
    pub effect: &'a Effect,
}

impl<'a> FilterView<'a> {
    pub fn new(filter: &'a FilterData, effect: &'a Effect) -> Self {
        Self { filter, effect }
    }

    pub fn is_score(&self, score: ScoreKind) -> bool {
        self.filter.filter == FilterKind::Score && self.filter.score == score
    }

    pub fn is_roll(&self, roll: RollKind) -> bool {
        self.filter.filter == FilterKind::Roll && self.filter.roll == roll
    }

    pub fn is_check(&self, check: CheckKind) -> bool {
        self.is_roll(RollKind::Check) && self.filter.check == check
    }

    /// `any` filters match every key; `some` filters only their collection.
    pub fn in_collection(&self, key: &str) -> bool {
        self.filter.multi == Multi::Any || self.filter.collection.iter().any(|k| k == key)
    }

    /// Keyed match that ignores the collection on single-target filters.
    pub fn matches_key(&self, key: &str) -> bool {
        !is_multi(self.filter) || self.in_collection(key)
    }

    /// Mode-restricted filters only apply once the roll's mode is known and
    /// equal to theirs.
    pub fn matches_mode(&self, mode: Option<RollMode>) -> bool {
        match self.filter.mode {
            None => true,
            Some(required) => mode == Some(required),
        }
    }

    /// Honours a `uses-ability` restriction on the owning effect.
    pub fn uses_ability(&self, ability: Option<Ability>) -> bool {
        match self.effect.uses_ability() {
            None => true,
            Some(restriction) => ability.is_some_and(|a| restriction.selected().any(|s| s == a)),
        }
    }
}

pub fn is_ac(view: &FilterView<'_>) -> bool {
    view.is_score(ScoreKind::Ac)
}

pub fn is_hp(view: &FilterView<'_>) -> bool {
    view.is_score(ScoreKind::MaxHp)
}

pub fn is_prof(view: &FilterView<'_>) -> bool {
    view.is_score(ScoreKind::Prof)
}

pub fn is_damage(view: &FilterView<'_>) -> bool {
    view.is_roll(RollKind::Damage)
}

/// Damage filter keyed by damage type.
pub fn is_damage_type(view: &FilterView<'_>, damage: DamageType) -> bool {
    is_damage(view)
        && view.filter.dmg == DamageFilterKind::Damage
        && view.in_collection(damage.as_ref())
}

/// Whether the filter's target kind takes a key collection.
///
/// Walks `filter → score|roll → check` down to a leaf.
pub fn is_multi(filter: &FilterData) -> bool {
    match filter.filter {
        FilterKind::Score => matches!(
            filter.score,
            ScoreKind::Ability | ScoreKind::Passive | ScoreKind::Speed | ScoreKind::Dc
        ),
        FilterKind::Roll => match filter.roll {
            RollKind::Attack | RollKind::Save | RollKind::Damage => true,
            RollKind::Check => matches!(
                filter.check,
                CheckKind::Ability | CheckKind::Skill | CheckKind::Tool
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_tree_leaves() {
        let mut filter = FilterData {
            filter: FilterKind::Score,
            score: ScoreKind::Ac,
            ..FilterData::default()
        };
        assert!(!is_multi(&filter));
        filter.score = ScoreKind::Speed;
        assert!(is_multi(&filter));

        filter.filter = FilterKind::Roll;
        filter.roll = RollKind::Check;
        filter.check = CheckKind::Init;
        assert!(!is_multi(&filter));
        filter.check = CheckKind::Tool;
        assert!(is_multi(&filter));
    }

    #[test]
    fn some_filters_respect_collection() {
        let effect = Effect::default();
        let filter = FilterData {
            filter: FilterKind::Score,
            score: ScoreKind::Speed,
            multi: Multi::Some,
            collection: vec!["fly".into()],
            ..FilterData::default()
        };
        let view = FilterView::new(&filter, &effect);
        assert!(view.matches_key("fly"));
        assert!(!view.matches_key("walk"));
    }
}
