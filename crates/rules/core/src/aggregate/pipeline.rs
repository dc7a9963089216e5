//! The bonuses → multipliers → setters pipeline shared by every score.

use tracing::trace;

use super::setter::{apply_setter, combine_setters};
use crate::bonus::{BonusResolver, Part, highest_proficiency, total};
use crate::filter::FilterView;
use crate::index::ComponentIndex;

pub struct Pipeline<'p, 'a> {
    index: &'p ComponentIndex<'a>,
    resolver: &'p BonusResolver<'a>,
}

impl<'p, 'a> Pipeline<'p, 'a> {
    pub fn new(index: &'p ComponentIndex<'a>, resolver: &'p BonusResolver<'a>) -> Self {
        Self { index, resolver }
    }

    pub fn index(&self) -> &'p ComponentIndex<'a> {
        self.index
    }

    pub fn resolver(&self) -> &'p BonusResolver<'a> {
        self.resolver
    }

    pub fn bonus_parts<P>(&self, pred: P) -> Vec<Part>
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        self.resolver.parts_of(&self.index.bonuses(pred))
    }

    /// Floored sum of every matching bonus.
    pub fn apply_bonuses<P>(&self, pred: P) -> i32
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        total(&self.bonus_parts(pred))
    }

    /// Product of every matching multiplier; unset factors count as 1.
    pub fn multiplier<P>(&self, pred: P) -> f64
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        self.index
            .multipliers(pred)
            .iter()
            .map(|m| m.data.factor())
            .product()
    }

    pub fn apply_multipliers<P>(&self, pred: P, score: i32) -> i32
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        (f64::from(score) * self.multiplier(pred)).floor() as i32
    }

    pub fn apply_setters<P>(&self, pred: P, score: i32) -> i32
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        let setters = self.index.setters(pred);
        if setters.is_empty() {
            return score;
        }
        apply_setter(combine_setters(setters.iter().map(|s| *s.data)), score)
    }

    /// Runs the full pipeline from `base`. A manual override skips it.
    pub fn score<P>(&self, base: i32, pred: P, override_value: Option<i32>) -> i32
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        if let Some(value) = override_value {
            return value;
        }
        let value = base + self.apply_bonuses(&pred);
        let value = self.apply_multipliers(&pred, value);
        let value = self.apply_setters(&pred, value);
        trace!(base, value, "score pipeline");
        value
    }

    /// Like [`score`](Self::score) for rolls whose base is itself a list of
    /// parts. Proficiency is counted once across base and effect parts.
    pub fn score_parts<P>(&self, mut parts: Vec<Part>, pred: P, override_value: Option<i32>) -> i32
    where
        P: Fn(&FilterView<'_>) -> bool,
    {
        if let Some(value) = override_value {
            return value;
        }
        parts.extend(self.bonus_parts(&pred));
        let value = total(&highest_proficiency(parts));
        let value = self.apply_multipliers(&pred, value);
        self.apply_setters(&pred, value)
    }
}
