//! Scaling effects: spell slot upcasting, cantrip tiers and resource spend.
//!
//! A scaling effect points back at the effect it scales through its
//! `scaling` component. A single child without a threshold scales linearly
//! per step; otherwise the children form a breakpoint table.

use crate::effect::data::{DamageData, ScalingData};
use crate::effect::{ComponentKind, Effect};
use crate::index::ComponentIndex;
use crate::model::EffectId;
use crate::rolls::DamageSpec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalingMode {
    /// Constants are multiplied by the scaled amount and added to the base.
    Linear,
    /// The selected effect's values replace the base outright.
    Breakpoint,
}

#[derive(Clone, Copy, Debug)]
pub struct Scaling<'a> {
    pub mode: ScalingMode,
    pub effect: &'a Effect,
    pub data: &'a ScalingData,
}

/// Finds the scaling that applies to `effect` at `value`.
///
/// With several children (or one with a threshold) the child with the
/// largest threshold not above `value` wins; none qualifying means no
/// scaling. Thresholds {3, 5, 9} at value 6 select 5.
pub fn get_scaling<'a>(
    index: &ComponentIndex<'a>,
    effect: &EffectId,
    value: i32,
) -> Option<Scaling<'a>> {
    let children = index.scaling_children(effect);
    match children.as_slice() {
        [] => None,
        &[(effect, data)] if data.threshold.is_none() => Some(Scaling {
            mode: ScalingMode::Linear,
            effect,
            data,
        }),
        _ => children
            .iter()
            .filter_map(|&(effect, data)| data.threshold.map(|t| (t, effect, data)))
            .filter(|&(threshold, _, _)| threshold <= value)
            .fold(None, |best: Option<(i32, &Effect, &ScalingData)>, candidate| match best {
                Some(best) if best.0 >= candidate.0 => Some(best),
                _ => Some(candidate),
            })
            .map(|(_, effect, data)| Scaling {
                mode: ScalingMode::Breakpoint,
                effect,
                data,
            }),
    }
}

/// `floor(base + constant * value)` when linear; `constant` as-is at a
/// breakpoint.
///
/// ```
/// use rules_core::scaling::{ScalingMode, scale_constant};
///
/// assert_eq!(scale_constant(ScalingMode::Linear, 2, 1.0, 1.0), 3);
/// assert_eq!(scale_constant(ScalingMode::Breakpoint, 2, 1.0, 4.0), 4);
/// ```
pub fn scale_constant(mode: ScalingMode, value: i32, base: f64, constant: f64) -> i32 {
    match mode {
        ScalingMode::Linear => (base + constant * f64::from(value)).floor() as i32,
        ScalingMode::Breakpoint => constant as i32,
    }
}

/// Cantrip damage tier for a character level: 1 below 5th level, then one
/// more at 5th, 11th and 17th.
pub fn cantrip_scale(level: u32) -> i32 {
    match level {
        0..=4 => 1,
        5..=10 => 2,
        11..=16 => 3,
        _ => 4,
    }
}

/// Applies a scaling to an effect's damage specs.
///
/// Linear scaling grows each existing spec whose damage type matches one of
/// the scaling effect's damage components: dice, crit dice and the constant
/// part. A breakpoint replaces the specs with the scaling effect's own
/// damage, built by `build`.
pub fn scale_damage<F>(
    scaling: &Scaling<'_>,
    value: i32,
    mut damage: Vec<DamageSpec>,
    build: F,
) -> Vec<DamageSpec>
where
    F: Fn(&DamageData) -> DamageSpec,
{
    if damage.is_empty() {
        return damage;
    }

    let components = scaling.effect.components.iter().filter_map(|c| match &c.kind {
        ComponentKind::Damage(data) => Some(data),
        _ => None,
    });

    match scaling.mode {
        ScalingMode::Breakpoint => components.map(build).collect(),
        ScalingMode::Linear => {
            let mode = ScalingMode::Linear;
            for step in components {
                let Some(existing) = damage.iter_mut().find(|spec| spec.damage == step.damage)
                else {
                    continue;
                };
                if let Some(constant) = existing.constant_mut() {
                    constant.modifier = f64::from(scale_constant(
                        mode,
                        value,
                        constant.modifier,
                        f64::from(step.bonus),
                    ));
                }
                if let Some(dice) = existing.dice.as_mut() {
                    dice.ndice =
                        scale_constant(mode, value, f64::from(dice.ndice), f64::from(step.ndice));
                }
                existing.ncrit = scale_constant(
                    mode,
                    value,
                    f64::from(existing.ncrit),
                    f64::from(step.ndice.saturating_mul(step.crit_multiple())),
                );
            }
            damage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::{Dice, Part};
    use crate::effect::Component;
    use crate::model::{ActorSnapshot, DamageType};

    fn child(id: &str, parent: &str, threshold: Option<i32>) -> Effect {
        Effect::new(id, id).with_component(Component::new(
            format!("{id}-s"),
            ComponentKind::Scaling(ScalingData {
                threshold,
                reference: EffectId::new(parent),
                ..ScalingData::default()
            }),
        ))
    }

    #[test]
    fn breakpoint_picks_largest_threshold_not_above_value() {
        let mut actor = ActorSnapshot::new("a", "Caster");
        actor.effects = vec![
            Effect::new("base", "Fire Bolt"),
            child("t3", "base", Some(3)),
            child("t9", "base", Some(9)),
            child("t5", "base", Some(5)),
        ];
        let index = ComponentIndex::build(&actor);
        let base = EffectId::new("base");

        let picked = get_scaling(&index, &base, 6).map(|s| s.effect.uuid.as_str().to_owned());
        assert_eq!(picked.as_deref(), Some("t5"));
        assert_eq!(
            get_scaling(&index, &base, 6).map(|s| s.mode),
            Some(ScalingMode::Breakpoint)
        );
        assert!(get_scaling(&index, &base, 2).is_none());
    }

    #[test]
    fn single_child_without_threshold_is_linear() {
        let mut actor = ActorSnapshot::new("a", "Caster");
        actor.effects = vec![Effect::new("base", "Magic Missile"), child("up", "base", None)];
        let index = ComponentIndex::build(&actor);
        let scaling = get_scaling(&index, &EffectId::new("base"), 0);
        assert_eq!(scaling.map(|s| s.mode), Some(ScalingMode::Linear));
        assert!(get_scaling(&index, &EffectId::new("other"), 0).is_none());
    }

    #[test]
    fn cantrip_tiers() {
        assert_eq!(
            [1, 4, 5, 10, 11, 16, 17, 20].map(cantrip_scale),
            [1, 1, 2, 2, 3, 3, 4, 4]
        );
    }

    #[test]
    fn linear_damage_scales_matching_type() {
        let step = Effect::new("up", "Upcast").with_component(Component::new(
            "up-d",
            ComponentKind::Damage(DamageData {
                ndice: 1,
                die: 10,
                damage: Some(DamageType::Fire),
                ..DamageData::default()
            }),
        ));
        let data = ScalingData::default();
        let scaling = Scaling {
            mode: ScalingMode::Linear,
            effect: &step,
            data: &data,
        };
        let base = DamageSpec {
            damage: Some(DamageType::Fire),
            dice: Some(Dice::new(1, 10)),
            ncrit: 1,
            parts: vec![Part {
                constant: true,
                ..Part::flat(0, "")
            }],
            ..DamageSpec::default()
        };
        let other = DamageSpec {
            damage: Some(DamageType::Cold),
            dice: Some(Dice::new(1, 6)),
            ..DamageSpec::default()
        };

        let scaled = scale_damage(&scaling, 2, vec![base, other], |_| DamageSpec::default());
        assert_eq!(scaled[0].dice, Some(Dice::new(3, 10)));
        assert_eq!(scaled[0].ncrit, 3);
        assert_eq!(scaled[1].dice, Some(Dice::new(1, 6)));
    }
}
