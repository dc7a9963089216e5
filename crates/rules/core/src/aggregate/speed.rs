use crate::config::RulesConfig;
use crate::model::{ConditionSet, RuleFlags};

/// State that adjusts every speed after the effect pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeedState {
    pub conditions: ConditionSet,
    pub exhaustion: u8,
    pub rules: RuleFlags,
}

impl SpeedState {
    /// Speeds drop to zero.
    pub fn immobile(&self) -> bool {
        self.exhaustion > 4
            || self.conditions.intersects(ConditionSet::IMMOBILISING)
            || self.rules.contains(RuleFlags::OVER_CAPACITY)
    }
}

/// Exhaustion, condition and encumbrance adjustments for one speed.
///
/// ```
/// use rules_core::aggregate::{SpeedState, adjust_speed};
/// use rules_core::config::STANDARD_CONFIG;
///
/// let tired = SpeedState { exhaustion: 2, ..SpeedState::default() };
/// assert_eq!(adjust_speed(35, tired, &STANDARD_CONFIG), 17);
///
/// let spent = SpeedState { exhaustion: 5, ..SpeedState::default() };
/// assert_eq!(adjust_speed(35, spent, &STANDARD_CONFIG), 0);
/// ```
pub fn adjust_speed(speed: i32, state: SpeedState, config: &RulesConfig) -> i32 {
    if state.immobile() {
        return 0;
    }
    let mut speed = speed;
    if state.exhaustion > 1 {
        speed = speed.div_euclid(2);
    }
    if state.rules.contains(RuleFlags::HEAVY_ARMOUR) {
        speed -= config.heavy_armour_penalty;
    }
    if state.rules.contains(RuleFlags::HEAVILY_ENCUMBERED) {
        speed -= config.heavily_encumbered_penalty;
    } else if state.rules.contains(RuleFlags::ENCUMBERED) {
        speed -= config.encumbered_penalty;
    }
    speed.max(0)
}
