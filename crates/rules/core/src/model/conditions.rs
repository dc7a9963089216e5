//! Conditions and encumbrance rules that feed attribute post-processing.

use bitflags::bitflags;

/// A named condition that can be applied to an actor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralysed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    pub const ALL: [Condition; 14] = [
        Condition::Blinded,
        Condition::Charmed,
        Condition::Deafened,
        Condition::Frightened,
        Condition::Grappled,
        Condition::Incapacitated,
        Condition::Invisible,
        Condition::Paralysed,
        Condition::Petrified,
        Condition::Poisoned,
        Condition::Prone,
        Condition::Restrained,
        Condition::Stunned,
        Condition::Unconscious,
    ];

    pub fn flag(self) -> ConditionSet {
        match self {
            Condition::Blinded => ConditionSet::BLINDED,
            Condition::Charmed => ConditionSet::CHARMED,
            Condition::Deafened => ConditionSet::DEAFENED,
            Condition::Frightened => ConditionSet::FRIGHTENED,
            Condition::Grappled => ConditionSet::GRAPPLED,
            Condition::Incapacitated => ConditionSet::INCAPACITATED,
            Condition::Invisible => ConditionSet::INVISIBLE,
            Condition::Paralysed => ConditionSet::PARALYSED,
            Condition::Petrified => ConditionSet::PETRIFIED,
            Condition::Poisoned => ConditionSet::POISONED,
            Condition::Prone => ConditionSet::PRONE,
            Condition::Restrained => ConditionSet::RESTRAINED,
            Condition::Stunned => ConditionSet::STUNNED,
            Condition::Unconscious => ConditionSet::UNCONSCIOUS,
        }
    }
}

bitflags! {
    /// Set of active conditions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConditionSet: u16 {
        const BLINDED = 1 << 0;
        const CHARMED = 1 << 1;
        const DEAFENED = 1 << 2;
        const FRIGHTENED = 1 << 3;
        const GRAPPLED = 1 << 4;
        const INCAPACITATED = 1 << 5;
        const INVISIBLE = 1 << 6;
        const PARALYSED = 1 << 7;
        const PETRIFIED = 1 << 8;
        const POISONED = 1 << 9;
        const PRONE = 1 << 10;
        const RESTRAINED = 1 << 11;
        const STUNNED = 1 << 12;
        const UNCONSCIOUS = 1 << 13;

        /// Any of these reduce every speed to zero.
        const IMMOBILISING = Self::GRAPPLED.bits()
            | Self::PARALYSED.bits()
            | Self::PETRIFIED.bits()
            | Self::RESTRAINED.bits()
            | Self::STUNNED.bits()
            | Self::UNCONSCIOUS.bits();
    }
}

impl ConditionSet {
    pub fn has(&self, condition: Condition) -> bool {
        self.contains(condition.flag())
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.insert(condition.flag());
        self
    }

    pub fn list(&self) -> Vec<Condition> {
        Condition::ALL.into_iter().filter(|c| self.has(*c)).collect()
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ConditionSet::empty(), |set, c| set.with(c))
    }
}

/// Conditions stored on the actor plus the exhaustion level (0-6).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorConditions {
    pub active: Vec<Condition>,
    pub exhaustion: u8,
}

impl ActorConditions {
    pub fn set(&self) -> ConditionSet {
        self.active.iter().copied().collect()
    }
}

bitflags! {
    /// Sheet-level rules toggled by inventory and equipment state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RuleFlags: u8 {
        /// Wearing heavy armour without the required strength.
        const HEAVY_ARMOUR = 1 << 0;
        const ENCUMBERED = 1 << 1;
        const HEAVILY_ENCUMBERED = 1 << 2;
        /// Carrying more than the maximum capacity.
        const OVER_CAPACITY = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immobilising_covers_the_speed_zeroing_conditions() {
        for c in [
            Condition::Grappled,
            Condition::Paralysed,
            Condition::Petrified,
            Condition::Restrained,
            Condition::Stunned,
            Condition::Unconscious,
        ] {
            assert!(ConditionSet::IMMOBILISING.contains(c.flag()), "{c}");
        }
        assert!(!ConditionSet::IMMOBILISING.contains(ConditionSet::PRONE));
    }

    #[test]
    fn set_round_trips_to_list_in_declaration_order() {
        let set: ConditionSet = [Condition::Stunned, Condition::Blinded].into_iter().collect();
        assert_eq!(set.list(), vec![Condition::Blinded, Condition::Stunned]);
    }
}
