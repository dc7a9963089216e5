//! Ability scores and the modifiers derived from them.

use std::collections::BTreeMap;

/// The six ability scores.
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
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Localization key for the short ability label (e.g. "STR").
    pub fn abbr_key(self) -> String {
        format!("RULES.AbilityAbbr.{}", self.as_ref())
    }

    /// Localization key for the full ability name.
    pub fn name_key(self) -> String {
        format!("RULES.Ability.{}", self.as_ref())
    }
}

/// Ability reference as authored on components.
///
/// `Spell` stands for "the spellcasting ability of whatever class this came
/// from" and is resolved against the owning item's class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum AbilityRef {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
    Spell,
}

impl AbilityRef {
    /// Returns the concrete ability, or `None` for `Spell`.
    pub fn ability(self) -> Option<Ability> {
        match self {
            Self::Str => Some(Ability::Str),
            Self::Dex => Some(Ability::Dex),
            Self::Con => Some(Ability::Con),
            Self::Int => Some(Ability::Int),
            Self::Wis => Some(Ability::Wis),
            Self::Cha => Some(Ability::Cha),
            Self::Spell => None,
        }
    }
}

impl From<Ability> for AbilityRef {
    fn from(ability: Ability) -> Self {
        match ability {
            Ability::Str => Self::Str,
            Ability::Dex => Self::Dex,
            Ability::Con => Self::Con,
            Ability::Int => Self::Int,
            Ability::Wis => Self::Wis,
            Ability::Cha => Self::Cha,
        }
    }
}

/// Raw ability scores as stored on the actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            str,
            dex,
            con,
            int,
            wis,
            cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    /// Modifier of the raw score, before any effects.
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }

    pub fn to_map(&self) -> BTreeMap<Ability, i32> {
        Ability::ALL.iter().map(|&a| (a, self.get(a))).collect()
    }
}

impl Default for AbilityScores {
    /// All scores at 10.
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// floor((score - 10) / 2)
///
/// - 10-11 → +0
/// - 8-9 → -1
/// - 1 → -5
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_rounds_down_for_odd_low_scores() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(20), 5);
    }

    #[test]
    fn ability_parses_case_insensitively() {
        assert_eq!("DEX".parse::<Ability>().unwrap(), Ability::Dex);
        assert_eq!("spell".parse::<AbilityRef>().unwrap(), AbilityRef::Spell);
        assert_eq!(AbilityRef::Spell.ability(), None);
    }
}
