//! Items owned by an actor, and the item-level data the engine reads.

use super::ability::Ability;
use super::ids::{ItemId, SnapshotRef};
use crate::effect::Effect;

/// Broad item type.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemKind {
    Weapon,
    Equipment,
    Consumable,
    Backpack,
    Tool,
    Feat,
    Spell,
    Class,
    #[default]
    Loot,
}

/// Where a feature or spell came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SourceKind {
    Class,
    Race,
    Feat,
    Item,
    #[default]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemSource {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub kind: SourceKind,
    /// Class item the spell or feature belongs to, when `kind` is `Class`.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub class: Option<ItemId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ArmourKind {
    #[default]
    Light,
    Medium,
    Heavy,
    Shield,
}

/// Armour statistics of a wearable item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Armour {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub ac: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub magic: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub kind: ArmourKind,
    pub add_dex: bool,
    /// Cap on the dex bonus; unset means uncapped.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub max_dex: Option<i32>,
    /// Strength score needed to wear it without a speed penalty.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub strength: Option<i32>,
}

impl Armour {
    pub fn is_shield(&self) -> bool {
        self.kind == ArmourKind::Shield
    }

    /// Armour value including its magical bonus.
    pub fn base_ac(&self) -> i32 {
        self.ac + self.magic
    }
}

/// Built-in class keys. Custom classes carry an explicit spellcasting ability.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKey {
    #[strum(serialize = "art")]
    #[cfg_attr(feature = "serde", serde(rename = "art"))]
    Artificer,
    #[strum(serialize = "brb")]
    #[cfg_attr(feature = "serde", serde(rename = "brb"))]
    Barbarian,
    #[strum(serialize = "brd")]
    #[cfg_attr(feature = "serde", serde(rename = "brd"))]
    Bard,
    #[strum(serialize = "clr")]
    #[cfg_attr(feature = "serde", serde(rename = "clr"))]
    Cleric,
    #[strum(serialize = "drd")]
    #[cfg_attr(feature = "serde", serde(rename = "drd"))]
    Druid,
    #[strum(serialize = "fgt")]
    #[cfg_attr(feature = "serde", serde(rename = "fgt"))]
    Fighter,
    #[strum(serialize = "mnk")]
    #[cfg_attr(feature = "serde", serde(rename = "mnk"))]
    Monk,
    #[strum(serialize = "pal")]
    #[cfg_attr(feature = "serde", serde(rename = "pal"))]
    Paladin,
    #[strum(serialize = "rng")]
    #[cfg_attr(feature = "serde", serde(rename = "rng"))]
    Ranger,
    #[strum(serialize = "rog")]
    #[cfg_attr(feature = "serde", serde(rename = "rog"))]
    Rogue,
    #[strum(serialize = "src")]
    #[cfg_attr(feature = "serde", serde(rename = "src"))]
    Sorcerer,
    #[strum(serialize = "war")]
    #[cfg_attr(feature = "serde", serde(rename = "war"))]
    Warlock,
    #[strum(serialize = "wiz")]
    #[cfg_attr(feature = "serde", serde(rename = "wiz"))]
    Wizard,
    #[default]
    #[strum(serialize = "custom")]
    #[cfg_attr(feature = "serde", serde(rename = "custom"))]
    Custom,
}

impl ClassKey {
    /// Spellcasting ability of the built-in casters.
    pub const fn spell_ability(self) -> Option<Ability> {
        match self {
            Self::Artificer | Self::Wizard => Some(Ability::Int),
            Self::Bard | Self::Paladin | Self::Sorcerer | Self::Warlock => Some(Ability::Cha),
            Self::Cleric | Self::Druid | Self::Ranger => Some(Ability::Wis),
            Self::Barbarian | Self::Fighter | Self::Monk | Self::Rogue | Self::Custom => None,
        }
    }
}

/// Data carried by items of kind [`ItemKind::Class`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub key: ClassKey,
    pub levels: u32,
    /// Overrides the built-in spellcasting ability (required for custom casters).
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub spellcasting: Option<Ability>,
}

impl ClassData {
    pub fn spell_ability(&self) -> Option<Ability> {
        self.spellcasting.or(self.key.spell_ability())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellData {
    /// 0 for cantrips.
    pub level: u8,
    pub concentration: bool,
}

/// Marks an item as the carrier of an effect applied by another actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationLink {
    /// The actor (or unlinked token) that applied the effect.
    pub uuid: SnapshotRef,
    #[cfg_attr(feature = "serde", serde(default))]
    pub remaining: Option<u32>,
}

/// An item with its embedded effects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub kind: ItemKind,
    pub equippable: bool,
    pub equipped: bool,
    /// Requires attunement to function.
    pub attunement: bool,
    pub attuned: bool,
    pub effects: Vec<Effect>,
    pub source: Option<ItemSource>,
    pub armour: Option<Armour>,
    pub class: Option<ClassData>,
    pub spell: Option<SpellData>,
    pub duration: Option<DurationLink>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether effects on this item currently apply to its owner.
    ///
    /// Spells never apply passively, attunement items must be attuned and
    /// equippable items must be equipped.
    pub fn grants_effects(&self) -> bool {
        if self.kind == ItemKind::Spell {
            return false;
        }
        if self.attunement && !self.attuned {
            return false;
        }
        if self.equippable && !self.equipped {
            return false;
        }
        true
    }

    /// Class item this spell or feature draws its spellcasting from.
    pub fn source_class(&self) -> Option<&ItemId> {
        self.source
            .as_ref()
            .filter(|source| source.kind == SourceKind::Class)
            .and_then(|source| source.class.as_ref())
    }

    pub fn is_worn_armour(&self) -> bool {
        self.armour.is_some() && self.equipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unequipped_equippable_item_grants_nothing() {
        let mut ring = Item::new("r1", "Ring of Protection", ItemKind::Equipment);
        ring.equippable = true;
        ring.attunement = true;
        ring.equipped = true;
        assert!(!ring.grants_effects(), "not attuned");

        ring.attuned = true;
        assert!(ring.grants_effects());

        ring.equipped = false;
        assert!(!ring.grants_effects());
    }

    #[test]
    fn spells_never_grant_passive_effects() {
        assert!(!Item::new("s", "Bless", ItemKind::Spell).grants_effects());
    }

    #[test]
    fn custom_class_needs_explicit_ability() {
        let mut class = ClassData {
            key: ClassKey::Custom,
            levels: 3,
            spellcasting: None,
        };
        assert_eq!(class.spell_ability(), None);
        class.spellcasting = Some(Ability::Wis);
        assert_eq!(class.spell_ability(), Some(Ability::Wis));
        assert_eq!(ClassKey::Warlock.spell_ability(), Some(Ability::Cha));
    }
}
