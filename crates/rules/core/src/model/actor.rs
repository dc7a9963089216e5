//! Raw actor snapshot: the immutable input of every recomputation pass.

use std::collections::BTreeMap;

use super::ability::{Ability, AbilityScores};
use super::conditions::{ActorConditions, RuleFlags};
use super::ids::{ActorId, ComponentId, ItemId, SnapshotRef};
use super::item::{Item, ItemKind};
use crate::effect::Effect;
use crate::rolls::RollMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActorKind {
    #[default]
    Character,
    Npc,
    Vehicle,
}

// ============================================================================
// Speeds
// ============================================================================

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
pub enum SpeedKind {
    Walk,
    Burrow,
    Climb,
    Fly,
    Swim,
}

impl SpeedKind {
    pub const ALL: [SpeedKind; 5] = [
        SpeedKind::Walk,
        SpeedKind::Burrow,
        SpeedKind::Climb,
        SpeedKind::Fly,
        SpeedKind::Swim,
    ];
}

/// Movement speeds in feet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Speeds {
    pub walk: i32,
    pub burrow: i32,
    pub climb: i32,
    pub fly: i32,
    pub swim: i32,
}

impl Speeds {
    pub fn get(&self, kind: SpeedKind) -> i32 {
        match kind {
            SpeedKind::Walk => self.walk,
            SpeedKind::Burrow => self.burrow,
            SpeedKind::Climb => self.climb,
            SpeedKind::Fly => self.fly,
            SpeedKind::Swim => self.swim,
        }
    }

    pub fn set(&mut self, kind: SpeedKind, value: i32) {
        match kind {
            SpeedKind::Walk => self.walk = value,
            SpeedKind::Burrow => self.burrow = value,
            SpeedKind::Climb => self.climb = value,
            SpeedKind::Fly => self.fly = value,
            SpeedKind::Swim => self.swim = value,
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmourClass {
    /// Manual AC; when set, effects never touch AC.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "override", deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub override_value: Option<i32>,
    /// Flat adjustment typed on the sheet.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "mod", deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub modifier: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitPoints {
    pub max: i32,
    pub value: i32,
    pub temp: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Initiative {
    pub ability: Ability,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "override", deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub override_value: Option<i32>,
    pub roll: RollMode,
}

impl Default for Initiative {
    fn default() -> Self {
        Self {
            ability: Ability::Dex,
            bonus: 0,
            override_value: None,
            roll: RollMode::Reg,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub ac: ArmourClass,
    pub hp: HitPoints,
    pub init: Initiative,
    pub movement: Speeds,
    /// Explicit proficiency bonus (NPC stat blocks); derived from level otherwise.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub prof: Option<i32>,
}

// ============================================================================
// Saves, skills and tools
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveEntry {
    /// Proficiency multiplier (0, 0.5, 1, 2).
    pub proficient: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "override", deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub override_value: Option<i32>,
    pub roll: RollMode,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveSettings {
    /// Bonus to every saving throw.
    pub bonus: i32,
    pub roll: RollMode,
    pub abilities: BTreeMap<Ability, SaveEntry>,
}

impl SaveSettings {
    pub fn entry(&self, ability: Ability) -> Option<&SaveEntry> {
        self.abilities.get(&ability)
    }
}

/// Built-in skills and the ability each uses by default.
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
#[strum(serialize_all = "lowercase")]
pub enum Skill {
    Acr,
    Ani,
    Arc,
    Ath,
    Dec,
    His,
    Ins,
    Inv,
    Itm,
    Med,
    Nat,
    Per,
    Prc,
    Prf,
    Rel,
    Slt,
    Ste,
    Sur,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Acr,
        Skill::Ani,
        Skill::Arc,
        Skill::Ath,
        Skill::Dec,
        Skill::His,
        Skill::Ins,
        Skill::Inv,
        Skill::Itm,
        Skill::Med,
        Skill::Nat,
        Skill::Per,
        Skill::Prc,
        Skill::Prf,
        Skill::Rel,
        Skill::Slt,
        Skill::Ste,
        Skill::Sur,
    ];

    pub const fn ability(self) -> Ability {
        match self {
            Skill::Ath => Ability::Str,
            Skill::Acr | Skill::Slt | Skill::Ste => Ability::Dex,
            Skill::Arc | Skill::His | Skill::Inv | Skill::Nat | Skill::Rel => Ability::Int,
            Skill::Ani | Skill::Ins | Skill::Med | Skill::Prc | Skill::Sur => Ability::Wis,
            Skill::Dec | Skill::Itm | Skill::Per | Skill::Prf => Ability::Cha,
        }
    }

    pub fn name_key(self) -> String {
        format!("RULES.Skill.{}", self.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SkillEntry {
    pub ability: Ability,
    /// Proficiency multiplier (0, 0.5, 1, 2).
    pub value: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub passive_bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "override", deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub override_value: Option<i32>,
    pub roll: RollMode,
    /// Display label of a custom skill.
    pub label: Option<String>,
}

impl SkillEntry {
    pub fn for_ability(ability: Ability) -> Self {
        Self {
            ability,
            ..Self::default()
        }
    }
}

impl Default for SkillEntry {
    fn default() -> Self {
        Self {
            ability: Ability::Str,
            value: 0.0,
            bonus: 0,
            passive_bonus: 0,
            override_value: None,
            roll: RollMode::Reg,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolEntry {
    pub id: String,
    pub label: String,
    pub ability: Ability,
    pub value: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "override", deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub override_value: Option<i32>,
    pub roll: RollMode,
}

impl Default for ToolEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            ability: Ability::Dex,
            value: 0.0,
            bonus: 0,
            override_value: None,
            roll: RollMode::Reg,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillSettings {
    /// Bonus to every skill and tool check.
    pub bonus: i32,
    pub roll: RollMode,
    /// Jack of all trades: half proficiency on unproficient checks.
    pub joat: bool,
    /// Keyed by built-in skill code, or any other key for custom skills.
    pub entries: BTreeMap<String, SkillEntry>,
    pub tools: Vec<ToolEntry>,
}

// ============================================================================
// Death saves, summons, sheet settings
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeathSaves {
    pub success: u8,
    pub failure: u8,
    /// Total needed for a success.
    pub threshold: i32,
    pub bonus: i32,
    pub roll: RollMode,
}

impl Default for DeathSaves {
    fn default() -> Self {
        Self {
            success: 0,
            failure: 0,
            threshold: 10,
            bonus: 0,
            roll: RollMode::Reg,
        }
    }
}

/// Present on creatures conjured by a `summon` component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SummonLink {
    pub summoner: SnapshotRef,
    /// The summon component on the summoner that created this creature.
    pub parent_component: ComponentId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetSettings {
    /// Global roll mode applied to every d20 roll from this sheet.
    pub roll: RollMode,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything the engine knows about one actor at the start of a pass.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ActorKind,
    pub abilities: AbilityScores,
    /// Character level used when the actor has no class items.
    pub level: u32,
    pub attributes: Attributes,
    pub saves: SaveSettings,
    pub skills: SkillSettings,
    pub conditions: ActorConditions,
    pub rules: RuleFlags,
    pub sheet: SheetSettings,
    pub death: DeathSaves,
    pub items: Vec<Item>,
    /// Effects owned directly by the actor rather than an item.
    pub effects: Vec<Effect>,
    pub summon: Option<SummonLink>,
}

impl ActorSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(id),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn classes(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::Class && item.class.is_some())
    }

    /// Sum of class levels, or the stored level for class-less actors.
    pub fn character_level(&self) -> u32 {
        let levels: u32 = self
            .classes()
            .filter_map(|item| item.class.as_ref())
            .map(|class| class.levels)
            .sum();
        if levels > 0 { levels } else { self.level }
    }

    /// Levels in one class, if the actor has that class.
    pub fn class_level(&self, class: &ItemId) -> Option<u32> {
        self.item(class)
            .and_then(|item| item.class.as_ref())
            .map(|class| class.levels)
    }

    /// Proficiency bonus before any effects.
    pub fn base_prof(&self) -> i32 {
        self.attributes
            .prof
            .unwrap_or_else(|| prof_for_level(self.character_level()))
    }
}

/// +2 at levels 1-4, rising by one every four levels.
pub fn prof_for_level(level: u32) -> i32 {
    2 + (level.max(1) as i32 - 1) / 4
}
