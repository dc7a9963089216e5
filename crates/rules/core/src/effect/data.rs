//! Variant payloads of [`Component`](super::Component).
//!
//! `Default` on every payload is the schema default for that component type;
//! persisted data with missing or unusable fields falls back to it field by
//! field.

use std::collections::BTreeMap;

use crate::model::{Ability, AbilityRef, Condition, DamageType, EffectId, ItemId};
use crate::rolls::RollMode;

macro_rules! data_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
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
        #[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }
    };
}

// ============================================================================
// Shared enums
// ============================================================================

data_enum!(
    /// Fixed value or formula-derived value.
    CalcMode {
        #[default]
        Fixed,
        Formula,
    }
);

data_enum!(BonusOperator {
    #[default]
    Plus,
    Mult,
});

data_enum!(
    /// Character level or the level of one class.
    LevelKey {
        #[default]
        Chr,
        Cls,
    }
);

data_enum!(
    /// What a formula bonus is computed from.
    FormulaValue {
        #[default]
        Prof,
        Abl,
        Chr,
        Cls,
    }
);

data_enum!(BonusMethod {
    #[default]
    Dice,
    Formula,
});

data_enum!(AttackKind {
    #[default]
    Melee,
    Ranged,
});

data_enum!(AttackCategory {
    #[default]
    Weapon,
    Spell,
});

data_enum!(AppliedOn {
    #[default]
    Target,
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    Owner,
});

data_enum!(ConsumeTarget {
    #[default]
    ThisEffect,
    ThisItem,
    Item,
    Feat,
    Spell,
    Qty,
});

data_enum!(ConsumeCalc {
    #[default]
    Fixed,
    Var,
});

data_enum!(SlotScope {
    #[default]
    Any,
    Class,
});

data_enum!(DefenseKind {
    #[default]
    Damage,
    Condition,
});

data_enum!(DefenseLevel {
    #[default]
    Res,
    Imm,
    Vuln,
});

data_enum!(ScalingMethod {
    #[default]
    Spell,
    Cantrip,
    Resource,
});

data_enum!(ResourceKey {
    #[default]
    Abl,
    Chr,
    Cls,
});

data_enum!(RechargeTime {
    #[default]
    Long,
    Short,
    Dawn,
    Dusk,
    Never,
});

data_enum!(RechargeCalc {
    #[default]
    All,
    Formula,
});

data_enum!(TargetKind {
    #[default]
    Individual,
    Area,
});

data_enum!(AreaShape {
    #[default]
    Cone,
    Cube,
    Cylinder,
    Line,
    Sphere,
});

data_enum!(SpellSource {
    #[default]
    List,
    Individual,
});

data_enum!(SpellMethod {
    #[default]
    Innate,
    Known,
    Prep,
    List,
    Item,
});

data_enum!(
    /// Top-level split of a filter: roll modifiers or score modifiers.
    FilterKind {
        #[default]
        Roll,
        Score,
    }
);

data_enum!(ScoreKind {
    #[default]
    Ability,
    Ac,
    MaxHp,
    Passive,
    Speed,
    Dc,
    Prof,
});

data_enum!(RollKind {
    #[default]
    Attack,
    Check,
    Save,
    Damage,
});

data_enum!(CheckKind {
    #[default]
    Ability,
    Skill,
    Tool,
    Init,
});

data_enum!(
    /// Damage filters select by damage type or by the attack that deals it.
    DamageFilterKind {
        #[default]
        Damage,
        Attack,
    }
);

data_enum!(
    /// `any` matches every key of its kind, `some` only keys in the collection.
    Multi {
        #[default]
        Any,
        Some,
    }
);

// ============================================================================
// Payloads
// ============================================================================

/// Links to an effect that is applied to targets rather than the owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppliedData {
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub reference: EffectId,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub on: AppliedOn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub attack: AttackKind,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub category: AttackCategory,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub ability: Option<AbilityRef>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub crit: Option<i32>,
    pub proficient: bool,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub reach: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub range1: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub range2: Option<i32>,
    pub target: String,
}

impl Default for AttackData {
    fn default() -> Self {
        Self {
            attack: AttackKind::Melee,
            category: AttackCategory::Weapon,
            ability: None,
            bonus: 0,
            crit: Some(20),
            proficient: false,
            reach: None,
            range1: None,
            range2: None,
            target: String::new(),
        }
    }
}

impl AttackData {
    /// Two-letter filter key: `mw`, `rw`, `ms` or `rs`.
    pub fn key(&self) -> &'static str {
        match (self.attack, self.category) {
            (AttackKind::Melee, AttackCategory::Weapon) => "mw",
            (AttackKind::Ranged, AttackCategory::Weapon) => "rw",
            (AttackKind::Melee, AttackCategory::Spell) => "ms",
            (AttackKind::Ranged, AttackCategory::Spell) => "rs",
        }
    }

    /// Natural roll needed for a critical hit.
    pub fn crit_threshold(&self) -> i32 {
        self.crit.unwrap_or(20)
    }

    pub fn ability(&self) -> Option<Ability> {
        self.ability.and_then(AbilityRef::ability)
    }
}

/// Whether a bonus die adds damage, and of which type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageTag {
    pub enabled: bool,
    /// `None` means the damage type of the weapon it is attached to.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", deserialize_with = "crate::model::serde_util::weapon_or_damage")
    )]
    pub damage: Option<DamageType>,
}

/// Additive bonus, either a full formula/dice component or a lightweight
/// bonus tacked onto another component.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BonusData {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_number")
    )]
    pub prof: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub ability: Option<AbilityRef>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub level: Option<LevelKey>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub class: Option<ItemId>,
    pub text: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub ndice: i32,
    pub die: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::number_or_zero")
    )]
    pub constant: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub operator: BonusOperator,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub value: Option<FormulaValue>,
    /// Set on full bonus components; absent on lightweight bonuses.
    pub formula: bool,
    pub dmg: DamageTag,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub method: BonusMethod,
    /// Computed from the summoner's statistics when owned by a summon.
    pub summoner: bool,
}

impl Default for BonusData {
    fn default() -> Self {
        Self {
            name: String::new(),
            bonus: 0,
            prof: Some(0.0),
            ability: None,
            level: None,
            class: None,
            text: String::new(),
            ndice: 0,
            die: 4,
            constant: 0.0,
            operator: BonusOperator::Plus,
            value: None,
            formula: false,
            dmg: DamageTag::default(),
            method: BonusMethod::Dice,
            summoner: false,
        }
    }
}

/// Ability or skill check forced on targets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CheckData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: CalcMode,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub fixed: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub bonus: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::number_or_zero")
    )]
    pub prof: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub ability: Option<AbilityRef>,
    pub target: Ability,
    pub skill: String,
    pub custom: String,
}

impl Default for CheckData {
    fn default() -> Self {
        Self {
            calc: CalcMode::Fixed,
            fixed: 0,
            bonus: Some(8),
            prof: 1.0,
            ability: None,
            target: Ability::Str,
            skill: String::new(),
            custom: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionData {
    pub condition: Condition,
    /// Only applied for the effect's duration.
    pub temp: bool,
}

impl Default for ConditionData {
    fn default() -> Self {
        Self {
            condition: Condition::Blinded,
            temp: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumeData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub target: ConsumeTarget,
    #[cfg_attr(feature = "serde", serde(rename = "itemID"))]
    pub item_id: ItemId,
    #[cfg_attr(feature = "serde", serde(rename = "featID"))]
    pub feat_id: ItemId,
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub reference: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: ConsumeCalc,
    pub fixed: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub slots: SlotScope,
    pub class: String,
    pub slot: u32,
}

impl Default for ConsumeData {
    fn default() -> Self {
        Self {
            target: ConsumeTarget::ThisEffect,
            item_id: ItemId::default(),
            feat_id: ItemId::default(),
            reference: String::new(),
            calc: ConsumeCalc::Fixed,
            fixed: 1,
            slots: SlotScope::Any,
            class: String::new(),
            slot: 1,
        }
    }
}

impl ConsumeData {
    pub fn link(&self) -> ResourceLink<'_> {
        ResourceLink {
            target: self.target,
            item: &self.item_id,
            feat: &self.feat_id,
            reference: &self.reference,
        }
    }
}

/// Where a consume or produce component points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceLink<'d> {
    pub target: ConsumeTarget,
    pub item: &'d ItemId,
    pub feat: &'d ItemId,
    /// Uuid of the resource component; empty picks the first one found.
    pub reference: &'d str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: CalcMode,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub ndice: i32,
    pub die: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub ability: Option<AbilityRef>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub damage: Option<DamageType>,
    /// Two-handed alternative of another damage component.
    pub versatile: bool,
    /// Multiples of `ndice` rolled again on a critical; unset means 1.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub ncrit: Option<i32>,
}

impl Default for DamageData {
    fn default() -> Self {
        Self {
            calc: CalcMode::Formula,
            ndice: 1,
            die: 4,
            ability: None,
            bonus: 0,
            damage: None,
            versatile: false,
            ncrit: None,
        }
    }
}

impl DamageData {
    pub fn crit_multiple(&self) -> i32 {
        self.ncrit.unwrap_or(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageDefense {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub level: DefenseLevel,
    pub dmg: DamageType,
    /// Qualifier such as "non-magical".
    pub magic: String,
    /// Qualifier such as "non-silvered".
    pub material: String,
}

impl Default for DamageDefense {
    fn default() -> Self {
        Self {
            level: DefenseLevel::Res,
            dmg: DamageType::Acid,
            magic: String::new(),
            material: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionDefense {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub level: DefenseLevel,
    pub condition: Condition,
}

impl Default for ConditionDefense {
    fn default() -> Self {
        Self {
            level: DefenseLevel::Imm,
            condition: Condition::Charmed,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefenseData {
    pub disease: bool,
    pub sleep: bool,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub defense: Option<DefenseKind>,
    pub damage: DamageDefense,
    pub condition: ConditionDefense,
    /// Flat damage reduction.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub dr: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DescriptionData {
    pub raw: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DurationData {
    /// Rounds.
    pub duration: u32,
    /// When set, the duration is rolled as `ndice`d`die` instead.
    pub ndice: Option<u32>,
    pub die: u32,
    pub concentration: bool,
}

impl Default for DurationData {
    fn default() -> Self {
        Self {
            duration: 1,
            ndice: None,
            die: 4,
            concentration: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpressionData {
    pub expr: String,
    pub flavour: String,
}

/// Extra dice added to a damage roll on a critical hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtraCritData {
    pub ndice: i32,
    pub die: u32,
    pub bonus: i32,
}

impl Default for ExtraCritData {
    fn default() -> Self {
        Self {
            ndice: 1,
            die: 4,
            bonus: 0,
        }
    }
}

/// Selects which scores or rolls the rest of its effect applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub filter: FilterKind,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub score: ScoreKind,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub roll: RollKind,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub check: CheckKind,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub dmg: DamageFilterKind,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub multi: Multi,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::collection_keys")
    )]
    pub collection: Vec<String>,
    /// Only applies to rolls made in this mode.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub mode: Option<RollMode>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiplierData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_number")
    )]
    pub multiplier: Option<f64>,
}

impl MultiplierData {
    /// Unset multipliers count as 1.
    pub fn factor(&self) -> f64 {
        self.multiplier.unwrap_or(1.0)
    }
}

impl Default for MultiplierData {
    fn default() -> Self {
        Self {
            multiplier: Some(1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProduceData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub target: ConsumeTarget,
    #[cfg_attr(feature = "serde", serde(rename = "itemID"))]
    pub item_id: ItemId,
    #[cfg_attr(feature = "serde", serde(rename = "featID"))]
    pub feat_id: ItemId,
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub reference: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: ConsumeCalc,
    pub fixed: u32,
    pub unlimited: bool,
    pub slot: u32,
}

impl Default for ProduceData {
    fn default() -> Self {
        Self {
            target: ConsumeTarget::ThisEffect,
            item_id: ItemId::default(),
            feat_id: ItemId::default(),
            reference: String::new(),
            calc: ConsumeCalc::Fixed,
            fixed: 1,
            unlimited: false,
            slot: 1,
        }
    }
}

impl ProduceData {
    pub fn link(&self) -> ResourceLink<'_> {
        ResourceLink {
            target: self.target,
            item: &self.item_id,
            feat: &self.feat_id,
            reference: &self.reference,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Recharge {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub time: RechargeTime,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: RechargeCalc,
    pub ndice: u32,
    pub die: u32,
    pub bonus: i32,
}

impl Default for Recharge {
    fn default() -> Self {
        Self {
            time: RechargeTime::Long,
            calc: RechargeCalc::All,
            ndice: 0,
            die: 2,
            bonus: 0,
        }
    }
}

/// A pool of limited uses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceData {
    pub name: String,
    pub recharge: Recharge,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub bonus: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub operator: BonusOperator,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub key: ResourceKey,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub ability: Option<Ability>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub class: Option<ItemId>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub min: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: CalcMode,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub fixed: i32,
    pub pool: bool,
    pub die: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub remaining: Option<i32>,
}

impl Default for ResourceData {
    fn default() -> Self {
        Self {
            name: String::new(),
            recharge: Recharge::default(),
            bonus: 0,
            operator: BonusOperator::Plus,
            key: ResourceKey::Abl,
            ability: None,
            class: None,
            min: 0,
            calc: CalcMode::Fixed,
            fixed: 0,
            pool: false,
            die: 4,
            remaining: None,
        }
    }
}

/// One roll modifier as authored. See [`crate::rolls::RollMod`] for the
/// combined form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RollModData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub min: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub reroll: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub mode: RollMode,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub ndice: i32,
    pub max: bool,
    pub mcrit: i32,
}

impl Default for RollModData {
    fn default() -> Self {
        Self {
            min: 1,
            reroll: 1,
            mode: RollMode::Reg,
            ndice: 0,
            max: false,
            mcrit: 20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RollTableData {
    pub tables: Vec<String>,
    pub nrolls: u32,
    pub reset: bool,
}

impl Default for RollTableData {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            nrolls: 1,
            reset: true,
        }
    }
}

/// Saving throw forced on targets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub calc: CalcMode,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub fixed: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub bonus: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::number_or_zero")
    )]
    pub prof: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub ability: Option<AbilityRef>,
    pub target: Ability,
    /// What happens on a successful save ("half", "none", ...).
    pub effect: String,
    pub save: String,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            calc: CalcMode::Fixed,
            fixed: 0,
            bonus: Some(8),
            prof: 1.0,
            ability: None,
            target: Ability::Con,
            effect: String::new(),
            save: String::new(),
        }
    }
}

/// Marks its effect as a scaled variant of the effect named by `reference`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScalingData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub method: ScalingMethod,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::empty_as_none")
    )]
    pub class: Option<ItemId>,
    pub text: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::lenient_int")
    )]
    pub threshold: Option<i32>,
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub reference: EffectId,
}

/// Overrides (`min == false`) or floors (`min == true`) a score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Setter {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::int_or_zero")
    )]
    pub score: i32,
    pub min: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SpellsData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub source: SpellSource,
    pub list: String,
    pub spells: Vec<ItemId>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub method: SpellMethod,
    pub class: String,
    pub ability: Ability,
    pub upcast: bool,
    pub level: u8,
    pub no_slot: bool,
}

impl Default for SpellsData {
    fn default() -> Self {
        Self {
            source: SpellSource::List,
            list: "clr".to_owned(),
            spells: Vec::new(),
            method: SpellMethod::Innate,
            class: String::new(),
            ability: Ability::Cha,
            upcast: false,
            level: 0,
            no_slot: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Enabled {
    pub enabled: bool,
}

/// Conjures creatures whose statistics may draw on the summoner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SummonData {
    pub actors: Vec<String>,
    pub prof: bool,
    pub ac: Enabled,
    pub hp: Enabled,
    pub tmp: Enabled,
    pub dmg: Enabled,
    pub attack: String,
    pub save: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub target: TargetKind,
    pub count: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::model::serde_util::parse_or_default")
    )]
    pub area: AreaShape,
    pub distance: u32,
}

impl Default for TargetData {
    fn default() -> Self {
        Self {
            target: TargetKind::Individual,
            count: 1,
            area: AreaShape::Cone,
            distance: 0,
        }
    }
}

/// Restricts the effect's filters to rolls made with one of these abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UsesAbilityData {
    pub abilities: BTreeMap<Ability, bool>,
}

impl UsesAbilityData {
    pub fn selected(&self) -> impl Iterator<Item = Ability> + '_ {
        self.abilities
            .iter()
            .filter(|(_, on)| **on)
            .map(|(ability, _)| *ability)
    }
}
