//! Persisted actor, item and reference types.
//!
//! These mirror the stored sheet data. They are never mutated by the engine;
//! every derived value lives in [`crate::aggregate::DerivedActorStats`].
mod ability;
mod actor;
mod conditions;
mod damage;
mod ids;
mod item;
#[cfg(feature = "serde")]
pub(crate) mod serde_util;

pub use ability::{Ability, AbilityRef, AbilityScores, ability_modifier};
pub use actor::{
    ActorKind, ActorSnapshot, ArmourClass, Attributes, DeathSaves, HitPoints, Initiative,
    SaveEntry, SaveSettings, SheetSettings, Skill, SkillEntry, SkillSettings, SpeedKind, Speeds,
    SummonLink, ToolEntry, prof_for_level,
};
pub use conditions::{ActorConditions, Condition, ConditionSet, RuleFlags};
pub use damage::DamageType;
pub use ids::{ActorId, ComponentId, EffectId, ItemId, SnapshotRef};
pub use item::{
    Armour, ArmourKind, ClassData, ClassKey, DurationLink, Item, ItemKind, ItemSource, SourceKind,
    SpellData,
};
