//! Effect resolution and bonus aggregation for tabletop character sheets.
//!
//! `rules-core` turns the effects an actor carries (bonuses, multipliers,
//! setters, roll modifiers, attacks, damage) into derived statistics and
//! dice rolls. [`aggregate::recompute_actor`] is a pure function of an
//! [`ActorSnapshot`] and an injected [`RulesEnv`]; rolls additionally take a
//! [`DiceRoller`], the only source of randomness.
pub mod aggregate;
pub mod bonus;
pub mod config;
pub mod effect;
pub mod env;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod rolls;
pub mod scaling;
pub mod schema;

pub use aggregate::{
    Defenses, DerivedActorStats, ResourceStat, SkillStat, SpellcastingStats, ToolStat,
    recompute_actor,
};
pub use bonus::{BonusResolver, Dice, Part, highest_proficiency};
pub use config::{RulesConfig, STANDARD_CONFIG};
pub use effect::{Component, ComponentKind, Effect, Setter};
pub use env::{
    DiceRoller, Env, KeyLocalization, LocalizationOracle, MapLocalization, NoSnapshots,
    PcgRoller, RulesEnv, ScriptedRoller, SnapshotOracle,
};
pub use error::{ErrorSeverity, ResolveError, RollError, RulesError, SchemaError};
pub use index::ComponentIndex;
pub use model::{
    Ability, AbilityRef, AbilityScores, ActorId, ActorKind, ActorSnapshot, ComponentId,
    Condition, DamageType, EffectId, Item, ItemId, ItemKind, SnapshotRef,
};
pub use rolls::{
    D20Roll, DamageRoll, DeathSaveOutcome, EffectRollOptions, HitDiceRoll, ResourceUse, RollBody,
    RollContext, RollMessage, RollMod, RollMode, resolve_d20, resolve_death_save,
    resolve_effect_roll, roll_hit_dice,
};
pub use schema::{ComponentType, create_component};
