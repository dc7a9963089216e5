//! Dice: roll modifiers, d20 construction, damage, expressions and the
//! rolls an effect or the sheet can make.
//!
//! Randomness enters only through the [`DiceRoller`](crate::env::DiceRoller)
//! passed to each function; everything else is deterministic.
mod checks;
mod context;
mod d20;
mod damage;
mod death;
mod die;
mod effect;
mod expression;
mod hit_dice;
mod mode;
mod modifier;

pub use checks::{
    roll_ability_check, roll_initiative, roll_saving_throw, roll_skill_check, roll_tool_check,
};
pub use context::RollContext;
pub use d20::{D20Inputs, D20Result, D20Roll, MAX_D20, annotate_advantage, resolve_d20, roll_d20};
pub use damage::{DamageRoll, DamageSpec, roll_damage};
pub use death::{DeathSaveOutcome, resolve_death_save};
pub use die::{DieRoll, MAX_DICE, MAX_REROLLS, roll_die, roll_plain};
pub use effect::{
    EffectRollOptions, LinkedResourceRef, ResourceUse, RollBody, RollMessage, resolve_effect_roll,
    roll_effect,
};
pub use expression::{Expression, ExpressionRoll, Term};
pub use hit_dice::{HitDiceRoll, roll_hit_dice};
pub use mode::{RollMode, determine_advantage};
pub use modifier::{RollMod, combine_roll_mods, determine_roll_mods};
