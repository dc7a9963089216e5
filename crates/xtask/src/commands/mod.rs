//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod d20;
mod print;
mod recompute;
mod roll_check;
mod roll_effect;
mod schema;

pub use d20::D20;
pub use recompute::Recompute;
pub use roll_check::RollCheck;
pub use roll_effect::RollEffect;
pub use schema::Schema;
