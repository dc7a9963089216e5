//! Bonus part resolution.
//!
//! A bonus component (or a lightweight bonus embedded in another component)
//! resolves to zero or more [`Part`]s against an actor's statistics.
mod part;
mod resolve;

pub use part::{Dice, Part, highest_proficiency, total};
pub use resolve::{ActorContext, BonusResolver};
