//! Roll a bare d20 with flat modifiers and roll modifiers.

use anyhow::Result;
use clap::Parser;
use rules_core::rolls::roll_d20;
use rules_core::{Part, RollMod, RollMode, RulesConfig};

use super::print::print_d20;
use crate::session;

/// Roll a bare d20
#[derive(Parser)]
pub struct D20 {
    /// Flat bonus added to the roll
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    bonus: i32,

    /// Advantage inputs; repeat to stack (e.g. -m adv -m dis)
    #[arg(short, long, value_name = "MODE")]
    mode: Vec<RollMode>,

    /// Extra d20s beyond the usual two
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    extra: i32,

    /// Reroll dice below this value once
    #[arg(long, default_value_t = 1)]
    reroll: i32,

    /// Treat dice below this value as this value
    #[arg(long, default_value_t = 1)]
    min: i32,

    /// Natural roll at or above which the roll is a critical
    #[arg(long, default_value_t = RulesConfig::DEFAULT_CRIT)]
    crit: u32,

    /// Natural roll at or below which the roll is a fumble
    #[arg(long, default_value_t = RulesConfig::DEFAULT_FUMBLE)]
    fumble: u32,

    /// RNG seed for reproducible rolls
    #[arg(long, env = "RULES_SEED")]
    seed: Option<u64>,
}

impl D20 {
    pub fn execute(self) -> Result<()> {
        if self.fumble >= self.crit {
            anyhow::bail!("Fumble range ({}) overlaps crit range ({})", self.fumble, self.crit);
        }

        let roll_mod = RollMod {
            ndice: self.extra,
            reroll: self.reroll,
            min: self.min,
            ..RollMod::with_modes(self.mode)
        };
        let parts = [Part::flat(self.bonus, "Bonus")];
        let mut roller = session::roller(self.seed);

        let roll = roll_d20(&parts, &roll_mod, self.crit, self.fumble, &mut roller);
        print_d20("d20", &roll);
        Ok(())
    }
}
