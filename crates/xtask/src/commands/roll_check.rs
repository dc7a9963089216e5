//! Roll one of an actor's sheet rolls.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rules_core::rolls::{
    Expression, Term, roll_ability_check, roll_initiative, roll_saving_throw, roll_skill_check,
    roll_tool_check,
};
use rules_core::{Ability, Dice, RollContext, resolve_death_save, roll_hit_dice};

use super::print::print_d20;
use crate::session::{self, ActorArgs, Session};

/// Roll a check, save, initiative, death save or hit dice for an actor
#[derive(Parser)]
pub struct RollCheck {
    #[command(flatten)]
    actor: ActorArgs,

    /// What to roll
    #[arg(short, long, value_enum)]
    kind: CheckKind,

    /// Ability (ability/save), skill key (skill), tool id (tool) or spent
    /// dice such as `2d10+1d8` (hd)
    #[arg(short, long, value_name = "KEY")]
    target: Option<String>,

    /// RNG seed for reproducible rolls
    #[arg(long, env = "RULES_SEED")]
    seed: Option<u64>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CheckKind {
    Ability,
    Save,
    Skill,
    Tool,
    Init,
    Death,
    Hd,
}

impl RollCheck {
    fn target(&self) -> Result<&str> {
        self.target
            .as_deref()
            .context("This roll needs --target")
    }

    fn ability(&self) -> Result<Ability> {
        let key = self.target()?;
        key.parse::<Ability>()
            .with_context(|| format!("Unknown ability: {key}"))
    }

    fn hit_dice(&self) -> Result<Vec<Dice>> {
        let expr: Expression = self.target()?.parse()?;
        Ok(expr
            .terms()
            .iter()
            .filter_map(|term| match *term {
                Term::Dice {
                    count,
                    faces,
                    negative: false,
                } => Some(Dice::new(count as i32, faces)),
                _ => None,
            })
            .collect())
    }

    pub fn execute(self) -> Result<()> {
        let session = Session::open(&self.actor)?;
        let env = session.env();
        let ctx = RollContext::new(&session.actor, &env);
        let mut roller = session::roller(self.seed);

        let (label, roll) = match self.kind {
            CheckKind::Ability => {
                let ability = self.ability()?;
                let roll = roll_ability_check(&ctx, ability, &mut roller);
                (format!("{ability} check"), roll)
            }
            CheckKind::Save => {
                let ability = self.ability()?;
                let roll = roll_saving_throw(&ctx, ability, &mut roller);
                (format!("{ability} save"), roll)
            }
            CheckKind::Skill => {
                let key = self.target()?;
                (format!("{key} check"), roll_skill_check(&ctx, key, &mut roller)?)
            }
            CheckKind::Tool => {
                let id = self.target()?;
                (format!("{id} check"), roll_tool_check(&ctx, id, &mut roller)?)
            }
            CheckKind::Init => ("Initiative".to_owned(), roll_initiative(&ctx, &mut roller)),
            CheckKind::Death => {
                let outcome = resolve_death_save(&ctx, &mut roller);
                print_d20("Death save", &outcome.roll);
                let label = if outcome.success {
                    style(outcome.label).green()
                } else {
                    style(outcome.label).red()
                };
                println!(
                    "  {label}: {} successes, {} failures, HP {}",
                    outcome.death.success, outcome.death.failure, outcome.hp
                );
                return Ok(());
            }
            CheckKind::Hd => {
                let roll = roll_hit_dice(&ctx, &self.hit_dice()?, &mut roller);
                println!(
                    "{} {} = {}",
                    style("Hit dice").bold().cyan(),
                    roll.breakdown,
                    style(roll.total).bold()
                );
                return Ok(());
            }
        };

        print_d20(&label, &roll);
        Ok(())
    }
}
