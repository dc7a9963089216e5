//! Roll an effect and print the resulting messages.

use anyhow::Result;
use clap::Parser;
use console::style;
use rules_core::effect::data::ConsumeTarget;
use rules_core::{EffectId, EffectRollOptions, ResourceUse, RollBody, resolve_effect_roll};

use super::print::{print_d20, print_damage};
use crate::session::{self, ActorArgs, Session};

/// Roll everything an effect can roll
#[derive(Parser)]
pub struct RollEffect {
    #[command(flatten)]
    actor: ActorArgs,

    /// Effect id (an item effect or one of the actor's own)
    #[arg(short, long, value_name = "EFFECT")]
    effect: String,

    /// Scaling amount: slots above base level, resource spent or breakpoint value
    #[arg(long, value_name = "N")]
    scaled: Option<i32>,

    /// Also roll and show the effect's duration
    #[arg(long)]
    duration: bool,

    /// Print messages as JSON
    #[arg(long)]
    json: bool,

    /// RNG seed for reproducible rolls
    #[arg(long, env = "RULES_SEED")]
    seed: Option<u64>,
}

impl RollEffect {
    pub fn execute(self) -> Result<()> {
        let session = Session::open(&self.actor)?;
        let options = EffectRollOptions {
            scaled_amount: self.scaled,
            with_duration: self.duration,
        };
        let mut roller = session::roller(self.seed);

        let messages = resolve_effect_roll(
            &session.actor,
            &EffectId::new(self.effect),
            &options,
            &session.env(),
            &mut roller,
        )?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&messages)?);
            return Ok(());
        }

        let Some(first) = messages.first() else {
            println!("{}", style("Nothing to roll.").dim());
            return Ok(());
        };
        println!("{}", style(format!("=== {} ===", first.title)).bold().green());

        for message in &messages {
            match &message.body {
                RollBody::Attack { key, roll } => print_d20(&format!("Attack ({key})"), roll),
                RollBody::Damage(rolls) => print_damage(rolls),
                RollBody::Save {
                    target,
                    dc,
                    effect,
                    save,
                } => {
                    println!("{} DC {dc} {target}", style("Save").bold().cyan());
                    if !effect.is_empty() {
                        println!("  on failure: {effect}");
                    }
                    if !save.is_empty() {
                        println!("  on success: {save}");
                    }
                }
                RollBody::Check { target, skill, dc } => {
                    let against = if skill.is_empty() {
                        target.to_string()
                    } else {
                        skill.clone()
                    };
                    println!("{} DC {dc} {against}", style("Check").bold().cyan());
                }
                RollBody::Expression { flavour, roll } => {
                    let label = if flavour.is_empty() { "Roll" } else { flavour.as_str() };
                    println!(
                        "{} {} = {}",
                        style(label).bold().cyan(),
                        roll.breakdown,
                        style(roll.total).bold()
                    );
                }
                RollBody::Consume(used) => print_resource("Consume", used),
                RollBody::Produce(used) => print_resource("Produce", used),
                RollBody::Description(text) => println!("{}", style(text).italic()),
                RollBody::Duration {
                    rounds,
                    concentration,
                } => {
                    let suffix = if *concentration { " (concentration)" } else { "" };
                    println!("{} {rounds} rounds{suffix}", style("Duration").bold().cyan());
                }
            }
        }
        Ok(())
    }
}

fn print_resource(label: &str, used: &ResourceUse) {
    let what = match &used.resource {
        Some(resource) => match resource.remaining {
            Some(left) => format!("{} ({left} left)", resource.name),
            None => resource.name.clone(),
        },
        None if used.target == ConsumeTarget::Spell => format!("level {} spell slot", used.slot),
        None => used.target.to_string(),
    };
    println!("{} {} {what}", style(label).bold().cyan(), used.amount);
}
