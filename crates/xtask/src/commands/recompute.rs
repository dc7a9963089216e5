//! Recompute an actor and display its derived statistics.

use anyhow::Result;
use clap::Parser;
use console::style;
use rules_core::model::SpeedKind;
use rules_core::{Ability, DerivedActorStats, recompute_actor};

use crate::session::{ActorArgs, Session};

/// Recompute an actor's derived statistics
#[derive(Parser)]
pub struct Recompute {
    #[command(flatten)]
    actor: ActorArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Sheet-style summary
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Recompute {
    pub fn execute(self) -> Result<()> {
        let session = Session::open(&self.actor)?;
        let stats = recompute_actor(&session.actor, &session.env());

        match self.format {
            OutputFormat::Summary => print_summary(&session, &stats),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            OutputFormat::Debug => println!("{stats:#?}"),
        }
        Ok(())
    }
}

fn signed(value: i32) -> String {
    format!("{value:+}")
}

fn print_summary(session: &Session, stats: &DerivedActorStats) {
    let actor = &session.actor;
    println!(
        "{} {} ({})",
        style("=== Actor ===").bold().green(),
        style(&actor.name).bold(),
        actor.id
    );
    println!();

    println!("{}", style("Abilities:").bold().yellow());
    for ability in Ability::ALL {
        let modifier = stats.ability_mods.get(&ability).copied().unwrap_or_default();
        let save = stats.saves.get(&ability).copied().unwrap_or_default();
        println!(
            "  {:<4} {:>3} ({:>3})   save {:>3}",
            ability.to_string(),
            stats.abilities.get(ability),
            signed(modifier),
            signed(save)
        );
    }
    println!();

    println!("{}", style("Combat:").bold().yellow());
    println!("  Proficiency: {}", signed(stats.prof));
    println!("  AC: {}", stats.ac);
    println!("  HP max: {}", stats.hp_max);
    println!("  Initiative: {}", signed(stats.initiative));
    let speeds = SpeedKind::ALL
        .iter()
        .filter(|&&kind| stats.speeds.get(kind) > 0)
        .map(|&kind| format!("{kind} {}", stats.speeds.get(kind)))
        .collect::<Vec<_>>();
    println!("  Speed: {}", if speeds.is_empty() { "0".to_owned() } else { speeds.join(", ") });
    if stats.exhaustion > 0 {
        println!("  Exhaustion: {}", stats.exhaustion);
    }
    println!();

    println!("{}", style("Skills:").bold().yellow());
    for (key, skill) in &stats.skills {
        let label = skill.label.as_deref().unwrap_or(key);
        println!(
            "  {:<18} {:>3}  passive {}",
            label,
            signed(skill.modifier),
            skill.passive
        );
    }
    for tool in &stats.tools {
        println!("  {:<18} {:>3}", tool.label, signed(tool.modifier));
    }

    if !stats.spellcasting.is_empty() {
        println!();
        println!("{}", style("Spellcasting:").bold().yellow());
        for caster in &stats.spellcasting {
            println!(
                "  {} ({}): attack {}, save DC {}",
                caster.class,
                caster.ability,
                signed(caster.attack),
                caster.save
            );
        }
    }

    if !stats.resources.is_empty() {
        println!();
        println!("{}", style("Resources:").bold().yellow());
        for resource in &stats.resources {
            println!("  {}: {}/{}", resource.name, resource.remaining, resource.max);
        }
    }

    let defenses = &stats.defenses;
    let damage_list = |list: &[rules_core::aggregate::DamageDefenseStat]| {
        list.iter()
            .map(|d| d.damage.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    if !defenses.resistances.is_empty()
        || !defenses.immunities.is_empty()
        || !defenses.vulnerabilities.is_empty()
    {
        println!();
        println!("{}", style("Defenses:").bold().yellow());
        println!("  Resistant: {}", damage_list(&defenses.resistances));
        println!("  Immune: {}", damage_list(&defenses.immunities));
        println!("  Vulnerable: {}", damage_list(&defenses.vulnerabilities));
    }
    if let Some(dr) = defenses.dr {
        println!("  Damage reduction: {dr}");
    }

    if !stats.conditions.is_empty() {
        println!();
        println!("{} {:?}", style("Conditions:").bold().yellow(), stats.conditions);
    }
}
