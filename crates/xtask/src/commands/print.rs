//! Terminal rendering shared by the roll commands.

use console::style;
use rules_core::{D20Roll, DamageRoll};

pub fn print_d20(label: &str, roll: &D20Roll) {
    println!(
        "{} {}",
        style(label).bold().cyan(),
        style(format!("({})", roll.mode)).dim()
    );
    for result in &roll.results {
        let rolls = result
            .rolls
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        let total = if result.positive {
            style(result.total.to_string()).bold().green()
        } else if result.negative {
            style(result.total.to_string()).bold().red()
        } else {
            style(result.total.to_string()).bold()
        };
        let line = format!("  [{rolls}] {} = {total}", result.breakdown);
        if result.grey {
            println!("{}", style(line).dim());
        } else {
            println!("{line}");
        }
    }
}

pub fn print_damage(rolls: &[DamageRoll]) {
    println!("{}", style("Damage").bold().cyan());
    for roll in rolls {
        let kind = roll
            .damage
            .map(|d| d.to_string())
            .unwrap_or_else(|| "untyped".to_owned());
        let tag = if roll.versatile { " (versatile)" } else { "" };
        println!(
            "  {}{tag} [{kind}]: {} = {}  {}",
            roll.name,
            roll.breakdown,
            style(roll.total).bold(),
            style(format!("crit {}", roll.crit_total)).yellow()
        );
    }
}
