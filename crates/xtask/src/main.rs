//! Development tasks for the rules engine.
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo run -p xtask -- <command>`

mod commands;
mod dirs;
mod session;

use anyhow::Result;
use clap::Parser;
use commands::{D20, Recompute, RollCheck, RollEffect, Schema};

/// Development tasks for the rules engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Inspect actors, roll dice and browse the component schema", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Recompute an actor's derived statistics
    Recompute(Recompute),

    /// Roll everything an effect can roll
    RollEffect(RollEffect),

    /// Roll a check, save, initiative or death save for an actor
    RollCheck(RollCheck),

    /// Roll a bare d20 with modifiers
    D20(D20),

    /// List component types or show one type's defaults
    Schema(Schema),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RULES_DATA_DIR, RULES_SEED, RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Recompute(cmd) => cmd.execute(),
        Command::RollEffect(cmd) => cmd.execute(),
        Command::RollCheck(cmd) => cmd.execute(),
        Command::D20(cmd) => cmd.execute(),
        Command::Schema(cmd) => cmd.execute(),
    }
}
