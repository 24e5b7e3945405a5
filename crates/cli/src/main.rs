//! Command-line driver for the quest engine.
//!
//! Replays recorded action lists against puzzle levels and RPG worlds and
//! checks level files. Run with: `quest <command>`

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{ListLevels, RunLevel, RunWorld, Validate};
use config::CliConfig;

/// Replay and inspect quest levels and worlds
#[derive(Parser)]
#[command(name = "quest")]
#[command(about = "Deterministic replays for quest levels and worlds", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay recorded actions on a puzzle level
    Level(RunLevel),

    /// Replay recorded actions in an RPG world
    World(RunWorld),

    /// Check level files against the authoring rules
    Validate(Validate),

    /// List the levels in the data directory
    Levels(ListLevels),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();
    let config = CliConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Level(cmd) => cmd.execute(&config),
        Command::World(cmd) => cmd.execute(&config),
        Command::Validate(cmd) => cmd.execute(&config),
        Command::Levels(cmd) => cmd.execute(&config),
    }
}

/// Logs go to stderr so stdout stays machine-readable with `--format json`.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
