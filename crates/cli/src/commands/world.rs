//! Replay recorded actions in an RPG world.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use quest_content::{ActionLoader, ConfigLoader, ItemLoader};
use quest_core::{PcgRng, SandboxOutput, WorldResult, WorldSimulator};
use tracing::info;

use crate::config::CliConfig;
use crate::output::{self, OutputFormat, label};

/// Replay recorded actions in an RPG world
#[derive(Parser)]
pub struct RunWorld {
    /// World file, or the name of a world in the data directory
    #[arg(value_name = "WORLD")]
    world: String,

    /// Recorded actions: a JSON array of actions or a sandbox output object
    #[arg(value_name = "ACTIONS")]
    actions: PathBuf,

    /// Item catalog (RON or JSON). Defaults to the data directory's catalog
    #[arg(short, long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Engine configuration (TOML). Defaults to the data directory's config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Game seed. Random when neither this nor QUEST_SEED is set
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of actions to simulate
    #[arg(short, long)]
    max_actions: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl RunWorld {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let factory = config.factory();
        let world = super::resolve_world(&factory, &self.world)?;
        let items = match &self.items {
            Some(path) => ItemLoader::load_registry(path)?,
            None => factory.load_items()?,
        };
        let engine_config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };

        let seed = self
            .seed
            .or(config.seed)
            .unwrap_or_else(rand::random::<u64>);
        let max_actions = self
            .max_actions
            .or(config.max_actions)
            .unwrap_or(engine_config.max_actions);

        let mut sandbox = ActionLoader::load(&self.actions)?;
        sandbox.truncate(max_actions);

        let simulator = WorldSimulator::new(world, items, PcgRng, engine_config)?;
        let result = simulator.simulate(seed, &sandbox.actions, max_actions)?;
        info!(
            world = %self.world,
            seed,
            actions = sandbox.actions.len(),
            success = result.success,
            "world replay finished"
        );

        match self.format {
            OutputFormat::Json => print_json(seed, &sandbox, &result),
            OutputFormat::Text => {
                print_text(seed, &sandbox, &result);
                Ok(())
            }
        }
    }
}

fn print_json(seed: u64, sandbox: &SandboxOutput, result: &WorldResult) -> Result<()> {
    let report = serde_json::json!({
        "seed": seed,
        "sandbox": sandbox,
        "result": result,
        "fingerprint": output::fingerprint_hex(result.final_state.fingerprint()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(seed: u64, sandbox: &SandboxOutput, result: &WorldResult) {
    output::print_sandbox(&sandbox.console_output, sandbox.error.as_deref());

    let state = &result.final_state;
    for line in &state.console_output {
        println!("  {line}");
    }
    println!();

    let stats = &state.hero.stats;
    println!("{} {}", label("Result:"), output::verdict(result.success));
    println!("{} {}", label("Seed:"), seed);
    println!("{} {}", label("Turns:"), state.current_turn);
    println!(
        "{} {} at {}",
        label("Zone:"),
        state.world.current_zone_id,
        state.hero_position
    );
    println!(
        "{} level {}, HP {}/{}, MP {}/{}",
        label("Hero:"),
        stats.level,
        stats.current_hp,
        stats.max_hp,
        stats.current_mp,
        stats.max_mp
    );
    println!(
        "{} {} XP, {} gold, {} items, {} enemies",
        label("Gained:"),
        result.xp_gained,
        result.gold_gained,
        result.items_collected,
        result.enemies_defeated
    );
    if let Some(error) = &result.error {
        println!("{} {}", label("Error:"), error);
    }
    println!(
        "{} {}",
        label("Fingerprint:"),
        output::fingerprint_hex(state.fingerprint())
    );
}
