//! Replay a recorded program on a puzzle level.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use quest_content::ActionLoader;
use quest_core::{
    CodeRunner, EngineConfig, PuzzleResult, PuzzleSimulator, RecordedRunner, SandboxOutput,
    SandboxRequest,
};
use tracing::info;

use crate::config::CliConfig;
use crate::output::{self, OutputFormat, label};

/// Replay recorded actions on a puzzle level
#[derive(Parser)]
pub struct RunLevel {
    /// Level file, or the name of a level in the data directory
    #[arg(value_name = "LEVEL")]
    level: String,

    /// Recorded actions: a JSON array of actions or a sandbox output object
    #[arg(value_name = "ACTIONS")]
    actions: PathBuf,

    /// Maximum number of actions to simulate
    #[arg(short, long)]
    max_actions: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the hero's position after every turn
    #[arg(long)]
    trace: bool,
}

impl RunLevel {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let level = super::resolve_level(&config.factory(), &self.level)?;
        let max_actions = self
            .max_actions
            .or(config.max_actions)
            .unwrap_or(EngineConfig::DEFAULT_MAX_ACTIONS);

        let mut request = SandboxRequest::new(String::new(), level.allowed_methods.clone());
        request.max_actions = max_actions;
        let sandbox = RecordedRunner::new(ActionLoader::load(&self.actions)?).run(&request);

        let result = PuzzleSimulator::new(level).simulate(&sandbox.actions, max_actions);
        info!(
            level = %self.level,
            actions = sandbox.actions.len(),
            success = result.success,
            "level replay finished"
        );

        match self.format {
            OutputFormat::Json => print_json(&sandbox, &result),
            OutputFormat::Text => {
                print_text(&sandbox, &result, self.trace);
                Ok(())
            }
        }
    }
}

fn print_json(sandbox: &SandboxOutput, result: &PuzzleResult) -> Result<()> {
    let report = serde_json::json!({
        "sandbox": sandbox,
        "result": result,
        "fingerprint": output::fingerprint_hex(result.final_state.fingerprint()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(sandbox: &SandboxOutput, result: &PuzzleResult, trace: bool) {
    output::print_sandbox(&sandbox.console_output, sandbox.error.as_deref());

    if trace {
        for state in &result.turn_states {
            println!(
                "  turn {:>3}  hero {:<6} coins {}",
                state.current_turn,
                state.hero_position.to_string(),
                state.collected_coins.len()
            );
        }
    }

    let state = &result.final_state;
    println!("{} {}", label("Result:"), output::verdict(result.success));
    println!("{} {}", label("Turns:"), state.current_turn);
    println!("{} {}", label("Hero:"), state.hero_position);
    println!(
        "{} goal {}, coins {}",
        label("Win conditions:"),
        output::check(result.win_conditions_met.reach_goal),
        output::check(result.win_conditions_met.collect_all_coins)
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
