//! Check level files against the authoring rules.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use console::style;
use quest_content::{LevelLoader, validate_level};

use crate::config::CliConfig;

/// Check level files against the authoring rules
#[derive(Parser)]
pub struct Validate {
    /// Level files or level names; defaults to every level in the data directory
    #[arg(value_name = "LEVEL")]
    levels: Vec<String>,
}

impl Validate {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let factory = config.factory();
        let targets = if self.levels.is_empty() {
            factory.level_names()?
        } else {
            self.levels
        };

        let mut failed = 0usize;
        for target in &targets {
            let path = if Path::new(target).is_file() {
                PathBuf::from(target)
            } else {
                factory.data_dir().join("levels").join(format!("{target}.json"))
            };

            let problems = match LevelLoader::load(&path) {
                Ok(level) => validate_level(&level),
                Err(e) => vec![e.to_string()],
            };

            if problems.is_empty() {
                println!("{} {}", style("ok").green().bold(), target);
            } else {
                failed += 1;
                println!("{} {}", style("invalid").red().bold(), target);
                for problem in problems {
                    println!("    {problem}");
                }
            }
        }

        if failed > 0 {
            anyhow::bail!("{failed} of {} level(s) failed validation", targets.len());
        }
        Ok(())
    }
}
