//! List the levels in the data directory.

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::config::CliConfig;

/// List the levels in the data directory
#[derive(Parser)]
pub struct ListLevels {}

impl ListLevels {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let factory = config.factory();
        println!(
            "{} {}",
            style("Data Directory:").bold().cyan(),
            factory.data_dir().display()
        );

        for name in factory.level_names()? {
            match factory.load_level(&name) {
                Ok(level) => println!(
                    "  {:<16} {}x{}  methods: {}",
                    name,
                    level.grid_width,
                    level.grid_height,
                    level
                        .allowed_methods
                        .iter()
                        .map(|m| m.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                Err(e) => println!("  {:<16} {}", name, style(e).red()),
            }
        }
        Ok(())
    }
}
