//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

use quest_content::ContentFactory;

/// Settings shared by every command.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub max_actions: Option<usize>,
    pub seed: Option<u64>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `QUEST_DATA_DIR` - Content directory for named levels and worlds (default: bundled data)
    /// - `QUEST_MAX_ACTIONS` - Action cap when a command does not set one
    /// - `QUEST_SEED` - World seed when a command does not set one (default: random)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("QUEST_DATA_DIR").ok().map(PathBuf::from),
            max_actions: read_env::<usize>("QUEST_MAX_ACTIONS"),
            seed: read_env::<u64>("QUEST_SEED"),
        }
    }

    pub fn factory(&self) -> ContentFactory {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
