//! Recorded action loader.
//!
//! Accepts either a bare JSON array of actions or a full sandbox output
//! object with `actions`, `consoleOutput` and `error`.

use std::path::Path;

use quest_core::{Action, SandboxOutput};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Deserialize)]
#[serde(untagged)]
enum Recording {
    Actions(Vec<Action>),
    Output(SandboxOutput),
}

/// Loader for recorded action lists.
pub struct ActionLoader;

impl ActionLoader {
    pub fn load(path: &Path) -> LoadResult<SandboxOutput> {
        let content = read_file(path)?;
        Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actions {}: {}", path.display(), e))
    }

    pub fn from_json(json: &str) -> LoadResult<SandboxOutput> {
        let output = match serde_json::from_str(json)? {
            Recording::Actions(actions) => SandboxOutput {
                actions,
                ..SandboxOutput::default()
            },
            Recording::Output(output) => output,
        };
        Ok(output)
    }
}
