//! Puzzle level loader.

use std::path::Path;

use quest_core::LevelData;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};
use crate::validate::validate_level;

/// Loader for puzzle levels from JSON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level from a JSON file without checking authoring rules.
    pub fn load(path: &Path) -> LoadResult<LevelData> {
        let content = read_file(path)?;
        Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level {}: {}", path.display(), e))
    }

    /// Parse a level from JSON text.
    pub fn from_json(json: &str) -> LoadResult<LevelData> {
        let level: LevelData = serde_json::from_str(json)?;
        Ok(level)
    }

    /// Load a level and reject it when [`validate_level`] reports problems.
    pub fn load_validated(path: &Path) -> LoadResult<LevelData> {
        let level = Self::load(path)?;
        let problems = validate_level(&level);
        if !problems.is_empty() {
            anyhow::bail!(
                "Invalid level {}:\n  {}",
                path.display(),
                problems.join("\n  ")
            );
        }
        debug!(
            path = %path.display(),
            width = level.grid_width,
            height = level.grid_height,
            "level loaded"
        );
        Ok(level)
    }
}
