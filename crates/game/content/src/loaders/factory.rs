//! Content factory for loading bundled or user data directories.

use std::path::{Path, PathBuf};

use quest_core::{EngineConfig, ItemRegistry, LevelData, WorldData};

use crate::loaders::{ConfigLoader, ItemLoader, LevelLoader, LoadResult, WorldLoader};

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── levels/
/// │   └── first-steps.json
/// └── worlds/
///     └── meadow.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load engine configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(EngineConfig::default())
        }
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemRegistry> {
        ItemLoader::load_registry(&self.data_dir.join("items.ron"))
    }

    /// Load and validate `levels/{name}.json`.
    pub fn load_level(&self, name: &str) -> LoadResult<LevelData> {
        let path = self.data_dir.join("levels").join(format!("{name}.json"));
        LevelLoader::load_validated(&path)
    }

    /// Load `worlds/{name}.json`.
    pub fn load_world(&self, name: &str) -> LoadResult<WorldData> {
        let path = self.data_dir.join("worlds").join(format!("{name}.json"));
        WorldLoader::load(&path)
    }

    /// Names of the levels in `levels/`, sorted.
    pub fn level_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("levels");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
