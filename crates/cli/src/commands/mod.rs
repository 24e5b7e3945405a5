//! Command implementations.

mod levels;
mod level;
mod validate;
mod world;

pub use level::RunLevel;
pub use levels::ListLevels;
pub use validate::Validate;
pub use world::RunWorld;

use std::path::Path;

use anyhow::Result;
use quest_content::{ContentFactory, LevelLoader, WorldLoader};
use quest_core::{LevelData, WorldData};

/// An existing file path, or the name of a level in the data directory.
fn resolve_level(factory: &ContentFactory, level: &str) -> Result<LevelData> {
    let path = Path::new(level);
    if path.is_file() {
        LevelLoader::load_validated(path)
    } else {
        factory.load_level(level)
    }
}

/// An existing file path, or the name of a world in the data directory.
fn resolve_world(factory: &ContentFactory, world: &str) -> Result<WorldData> {
    let path = Path::new(world);
    if path.is_file() {
        WorldLoader::load(path)
    } else {
        factory.load_world(world)
    }
}
