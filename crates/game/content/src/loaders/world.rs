//! RPG world loader.

use std::path::Path;

use quest_core::WorldData;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for RPG worlds from JSON files.
pub struct WorldLoader;

impl WorldLoader {
    /// Load a world and check that it references only zones it defines.
    pub fn load(path: &Path) -> LoadResult<WorldData> {
        let content = read_file(path)?;
        let world: WorldData = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world {}: {}", path.display(), e))?;
        Self::check_references(&world)
            .map_err(|e| anyhow::anyhow!("Invalid world {}: {}", path.display(), e))?;

        debug!(
            path = %path.display(),
            zones = world.zones.len(),
            start = %world.start_zone_id,
            "world loaded"
        );
        Ok(world)
    }

    /// Start zone and transition targets must name existing zones, and every
    /// cell the hero can be placed on must be walkable.
    pub fn check_references(world: &WorldData) -> LoadResult<()> {
        if world.zone(&world.start_zone_id).is_none() {
            anyhow::bail!("start zone '{}' is not defined", world.start_zone_id);
        }
        for zone in &world.zones {
            let entry = zone.entry_position();
            if !zone.is_walkable(entry) {
                anyhow::bail!("spawn {} in zone '{}' is not walkable", entry, zone.id);
            }
            for transition in &zone.transitions {
                let Some(target) = world.zone(&transition.target_zone_id) else {
                    anyhow::bail!(
                        "transition '{}' in zone '{}' leads to unknown zone '{}'",
                        transition.id,
                        zone.id,
                        transition.target_zone_id
                    );
                };
                if !target.is_walkable(transition.target_position) {
                    anyhow::bail!(
                        "transition '{}' in zone '{}' lands on blocked cell {} in '{}'",
                        transition.id,
                        zone.id,
                        transition.target_position,
                        target.id
                    );
                }
            }
        }
        Ok(())
    }
}
