//! Read-only data the simulators consult.
//!
//! Static level and world descriptions, the item catalog, and the RNG oracle.
//! The [`WorldEnv`] aggregate bundles what the RPG systems need so that each
//! system receives one borrowed handle instead of four separate arguments.
mod entities;
mod error;
mod items;
mod level;
mod rng;
mod world;

pub use entities::{
    BehaviorPattern, ChestDefinition, ChestType, Dialogue, DialogueAction, DialogueNode,
    DialogueOption, EnemyBehavior, EnemyTemplate, LootDrop, NpcProfile, NpcType, ShopEntry,
};
pub use error::OracleError;
pub use items::{
    ConsumableEffect, EquipSlot, Item, ItemKind, ItemOracle, ItemRegistry, Rarity, WeaponType,
};
pub use level::{Hazard, HazardPattern, HazardType, LevelData, LevelIndex, WinConditions};
pub use rng::{FixedRng, PcgRng, RngOracle, RollKind, compute_seed};
pub use world::{
    Bounds, ChestPlacement, Decoration, EnemySpawnConfig, LevelRange, NpcPlacement, Region,
    RegionTheme, SpawnPoint, TileType, WorldData, ZoneData, ZoneHazard, ZoneHazardType,
    ZoneTransition,
};

use crate::config::EngineConfig;

/// Aggregates the read-only inputs of the RPG systems.
#[derive(Clone, Copy)]
pub struct WorldEnv<'a> {
    world: &'a WorldData,
    items: &'a dyn ItemOracle,
    rng: &'a dyn RngOracle,
    config: &'a EngineConfig,
}

impl<'a> WorldEnv<'a> {
    pub fn new(
        world: &'a WorldData,
        items: &'a dyn ItemOracle,
        rng: &'a dyn RngOracle,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            world,
            items,
            rng,
            config,
        }
    }

    pub fn world(&self) -> &'a WorldData {
        self.world
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Looks up a zone by id.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ZoneNotFound` if the world has no such zone.
    pub fn zone(&self, zone_id: &str) -> Result<&'a ZoneData, OracleError> {
        self.world
            .zone(zone_id)
            .ok_or_else(|| OracleError::ZoneNotFound(zone_id.to_string()))
    }

    /// Looks up an item definition by id.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemNotFound` if the catalog has no such item.
    pub fn item(&self, item_id: &str) -> Result<&'a Item, OracleError> {
        self.items
            .definition(item_id)
            .ok_or_else(|| OracleError::ItemNotFound(item_id.to_string()))
    }
}

impl core::fmt::Debug for WorldEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorldEnv")
            .field("world", &self.world.id)
            .field("items", &self.items.all_definitions().len())
            .field("config", self.config)
            .finish()
    }
}
