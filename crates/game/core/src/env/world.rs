//! Static RPG world description: zones and their placement tables.

use std::collections::BTreeMap;

use crate::env::entities::{ChestDefinition, EnemyTemplate, NpcProfile};
use crate::env::level::HazardPattern;
use crate::geometry::Position;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TileType {
    #[default]
    Grass,
    Water,
    Stone,
    Sand,
    Dirt,
    Wall,
    Floor,
    Path,
    Void,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn contains(&self, position: Position) -> bool {
        let local = Position::new(position.x - self.x, position.y - self.y);
        local.in_bounds(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RegionTheme {
    #[default]
    Forest,
    Cave,
    Desert,
    Snow,
    Town,
    Dungeon,
    Swamp,
}

/// Named area inside a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Region {
    pub id: String,
    pub name: String,
    pub bounds: Bounds,
    pub level_range: LevelRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub theme: RegionTheme,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambient_music: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpawnPoint {
    pub id: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_default: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
}

/// Portal or door into another zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneTransition {
    pub id: String,
    pub position: Position,
    pub target_zone_id: String,
    pub target_position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_key_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_locked: bool,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZoneHazardType {
    Spike,
    Fire,
    Poison,
    Ice,
}

/// Damaging cell in a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneHazard {
    pub id: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub hazard_type: ZoneHazardType,
    pub pattern: HazardPattern,
    #[cfg_attr(feature = "serde", serde(default))]
    pub active_frames: Vec<u32>,
    pub damage: u32,
}

impl ZoneHazard {
    pub fn is_active(&self, turn: u64) -> bool {
        self.pattern.is_active(&self.active_frames, turn)
    }
}

/// Render-only scenery.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Decoration {
    pub id: String,
    pub position: Position,
    pub sprite_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layer: i32,
}

/// One map of the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneData {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub width: u32,
    pub height: u32,
    /// Terrain rows, indexed `[y][x]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub terrain: Vec<Vec<TileType>>,
    /// Blocked cells, indexed `[y][x]`. Missing cells are open.
    #[cfg_attr(feature = "serde", serde(default))]
    pub collision_map: Vec<Vec<bool>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regions: Vec<Region>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawn_points: Vec<SpawnPoint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_spawn_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transitions: Vec<ZoneTransition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hazards: Vec<ZoneHazard>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decorations: Vec<Decoration>,
}

impl ZoneData {
    /// Open `width` x `height` zone with no features.
    pub fn open(id: impl Into<String>, width: u32, height: u32) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            name: id.clone(),
            id,
            description: String::new(),
            width,
            height,
            terrain: Vec::new(),
            collision_map: Vec::new(),
            regions: Vec::new(),
            spawn_points: Vec::new(),
            default_spawn_id: String::new(),
            transitions: Vec::new(),
            hazards: Vec::new(),
            decorations: Vec::new(),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.in_bounds(self.width, self.height)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        if position.x < 0 || position.y < 0 {
            return true;
        }
        self.collision_map
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Inside the zone and not blocked by the collision map.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.contains(position) && !self.is_blocked(position)
    }

    pub fn tile(&self, position: Position) -> Option<TileType> {
        if !self.contains(position) {
            return None;
        }
        self.terrain
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    pub fn transition_at(&self, position: Position) -> Option<&ZoneTransition> {
        self.transitions.iter().find(|t| t.position == position)
    }

    pub fn region_at(&self, position: Position) -> Option<&Region> {
        self.regions.iter().find(|r| r.bounds.contains(position))
    }

    pub fn spawn_point_at(&self, position: Position) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|s| s.position == position)
    }

    pub fn hazards_at(&self, position: Position) -> impl Iterator<Item = &ZoneHazard> {
        self.hazards.iter().filter(move |h| h.position == position)
    }

    /// Spawn point named by `default_spawn_id`, else the first flagged default.
    pub fn default_spawn(&self) -> Option<&SpawnPoint> {
        self.spawn_points
            .iter()
            .find(|s| s.id == self.default_spawn_id)
            .or_else(|| self.spawn_points.iter().find(|s| s.is_default))
    }

    /// Where the hero lands without an explicit target: the default spawn
    /// point, else the origin.
    pub fn entry_position(&self) -> Position {
        self.default_spawn()
            .map_or(Position::ORIGIN, |spawn| spawn.position)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemySpawnConfig {
    /// Id of the spawned enemy instance.
    pub id: String,
    pub enemy_type: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level_min: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level_max: u32,
    /// Turns until the enemy returns after being defeated. Zero never respawns.
    #[cfg_attr(feature = "serde", serde(default))]
    pub respawn_time: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_boss: bool,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NpcPlacement {
    pub npc_id: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChestPlacement {
    pub chest_id: String,
    pub position: Position,
}

/// Complete RPG world: every zone plus placement tables keyed by zone id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorldData {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub zones: Vec<ZoneData>,
    pub start_zone_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_spawns: BTreeMap<String, Vec<EnemySpawnConfig>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub npc_placements: BTreeMap<String, Vec<NpcPlacement>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chest_placements: BTreeMap<String, Vec<ChestPlacement>>,
    /// Enemy templates keyed by enemy type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_types: BTreeMap<String, EnemyTemplate>,
    /// NPC profiles keyed by NPC id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub npcs: BTreeMap<String, NpcProfile>,
    /// Chest definitions keyed by chest id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chests: BTreeMap<String, ChestDefinition>,
}

impl WorldData {
    /// World consisting of a single zone.
    pub fn single_zone(zone: ZoneData) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            start_zone_id: zone.id.clone(),
            zones: vec![zone],
            enemy_spawns: BTreeMap::new(),
            npc_placements: BTreeMap::new(),
            chest_placements: BTreeMap::new(),
            enemy_types: BTreeMap::new(),
            npcs: BTreeMap::new(),
            chests: BTreeMap::new(),
        }
    }

    pub fn zone(&self, id: &str) -> Option<&ZoneData> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn enemy_spawns(&self, zone_id: &str) -> &[EnemySpawnConfig] {
        self.enemy_spawns.get(zone_id).map_or(&[], Vec::as_slice)
    }

    pub fn npc_placements(&self, zone_id: &str) -> &[NpcPlacement] {
        self.npc_placements.get(zone_id).map_or(&[], Vec::as_slice)
    }

    pub fn chest_placements(&self, zone_id: &str) -> &[ChestPlacement] {
        self.chest_placements.get(zone_id).map_or(&[], Vec::as_slice)
    }

    pub fn enemy_template(&self, enemy_type: &str) -> EnemyTemplate {
        self.enemy_types
            .get(enemy_type)
            .cloned()
            .unwrap_or_else(|| EnemyTemplate::fallback(enemy_type))
    }

    pub fn npc_profile(&self, npc_id: &str) -> NpcProfile {
        self.npcs
            .get(npc_id)
            .cloned()
            .unwrap_or_else(|| NpcProfile::fallback(npc_id))
    }

    pub fn chest_definition(&self, chest_id: &str) -> ChestDefinition {
        self.chests
            .get(chest_id)
            .cloned()
            .unwrap_or_else(ChestDefinition::fallback)
    }
}
