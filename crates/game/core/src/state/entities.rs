//! Live entities of the current zone.

use crate::combat::{EnemyStats, scale_enemy_stats};
use crate::env::{
    ChestDefinition, ChestPlacement, EnemyBehavior, EnemySpawnConfig, EnemyTemplate, LootDrop,
    NpcPlacement, NpcProfile,
};
use crate::geometry::Position;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Enemy {
    pub id: String,
    pub enemy_type: String,
    pub name: String,
    pub position: Position,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub crit_chance: f64,
    pub xp_reward: u64,
    pub coin_reward: u32,
    pub loot_table: Vec<LootDrop>,
    pub behavior: EnemyBehavior,
    pub aggro_range: u32,
    pub is_aggro: bool,
    /// Turns until respawn after defeat. Zero never respawns.
    pub respawn_time: u64,
    pub is_boss: bool,
}

impl Enemy {
    /// Stamps an enemy from its spawn entry and type template.
    ///
    /// Enemies spawn at the lowest level of their range.
    pub fn spawn(config: &EnemySpawnConfig, template: &EnemyTemplate) -> Self {
        let level = config.level_min.max(1);
        let stats = scale_enemy_stats(&template.stats, level);
        Self {
            id: config.id.clone(),
            enemy_type: config.enemy_type.clone(),
            name: template.name.clone(),
            position: config.position,
            level,
            max_hp: stats.max_hp,
            current_hp: stats.max_hp,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            crit_chance: stats.crit_chance,
            xp_reward: template.xp_reward,
            coin_reward: template.coin_reward,
            loot_table: template.loot_table.clone(),
            behavior: template.behavior.clone(),
            aggro_range: template.aggro_range,
            is_aggro: false,
            respawn_time: config.respawn_time,
            is_boss: config.is_boss,
        }
    }

    pub fn stats(&self) -> EnemyStats {
        EnemyStats {
            max_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            crit_chance: self.crit_chance,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub id: String,
    pub position: Position,
    pub profile: NpcProfile,
}

impl Npc {
    pub fn spawn(placement: &NpcPlacement, profile: NpcProfile) -> Self {
        Self {
            id: placement.npc_id.clone(),
            position: placement.position,
            profile,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.display_name
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Chest {
    pub id: String,
    pub position: Position,
    pub is_open: bool,
    pub definition: ChestDefinition,
}

impl Chest {
    pub fn spawn(placement: &ChestPlacement, definition: ChestDefinition) -> Self {
        Self {
            id: placement.chest_id.clone(),
            position: placement.position,
            is_open: false,
            definition,
        }
    }
}

/// Items lying on the ground.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemDrop {
    pub id: String,
    pub position: Position,
    pub item_id: String,
    pub quantity: u32,
    /// Turn at which the drop disappears. `None` keeps it forever.
    pub despawn_turn: Option<u64>,
}
