use std::collections::{BTreeMap, BTreeSet};

use crate::state::{Chest, Enemy, ItemDrop, Npc};

/// Mutable snapshot of the world around the hero.
///
/// Entity maps only hold the current zone's entities; bookkeeping sets span
/// the whole run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorldState {
    pub current_zone_id: String,
    pub current_region: Option<String>,
    pub enemies: BTreeMap<String, Enemy>,
    pub npcs: BTreeMap<String, Npc>,
    pub chests: BTreeMap<String, Chest>,
    pub item_drops: BTreeMap<String, ItemDrop>,
    /// One-time chests that were opened.
    pub opened_chests: BTreeSet<String>,
    /// Defeated enemy id to the turn it may return. `None` never returns.
    pub killed_enemies: BTreeMap<String, Option<u64>>,
    pub discovered_zones: BTreeSet<String>,
    pub discovered_spawn_points: BTreeSet<String>,
    /// Last dialogue node visited per NPC.
    pub npc_dialogue_states: BTreeMap<String, String>,
    pub next_drop_id: u64,
}

impl WorldState {
    pub fn new(zone_id: impl Into<String>) -> Self {
        let zone_id = zone_id.into();
        Self {
            discovered_zones: BTreeSet::from([zone_id.clone()]),
            current_zone_id: zone_id,
            current_region: None,
            enemies: BTreeMap::new(),
            npcs: BTreeMap::new(),
            chests: BTreeMap::new(),
            item_drops: BTreeMap::new(),
            opened_chests: BTreeSet::new(),
            killed_enemies: BTreeMap::new(),
            discovered_spawn_points: BTreeSet::new(),
            npc_dialogue_states: BTreeMap::new(),
            next_drop_id: 0,
        }
    }

    /// Reserves a fresh item drop id.
    pub fn allocate_drop_id(&mut self) -> String {
        let id = format!("drop-{}", self.next_drop_id);
        self.next_drop_id += 1;
        id
    }

    /// True when the enemy was defeated and has not yet respawned at `turn`.
    pub fn is_enemy_down(&self, enemy_id: &str, turn: u64) -> bool {
        match self.killed_enemies.get(enemy_id) {
            Some(Some(respawn_turn)) => turn < *respawn_turn,
            Some(None) => true,
            None => false,
        }
    }

    /// Removes every live entity, keeping run bookkeeping.
    pub fn clear_entities(&mut self) {
        self.enemies.clear();
        self.npcs.clear();
        self.chests.clear();
        self.item_drops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_ids_are_sequential() {
        let mut world = WorldState::new("meadow");
        assert_eq!(world.allocate_drop_id(), "drop-0");
        assert_eq!(world.allocate_drop_id(), "drop-1");
        assert!(world.discovered_zones.contains("meadow"));
    }

    #[test]
    fn killed_enemies_stay_down_until_respawn_turn() {
        let mut world = WorldState::new("meadow");
        world.killed_enemies.insert("wolf".into(), Some(12));
        world.killed_enemies.insert("boss".into(), None);
        assert!(world.is_enemy_down("wolf", 11));
        assert!(!world.is_enemy_down("wolf", 12));
        assert!(world.is_enemy_down("boss", 1_000));
        assert!(!world.is_enemy_down("slime", 0));
    }
}
