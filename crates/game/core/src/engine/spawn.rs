//! Zone population and timed world upkeep.

use tracing::debug;

use crate::env::{OracleError, WorldEnv};
use crate::state::{Chest, Enemy, Npc, RpgState};

/// Stamps the current zone's enemies, NPCs and chests into the world state.
///
/// Enemies still waiting to respawn are skipped; those whose respawn turn has
/// passed come back and leave the kill list. One-time chests that were opened
/// stay away, others are placed closed and full.
///
/// # Errors
///
/// Returns `OracleError::ZoneNotFound` if the current zone is not in the world.
pub fn populate_zone(state: &mut RpgState, env: &WorldEnv<'_>) -> Result<(), OracleError> {
    let world = env.world();
    let zone = env.zone(&state.world.current_zone_id)?;
    let turn = state.current_turn;

    for spawn in world.enemy_spawns(&zone.id) {
        if state.world.is_enemy_down(&spawn.id, turn) {
            continue;
        }
        state.world.killed_enemies.remove(&spawn.id);
        let enemy = Enemy::spawn(spawn, &world.enemy_template(&spawn.enemy_type));
        state.world.enemies.insert(enemy.id.clone(), enemy);
    }

    for placement in world.npc_placements(&zone.id) {
        let npc = Npc::spawn(placement, world.npc_profile(&placement.npc_id));
        state.world.npcs.insert(npc.id.clone(), npc);
    }

    for placement in world.chest_placements(&zone.id) {
        if state.world.opened_chests.contains(&placement.chest_id) {
            continue;
        }
        let chest = Chest::spawn(placement, world.chest_definition(&placement.chest_id));
        state.world.chests.insert(chest.id.clone(), chest);
    }

    debug!(
        zone = %zone.id,
        enemies = state.world.enemies.len(),
        npcs = state.world.npcs.len(),
        chests = state.world.chests.len(),
        "zone populated"
    );
    Ok(())
}

/// Brings back enemies of the current zone whose respawn turn has come.
///
/// Returns the ids that respawned.
pub fn respawn_due(state: &mut RpgState, env: &WorldEnv<'_>) -> Vec<String> {
    let world = env.world();
    let turn = state.current_turn;
    let mut respawned = Vec::new();

    for spawn in world.enemy_spawns(&state.world.current_zone_id) {
        let due = matches!(state.world.killed_enemies.get(&spawn.id), Some(Some(at)) if *at <= turn);
        if !due || state.world.enemies.contains_key(&spawn.id) {
            continue;
        }
        state.world.killed_enemies.remove(&spawn.id);
        let enemy = Enemy::spawn(spawn, &world.enemy_template(&spawn.enemy_type));
        state.world.enemies.insert(enemy.id.clone(), enemy);
        respawned.push(spawn.id.clone());
    }

    if !respawned.is_empty() {
        debug!(turn, ids = ?respawned, "enemies respawned");
    }
    respawned
}

/// Removes item drops whose despawn turn has come. Returns how many vanished.
pub fn despawn_expired(state: &mut RpgState) -> usize {
    let turn = state.current_turn;
    let before = state.world.item_drops.len();
    state
        .world
        .item_drops
        .retain(|_, drop| drop.despawn_turn.is_none_or(|at| at > turn));
    before - state.world.item_drops.len()
}
