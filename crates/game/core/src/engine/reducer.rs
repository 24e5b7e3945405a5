use tracing::debug;

use crate::engine::spawn;
use crate::env::{OracleError, WorldEnv};
use crate::geometry::Position;
use crate::state::{ItemDrop, RpgState, StateDelta};

/// Applies [`StateDelta`] lists to an [`RpgState`].
///
/// This is the only place outside zone population where an RPG state is
/// written. Deltas apply in order; later deltas see the effect of earlier
/// ones.
pub struct StateReducer<'s, 'e> {
    state: &'s mut RpgState,
    env: WorldEnv<'e>,
}

impl<'s, 'e> StateReducer<'s, 'e> {
    pub fn new(state: &'s mut RpgState, env: WorldEnv<'e>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &RpgState {
        self.state
    }

    /// Applies every delta in order.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] when a delta references a zone or item the
    /// static data does not define. Deltas applied before the failing one stay
    /// applied; callers that need all-or-nothing apply to a scratch copy.
    pub fn apply_all(&mut self, deltas: Vec<StateDelta>) -> Result<(), OracleError> {
        for delta in deltas {
            self.apply(delta)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, delta: StateDelta) -> Result<(), OracleError> {
        match delta {
            StateDelta::PositionChanged { position } => {
                self.state.hero_position = position;
                self.discover(position)?;
            }
            StateDelta::ZoneTransition { zone_id, position } => {
                self.enter_zone(zone_id, position)?;
            }
            StateDelta::HpChanged { amount } => {
                self.state.hero.stats.adjust_hp(amount);
                self.check_death();
            }
            StateDelta::MpChanged { amount } => self.state.hero.stats.adjust_mp(amount),
            StateDelta::FullHeal => {
                let stats = &mut self.state.hero.stats;
                stats.current_hp = stats.max_hp;
            }
            StateDelta::InventoryReplaced { inventory } => self.state.inventory = inventory,
            StateDelta::GoldChanged { amount } => {
                self.state.inventory.adjust_gold(amount);
                if amount > 0 {
                    self.state.progress.gold_gained += amount as u64;
                }
            }
            StateDelta::CombatStateChanged { combat } => self.state.combat = combat,
            StateDelta::DialogueStateChanged { dialogue } => self.state.dialogue = dialogue,
            StateDelta::EnemyHpChanged { enemy_id, hp } => {
                if let Some(enemy) = self.state.world.enemies.get_mut(&enemy_id) {
                    enemy.current_hp = hp.min(enemy.max_hp);
                }
            }
            StateDelta::ChestOpened { chest_id, gold } => self.open_chest(&chest_id, gold),
            StateDelta::EnemyDefeated {
                enemy_id,
                xp,
                gold,
                loot,
            } => {
                self.defeat_enemy(&enemy_id, xp, gold);
                let position = self
                    .state
                    .world
                    .enemies
                    .get(&enemy_id)
                    .map_or(self.state.hero_position, |enemy| enemy.position);
                self.state.world.enemies.remove(&enemy_id);
                for roll in loot {
                    self.add_drop(position, roll.item_id, roll.quantity);
                }
            }
            StateDelta::ItemReceived { item, quantity } => {
                self.state.progress.items_collected += u64::from(quantity);
                if self.state.inventory.add(&item, quantity).is_err() {
                    // The whole stack spills when it does not fit.
                    let position = self.state.hero_position;
                    self.add_drop(position, item.id, quantity);
                }
            }
            StateDelta::StatusEffectAdded { effect } => {
                self.state.hero.status_effects.push(effect);
            }
            StateDelta::StatusEffectsCured => {
                self.state.hero.status_effects.cure();
            }
            StateDelta::ShopStockChanged {
                npc_id,
                item_id,
                quantity,
            } => {
                let entry = self
                    .state
                    .world
                    .npcs
                    .get_mut(&npc_id)
                    .and_then(|npc| {
                        npc.profile
                            .shop_inventory
                            .iter_mut()
                            .find(|entry| entry.item_id == item_id)
                    });
                if let Some(entry) = entry {
                    if !entry.is_unlimited() {
                        let sold = i32::try_from(quantity).unwrap_or(i32::MAX);
                        entry.stock = entry.stock.saturating_sub(sold).max(0);
                    }
                }
            }
            StateDelta::ItemDropAdded {
                position,
                item_id,
                quantity,
            } => self.add_drop(position, item_id, quantity),
            StateDelta::ItemDropRemoved { drop_id } => {
                self.state.world.item_drops.remove(&drop_id);
            }
            StateDelta::FlagSet { key, value } => {
                self.state.flags.insert(key, value);
            }
            StateDelta::NpcDialogueNode { npc_id, node } => {
                self.state.world.npc_dialogue_states.insert(npc_id, node);
            }
        }
        Ok(())
    }

    fn check_death(&mut self) {
        if self.state.hero.stats.is_dead() {
            self.state.is_alive = false;
        }
    }

    /// Updates the current region and records spawn points stepped on.
    fn discover(&mut self, position: Position) -> Result<(), OracleError> {
        let zone = self.env.zone(&self.state.world.current_zone_id)?;
        self.state.world.current_region = zone.region_at(position).map(|r| r.id.clone());
        if let Some(spawn_point) = zone.spawn_point_at(position) {
            self.state
                .world
                .discovered_spawn_points
                .insert(spawn_point.id.clone());
        }
        Ok(())
    }

    fn enter_zone(&mut self, zone_id: String, position: Position) -> Result<(), OracleError> {
        if !self.env.zone(&zone_id)?.is_walkable(position) {
            return Err(OracleError::BlockedEntry { zone_id, position });
        }
        debug!(from = %self.state.world.current_zone_id, to = %zone_id, "zone transition");

        let world = &mut self.state.world;
        world.discovered_zones.insert(zone_id.clone());
        world.current_zone_id = zone_id;
        world.clear_entities();
        self.state.combat = None;
        self.state.dialogue = None;

        spawn::populate_zone(self.state, &self.env)?;
        self.state.hero_position = position;
        self.discover(position)
    }

    fn open_chest(&mut self, chest_id: &str, gold: u32) {
        let world = &mut self.state.world;
        if let Some(chest) = world.chests.get_mut(chest_id) {
            chest.is_open = true;
            if chest.definition.is_one_time {
                world.opened_chests.insert(chest_id.to_string());
            }
        }
        self.state.inventory.add_gold(gold);
        self.state.progress.gold_gained += u64::from(gold);
    }

    /// Records the kill, ends combat and pays XP and gold. The enemy itself is
    /// removed by the caller once its position is known.
    fn defeat_enemy(&mut self, enemy_id: &str, xp: u64, gold: u32) {
        let turn = self.state.current_turn;
        let respawn_at = self
            .state
            .world
            .enemies
            .get(enemy_id)
            .and_then(|enemy| (enemy.respawn_time > 0).then(|| turn + enemy.respawn_time));
        self.state
            .world
            .killed_enemies
            .insert(enemy_id.to_string(), respawn_at);
        self.state.combat = None;

        let levels = self.state.hero.stats.gain_xp(xp);
        if levels > 0 {
            let level = self.state.hero.stats.level;
            debug!(level, "hero levelled up");
            self.state
                .console_output
                .push(format!("Level up! You are now level {level}!"));
        }
        self.state.inventory.add_gold(gold);

        let progress = &mut self.state.progress;
        progress.xp_gained += xp;
        progress.gold_gained += u64::from(gold);
        progress.enemies_defeated += 1;
    }

    fn add_drop(&mut self, position: Position, item_id: String, quantity: u32) {
        let despawn_turn = self
            .env
            .config()
            .drop_despawn_turn(self.state.current_turn);
        let id = self.state.world.allocate_drop_id();
        self.state.world.item_drops.insert(
            id.clone(),
            ItemDrop {
                id,
                position,
                item_id,
                quantity,
                despawn_turn,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, ZoneData, ZoneTransition};
    use crate::state::{LootRoll, StatusEffect, StatusEffectKind};
    use crate::systems::fixtures::{self, Fixture};

    fn apply(fixture: &Fixture, state: &mut RpgState, deltas: Vec<StateDelta>) {
        let rng = FixedRng::LOWEST;
        let mut reducer = StateReducer::new(state, fixture.env(&rng));
        reducer.apply_all(deltas).expect("deltas apply");
    }

    #[test]
    fn lethal_damage_kills_the_hero() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        apply(&fixture, &mut state, vec![StateDelta::HpChanged { amount: -500 }]);
        assert_eq!(state.hero.stats.current_hp, 0);
        assert!(!state.is_alive);
    }

    #[test]
    fn healing_is_clamped() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        state.hero.stats.current_hp = 10;
        apply(&fixture, &mut state, vec![StateDelta::HpChanged { amount: 500 }]);
        assert_eq!(state.hero.stats.current_hp, 100);
        assert!(state.is_alive);
    }

    #[test]
    fn defeat_pays_rewards_and_levels_up() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        let mut slime = fixtures::slime("slime-1", slime_position());
        slime.respawn_time = 10;
        state.world.enemies.insert(slime.id.clone(), slime);
        state.current_turn = 3;

        apply(
            &fixture,
            &mut state,
            vec![StateDelta::EnemyDefeated {
                enemy_id: "slime-1".into(),
                xp: 120,
                gold: 7,
                loot: vec![LootRoll {
                    item_id: "potion".into(),
                    quantity: 2,
                }],
            }],
        );

        assert!(state.world.enemies.is_empty());
        assert_eq!(state.world.killed_enemies.get("slime-1"), Some(&Some(13)));
        assert_eq!(state.hero.stats.level, 2);
        assert_eq!(state.hero.stats.current_xp, 20);
        assert_eq!(state.inventory.gold, 7);
        assert_eq!(state.console_output, vec!["Level up! You are now level 2!"]);
        let drop = state.world.item_drops.values().next().expect("loot dropped");
        assert_eq!(drop.position, slime_position());
        assert_eq!(drop.quantity, 2);
        assert_eq!(state.progress.enemies_defeated, 1);
    }

    fn slime_position() -> Position {
        Position::new(2, 1)
    }

    #[test]
    fn overflowing_items_spill_on_the_ground() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        state.inventory.max_slots = 0;
        apply(
            &fixture,
            &mut state,
            vec![StateDelta::ItemReceived {
                item: fixtures::sword(),
                quantity: 1,
            }],
        );
        assert_eq!(state.inventory.count("sword"), 0);
        let drop = state.world.item_drops.get("drop-0").expect("spilled");
        assert_eq!(drop.position, state.hero_position);
        assert_eq!(drop.item_id, "sword");
    }

    #[test]
    fn one_time_chests_are_remembered() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        let chest = fixtures::chest("c1", Position::new(1, 2));
        state.world.chests.insert(chest.id.clone(), chest);
        apply(
            &fixture,
            &mut state,
            vec![StateDelta::ChestOpened {
                chest_id: "c1".into(),
                gold: 10,
            }],
        );
        assert!(state.world.opened_chests.contains("c1"));
        assert!(state.world.chests.get("c1").is_some_and(|c| c.is_open));
        assert_eq!(state.inventory.gold, 10);
    }

    #[test]
    fn cure_removes_only_harmful_effects() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        apply(
            &fixture,
            &mut state,
            vec![
                StateDelta::StatusEffectAdded {
                    effect: StatusEffect::new(StatusEffectKind::Poison, 3, 2, "spider"),
                },
                StateDelta::StatusEffectAdded {
                    effect: StatusEffect::new(StatusEffectKind::Regen, 3, 2, "herb"),
                },
                StateDelta::StatusEffectsCured,
            ],
        );
        assert!(!state.hero.status_effects.has(StatusEffectKind::Poison));
        assert!(state.hero.status_effects.has(StatusEffectKind::Regen));
    }

    #[test]
    fn zone_transition_swaps_entities() {
        let mut fixture = Fixture::new();
        fixture.world.zones.push(ZoneData::open("cave", 4, 4));
        fixture.world.zones[0].transitions.push(ZoneTransition {
            id: "mouth".into(),
            position: Position::new(2, 1),
            target_zone_id: "cave".into(),
            target_position: Position::new(0, 3),
            required_key_id: None,
            is_locked: false,
        });
        let mut state = fixture.state();
        let slime = fixtures::slime("slime-1", Position::new(5, 5));
        state.world.enemies.insert(slime.id.clone(), slime);

        apply(
            &fixture,
            &mut state,
            vec![
                StateDelta::PositionChanged {
                    position: Position::new(2, 1),
                },
                StateDelta::ZoneTransition {
                    zone_id: "cave".into(),
                    position: Position::new(0, 3),
                },
            ],
        );
        assert_eq!(state.world.current_zone_id, "cave");
        assert_eq!(state.hero_position, Position::new(0, 3));
        assert!(state.world.enemies.is_empty());
        assert!(state.world.discovered_zones.contains("cave"));
    }

    #[test]
    fn blocked_landing_cell_is_refused() {
        let mut fixture = Fixture::new();
        let mut cave = ZoneData::open("cave", 3, 3);
        cave.collision_map = vec![vec![false, false, false], vec![false, true, false]];
        fixture.world.zones.push(cave);
        let mut state = fixture.state();
        let rng = FixedRng::LOWEST;
        let mut reducer = StateReducer::new(&mut state, fixture.env(&rng));

        assert_eq!(
            reducer.apply(StateDelta::ZoneTransition {
                zone_id: "cave".into(),
                position: Position::new(1, 1),
            }),
            Err(OracleError::BlockedEntry {
                zone_id: "cave".into(),
                position: Position::new(1, 1),
            })
        );
        assert_eq!(state.world.current_zone_id, fixtures::ZONE);
    }

    #[test]
    fn unknown_zone_is_an_oracle_error() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        let rng = FixedRng::LOWEST;
        let mut reducer = StateReducer::new(&mut state, fixture.env(&rng));
        assert_eq!(
            reducer.apply(StateDelta::ZoneTransition {
                zone_id: "nowhere".into(),
                position: Position::ORIGIN,
            }),
            Err(OracleError::ZoneNotFound("nowhere".into()))
        );
    }

    #[test]
    fn limited_stock_counts_down() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        let mut npc = fixtures::villager("mira", Position::new(1, 2));
        npc.profile.shop_inventory = vec![crate::env::ShopEntry {
            item_id: "potion".into(),
            price: 10,
            stock: 3,
        }];
        state.world.npcs.insert(npc.id.clone(), npc);
        apply(
            &fixture,
            &mut state,
            vec![StateDelta::ShopStockChanged {
                npc_id: "mira".into(),
                item_id: "potion".into(),
                quantity: 2,
            }],
        );
        let stock = state.world.npcs["mira"].profile.shop_inventory[0].stock;
        assert_eq!(stock, 1);
    }
}
