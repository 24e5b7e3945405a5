//! RPG world simulator.

use tracing::{debug, info, warn};

use crate::action::{Action, ActionError, ActionOutcome, ActionReport, ActionRejection};
use crate::config::EngineConfig;
use crate::engine::error::SimulationError;
use crate::engine::reducer::StateReducer;
use crate::engine::spawn;
use crate::env::{ItemOracle, ItemRegistry, PcgRng, RngOracle, WorldData, WorldEnv, ZoneData};
use crate::error::ErrorContext;
use crate::state::{HeroState, Inventory, RpgState, StateDelta};
use crate::systems::{SystemResult, combat, interaction, inventory, movement};

/// Outcome of a full world run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorldResult {
    /// The hero survived every simulated action.
    pub success: bool,
    pub final_state: RpgState,
    /// Initial state followed by the state after each simulated action.
    pub turn_states: Vec<RpgState>,
    pub error: Option<String>,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub items_collected: u64,
    pub enemies_defeated: u64,
}

/// Runs action lists against a world.
///
/// Static data, the item oracle, the RNG oracle and the configuration are
/// fixed at construction; every method takes a state and returns a new one.
/// The current zone lives in the state, so one simulator serves any number of
/// concurrent runs.
pub struct WorldSimulator<R: RngOracle = PcgRng, I: ItemOracle = ItemRegistry> {
    world: WorldData,
    items: I,
    rng: R,
    config: EngineConfig,
}

impl<I: ItemOracle> WorldSimulator<PcgRng, I> {
    /// Simulator with the PCG oracle and default configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::StartZoneNotFound` if the start zone is not
    /// one of the world's zones.
    pub fn with_items(world: WorldData, items: I) -> Result<Self, SimulationError> {
        Self::new(world, items, PcgRng, EngineConfig::default())
    }
}

impl<R: RngOracle, I: ItemOracle> WorldSimulator<R, I> {
    /// # Errors
    ///
    /// - `SimulationError::StartZoneNotFound` if the start zone is not one of
    ///   the world's zones
    /// - `SimulationError::BlockedStart` if the hero's start cell is not
    ///   walkable
    pub fn new(
        world: WorldData,
        items: I,
        rng: R,
        config: EngineConfig,
    ) -> Result<Self, SimulationError> {
        let Some(zone) = world.zone(&world.start_zone_id) else {
            return Err(SimulationError::StartZoneNotFound(world.start_zone_id.clone()));
        };
        let start = zone.entry_position();
        if !zone.is_walkable(start) {
            return Err(SimulationError::BlockedStart {
                zone_id: zone.id.clone(),
                position: start,
            });
        }
        Ok(Self {
            world,
            items,
            rng,
            config,
        })
    }

    pub fn env(&self) -> WorldEnv<'_> {
        WorldEnv::new(&self.world, &self.items, &self.rng, &self.config)
    }

    pub fn world(&self) -> &WorldData {
        &self.world
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Zone the hero of `state` is in.
    pub fn current_zone(&self, state: &RpgState) -> Option<&ZoneData> {
        self.world.zone(&state.world.current_zone_id)
    }

    /// Fresh run in the start zone.
    ///
    /// The hero stands on the zone's default spawn point, or at the origin
    /// when the zone has none, and the zone is populated.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Oracle` if the start zone cannot be resolved.
    pub fn create_initial_state(&self, seed: u64) -> Result<RpgState, SimulationError> {
        let zone = self
            .world
            .zone(&self.world.start_zone_id)
            .ok_or_else(|| SimulationError::StartZoneNotFound(self.world.start_zone_id.clone()))?;
        let start = zone.entry_position();

        let mut state = RpgState::new(
            seed,
            start,
            zone.id.clone(),
            HeroState::new(self.config.starting_level),
            Inventory::new(self.config.inventory_slots),
        );
        state.world.discovered_zones.insert(zone.id.clone());

        let env = self.env();
        spawn::populate_zone(&mut state, &env)?;
        StateReducer::new(&mut state, env).apply(StateDelta::PositionChanged { position: start })?;

        debug!(zone = %zone.id, %start, seed, "initial world state created");
        Ok(state)
    }

    /// Executes one action; see [`Self::execute_action_detailed`].
    pub fn execute_action(&self, state: &RpgState, action: &Action) -> RpgState {
        self.execute_action_detailed(state, action).0
    }

    /// Executes one action and reports what happened.
    ///
    /// The action is always appended to the history. Once the hero is dead
    /// nothing else changes. A rejected action leaves the state untouched
    /// apart from the history and its console message.
    pub fn execute_action_detailed(
        &self,
        state: &RpgState,
        action: &Action,
    ) -> (RpgState, ActionReport) {
        let mut next = state.clone();
        next.action_history.push(action.clone());
        if !next.is_alive {
            return (next, ActionReport::ignored());
        }

        let env = self.env();
        let result = self.dispatch(&next, &env, action).and_then(|outcome| {
            let mut scratch = next.clone();
            StateReducer::new(&mut scratch, env).apply_all(outcome.deltas.clone())?;
            Ok((scratch, outcome))
        });

        match result {
            Ok((mut applied, outcome)) => {
                debug!(
                    turn = applied.current_turn,
                    action = %action.kind(),
                    changes = ?outcome.changes(),
                    "action applied"
                );
                applied.console_output.push(outcome.message.clone());
                (applied, ActionReport::accepted(&outcome))
            }
            Err(error) => {
                warn!(
                    turn = next.current_turn,
                    action = %action.kind(),
                    code = crate::error::GameError::error_code(&error),
                    "action rejected: {error}"
                );
                next.console_output.push(error.to_string());
                let context = ErrorContext::new(next.current_turn).with_position(next.hero_position);
                (next, ActionReport::rejected(ActionRejection { error, context }))
            }
        }
    }

    fn dispatch(&self, state: &RpgState, env: &WorldEnv<'_>, action: &Action) -> SystemResult {
        match action {
            Action::Move { direction } => movement::move_hero(state, env, *direction),
            Action::Wait => Ok(ActionOutcome::new("You wait...")),
            Action::Attack { target_id } => combat::attack(state, env, target_id.as_deref()),
            Action::Defend => combat::defend(state),
            Action::Flee => combat::flee(state, env),
            Action::UseItem { item_id, .. } => {
                if state.in_combat() {
                    combat::use_item_in_combat(state, env, item_id)
                } else {
                    inventory::use_item(state, env, item_id)
                }
            }
            Action::Equip { item_id } => inventory::equip(state, item_id),
            Action::Unequip { slot } => inventory::unequip(state, slot),
            Action::Drop { item_id, quantity } => inventory::drop_item(state, item_id, *quantity),
            Action::PickUp { item_drop_id } => {
                interaction::pick_up(state, env, item_drop_id.as_deref())
            }
            Action::Talk { npc_id } => interaction::talk(state, npc_id.as_deref()),
            Action::SelectDialogOption { option_index } => {
                interaction::select_option(state, env, *option_index)
            }
            Action::OpenChest { chest_id } => {
                interaction::open_chest(state, env, chest_id.as_deref())
            }
            Action::Buy { item_id, quantity } => interaction::buy(state, env, item_id, *quantity),
            Action::Sell { item_id, quantity } => {
                interaction::sell(state, env, item_id, *quantity)
            }
            Action::Unknown => Err(ActionError::UnknownAction),
        }
    }

    /// World upkeep after each action.
    ///
    /// In order: the engaged enemy strikes, status effects tick, active zone
    /// hazards under the hero deal damage, the turn advances, due enemies
    /// respawn and expired drops vanish. A dead hero's state is returned
    /// unchanged, and a hero killed by the enemy's strike skips the rest.
    pub fn process_end_of_turn(&self, state: &RpgState) -> RpgState {
        let mut next = state.clone();
        if !next.is_alive {
            return next;
        }
        let env = self.env();

        if let Some(outcome) = combat::enemy_turn(&next, &env) {
            self.apply_upkeep(&mut next, outcome);
        }
        if next.hero.stats.is_dead() {
            next.is_alive = false;
        }
        if !next.is_alive {
            return next;
        }

        let hp_change = next.hero.status_effects.tick();
        if hp_change != 0 {
            next.hero.stats.adjust_hp(hp_change);
        }

        if let Some(zone) = self.current_zone(&next) {
            for hazard in zone.hazards_at(next.hero_position) {
                if hazard.is_active(next.current_turn) {
                    next.hero.stats.adjust_hp(-i64::from(hazard.damage));
                    next.console_output.push(format!(
                        "The {} deals {} damage!",
                        hazard.hazard_type, hazard.damage
                    ));
                }
            }
        }

        if next.hero.stats.is_dead() {
            next.is_alive = false;
        }

        next.current_turn += 1;
        spawn::respawn_due(&mut next, &env);
        let vanished = spawn::despawn_expired(&mut next);
        if vanished > 0 {
            debug!(turn = next.current_turn, vanished, "item drops expired");
        }
        next
    }

    fn apply_upkeep(&self, state: &mut RpgState, outcome: ActionOutcome) {
        let ActionOutcome { message, deltas } = outcome;
        if let Err(err) = StateReducer::new(state, self.env()).apply_all(deltas) {
            warn!(turn = state.current_turn, "end of turn update failed: {err}");
        }
        state.console_output.push(message);
    }

    /// Runs `actions` from a fresh state, at most `max_actions` of them.
    ///
    /// Each action is followed by end-of-turn upkeep. The run stops early
    /// when the hero dies.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial state cannot be built.
    pub fn simulate(
        &self,
        seed: u64,
        actions: &[Action],
        max_actions: usize,
    ) -> Result<WorldResult, SimulationError> {
        let mut state = self.create_initial_state(seed)?;
        let mut turn_states = vec![state.clone()];

        for action in actions.iter().take(max_actions) {
            state = self.execute_action(&state, action);
            state = self.process_end_of_turn(&state);
            turn_states.push(state.clone());
            if !state.is_alive {
                break;
            }
        }

        let progress = state.progress;
        info!(
            actions = turn_states.len() - 1,
            alive = state.is_alive,
            xp = progress.xp_gained,
            gold = progress.gold_gained,
            "world simulation finished"
        );

        Ok(WorldResult {
            success: state.is_alive,
            error: (!state.is_alive).then(|| "Hero was defeated!".to_string()),
            xp_gained: progress.xp_gained,
            gold_gained: progress.gold_gained,
            items_collected: progress.items_collected,
            enemies_defeated: progress.enemies_defeated,
            final_state: state,
            turn_states,
        })
    }

    /// Moves the hero of `state` to `zone_id`'s default spawn.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::ZoneNotFound` for an unknown zone, and
    /// `OracleError::BlockedEntry` when its spawn cell is not walkable.
    pub fn change_zone(&self, state: &RpgState, zone_id: &str) -> Result<RpgState, SimulationError> {
        let zone = self
            .world
            .zone(zone_id)
            .ok_or_else(|| SimulationError::ZoneNotFound(zone_id.to_string()))?;
        let position = zone.entry_position();

        let mut next = state.clone();
        StateReducer::new(&mut next, self.env()).apply(StateDelta::ZoneTransition {
            zone_id: zone.id.clone(),
            position,
        })?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        EnemySpawnConfig, EnemyTemplate, FixedRng, HazardPattern, OracleError, SpawnPoint,
        ZoneHazard, ZoneHazardType, ZoneTransition,
    };
    use crate::geometry::{Direction, Position};
    use crate::state::{StatusEffect, StatusEffectKind};
    use crate::systems::fixtures::{Fixture, ZONE};

    fn simulator(fixture: Fixture, rng: FixedRng) -> WorldSimulator<FixedRng> {
        WorldSimulator::new(fixture.world, fixture.items, rng, fixture.config).expect("start zone")
    }

    fn slime_fixture() -> Fixture {
        let mut fixture = Fixture::new();
        fixture.world.enemy_spawns.insert(
            ZONE.into(),
            vec![EnemySpawnConfig {
                id: "slime-1".into(),
                enemy_type: "slime".into(),
                position: Position::new(1, 0),
                level_min: 1,
                level_max: 1,
                respawn_time: 0,
                is_boss: false,
            }],
        );
        fixture
    }

    #[test]
    fn missing_start_zone_is_fatal() {
        let mut fixture = Fixture::new();
        fixture.world.start_zone_id = "nowhere".into();
        let result = WorldSimulator::new(
            fixture.world,
            fixture.items,
            FixedRng::LOWEST,
            fixture.config,
        );
        assert_eq!(
            result.err(),
            Some(SimulationError::StartZoneNotFound("nowhere".into()))
        );
    }

    #[test]
    fn initial_state_uses_default_spawn() {
        let mut fixture = slime_fixture();
        if let Some(zone) = fixture.world.zones.first_mut() {
            zone.spawn_points.push(SpawnPoint {
                id: "gate".into(),
                position: Position::new(2, 3),
                is_default: true,
                name: "Gate".into(),
            });
        }
        let sim = simulator(fixture, FixedRng::LOWEST);
        let state = sim.create_initial_state(1).expect("initial state");

        assert_eq!(state.hero_position, Position::new(2, 3));
        assert!(state.world.enemies.contains_key("slime-1"));
        assert!(state.world.discovered_spawn_points.contains("gate"));
        assert!(state.world.discovered_zones.contains(ZONE));
    }

    #[test]
    fn rejected_actions_only_log() {
        let sim = simulator(Fixture::new(), FixedRng::LOWEST);
        let state = sim.create_initial_state(1).expect("initial state");

        let (next, report) = sim.execute_action_detailed(&state, &Action::Defend);
        assert!(!report.success);
        assert_eq!(next.console_output, vec!["Not in combat".to_string()]);
        assert_eq!(next.action_history.len(), 1);
        assert_eq!(next.hero_position, state.hero_position);

        let next = sim.execute_action(&next, &Action::Unknown);
        assert_eq!(next.console_output.last().map(String::as_str), Some("Unknown action"));
    }

    #[test]
    fn dead_heroes_ignore_actions() {
        let sim = simulator(Fixture::new(), FixedRng::LOWEST);
        let mut state = sim.create_initial_state(1).expect("initial state");
        state.is_alive = false;

        let (next, report) = sim.execute_action_detailed(&state, &Action::move_to(Direction::Right));
        assert_eq!(report, ActionReport::ignored());
        assert_eq!(next.hero_position, state.hero_position);
        assert_eq!(next.action_history.len(), 1);
    }

    #[test]
    fn enemy_strikes_back_at_end_of_turn() {
        let sim = simulator(slime_fixture(), FixedRng::HIGHEST);
        let state = sim.create_initial_state(1).expect("initial state");
        assert_eq!(state.hero_position, Position::ORIGIN);

        let state = sim.execute_action(&state, &Action::Attack { target_id: None });
        let state = sim.process_end_of_turn(&state);

        assert_eq!(state.current_turn, 1);
        assert_eq!(state.hero.stats.current_hp, 92);
        assert_eq!(
            state.console_output.last().map(String::as_str),
            Some("slime attacks you for 8 damage!")
        );
    }

    #[test]
    fn zone_hazards_and_poison_hurt() {
        let mut fixture = Fixture::new();
        if let Some(zone) = fixture.world.zones.first_mut() {
            zone.hazards.push(ZoneHazard {
                id: "pit".into(),
                position: Position::ORIGIN,
                hazard_type: ZoneHazardType::Fire,
                pattern: HazardPattern::Static,
                active_frames: Vec::new(),
                damage: 15,
            });
        }
        let sim = simulator(fixture, FixedRng::LOWEST);
        let mut state = sim.create_initial_state(1).expect("initial state");
        state
            .hero
            .status_effects
            .push(StatusEffect::new(StatusEffectKind::Poison, 2, 5, "bog"));

        let state = sim.process_end_of_turn(&state);
        assert_eq!(state.hero.stats.current_hp, 80);
        assert_eq!(
            state.console_output.last().map(String::as_str),
            Some("The fire deals 15 damage!")
        );
    }

    #[test]
    fn simulation_stops_when_the_hero_falls() {
        let mut fixture = slime_fixture();
        if let Some(spawns) = fixture.world.enemy_spawns.get_mut(ZONE) {
            spawns[0].enemy_type = "ogre".into();
        }
        let mut ogre = EnemyTemplate::fallback("ogre");
        ogre.stats.attack = 400;
        fixture.world.enemy_types.insert("ogre".into(), ogre);
        let sim = simulator(fixture, FixedRng::HIGHEST);
        let actions = vec![Action::Defend, Action::Attack { target_id: None }, Action::Wait];

        let result = sim.simulate(3, &actions, 10).expect("run");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Hero was defeated!"));
        // Initial state, the rejected defend, then the fatal attack.
        assert_eq!(result.turn_states.len(), 3);
        assert_eq!(result.final_state.action_history.len(), 2);
    }

    #[test]
    fn change_zone_rejects_unknown_zones() {
        let sim = simulator(Fixture::new(), FixedRng::LOWEST);
        let state = sim.create_initial_state(1).expect("initial state");
        assert_eq!(
            sim.change_zone(&state, "void").err(),
            Some(SimulationError::ZoneNotFound("void".into()))
        );
    }

    #[test]
    fn blocked_start_cell_is_fatal() {
        let mut fixture = Fixture::new();
        if let Some(zone) = fixture.world.zones.first_mut() {
            zone.collision_map = vec![vec![true]];
        }
        let result = WorldSimulator::new(
            fixture.world,
            fixture.items,
            FixedRng::LOWEST,
            fixture.config,
        );
        assert_eq!(
            result.err(),
            Some(SimulationError::BlockedStart {
                zone_id: ZONE.into(),
                position: Position::ORIGIN,
            })
        );
    }

    #[test]
    fn hero_never_lands_on_a_blocked_cell() {
        let mut fixture = Fixture::new();
        let mut cave = ZoneData::open("cave", 3, 3);
        cave.collision_map = vec![vec![true], vec![false, true]];
        fixture.world.zones.push(cave);
        if let Some(zone) = fixture.world.zones.first_mut() {
            zone.transitions.push(ZoneTransition {
                id: "hole".into(),
                position: Position::new(1, 0),
                target_zone_id: "cave".into(),
                target_position: Position::new(1, 1),
                required_key_id: None,
                is_locked: false,
            });
        }
        let sim = simulator(fixture, FixedRng::LOWEST);
        let state = sim.create_initial_state(1).expect("initial state");

        let (next, report) = sim.execute_action_detailed(&state, &Action::move_to(Direction::Right));
        assert!(!report.success);
        assert_eq!(next.hero_position, Position::ORIGIN);
        assert_eq!(next.world.current_zone_id, ZONE);
        assert_eq!(
            next.console_output.last().map(String::as_str),
            Some("zone 'cave' cannot be entered at 1,1")
        );

        assert_eq!(
            sim.change_zone(&state, "cave").err(),
            Some(SimulationError::Oracle(OracleError::BlockedEntry {
                zone_id: "cave".into(),
                position: Position::ORIGIN,
            }))
        );
    }

    #[test]
    fn upkeep_leaves_a_dead_hero_alone() {
        let sim = simulator(Fixture::new(), FixedRng::LOWEST);
        let mut state = sim.create_initial_state(1).expect("initial state");
        state.hero.stats.current_hp = 0;
        state.is_alive = false;
        state
            .hero
            .status_effects
            .push(StatusEffect::new(StatusEffectKind::Regen, 3, 10, "spring"));

        let next = sim.process_end_of_turn(&state);
        assert_eq!(next, state);
    }

    #[test]
    fn enemy_kill_ends_upkeep() {
        let mut fixture = slime_fixture();
        let mut brute = EnemyTemplate::fallback("slime");
        brute.stats.attack = 400;
        fixture.world.enemy_types.insert("slime".into(), brute);
        let sim = simulator(fixture, FixedRng::HIGHEST);
        let mut state = sim.create_initial_state(1).expect("initial state");
        state = sim.execute_action(&state, &Action::Attack { target_id: None });
        state
            .hero
            .status_effects
            .push(StatusEffect::new(StatusEffectKind::Regen, 3, 10, "spring"));
        let turn = state.current_turn;

        let next = sim.process_end_of_turn(&state);
        assert!(!next.is_alive);
        assert_eq!(next.hero.stats.current_hp, 0);
        assert_eq!(next.current_turn, turn);
        assert_eq!(next.hero.status_effects, state.hero.status_effects);
    }
}
