//! Turn-based combat against a single enemy.
//!
//! The hero acts through [`attack`], [`defend`], [`flee`] and
//! [`use_item_in_combat`]; the enemy answers once per turn through
//! [`enemy_turn`], which the engine runs during end-of-turn processing.

use crate::action::{ActionError, ActionOutcome};
use crate::combat::{Guard, Strike, calculate_damage, flee_chance};
use crate::env::{ConsumableEffect, ItemKind, LootDrop, RollKind, WorldEnv};
use crate::state::{
    CombatMove, CombatOutcome, CombatState, Enemy, LootRoll, RpgState, StateDelta, StatusEffect,
    StatusEffectKind, actor,
};
use crate::systems::SystemResult;

/// Opens an encounter. The faster side goes first; ties favour the hero.
pub fn initiate(state: &RpgState, enemy: &Enemy) -> CombatState {
    CombatState::new(
        enemy.id.clone(),
        enemy.current_hp,
        enemy.max_hp,
        state.hero.stats.speed >= enemy.speed,
    )
}

/// Hero attack.
///
/// In combat the engaged enemy is struck. Otherwise the named target, or the
/// nearest enemy within one cell, is engaged first.
///
/// # Errors
///
/// - `ActionError::EnemyNotFound` when the engaged enemy no longer exists
/// - `ActionError::NoEnemyNearby` when no target can be found
/// - `ActionError::EnemyOutOfRange` when the target is beyond weapon range
pub fn attack(state: &RpgState, env: &WorldEnv<'_>, target_id: Option<&str>) -> SystemResult {
    let (enemy, combat) = match &state.combat {
        Some(combat) => {
            let enemy = state
                .world
                .enemies
                .get(&combat.enemy_id)
                .ok_or(ActionError::EnemyNotFound)?;
            (enemy, combat.clone())
        }
        None => {
            let enemy = select_target(state, target_id)?;
            let range = state.inventory.equipped.weapon_range();
            if state.hero_position.distance(enemy.position) > range {
                return Err(ActionError::EnemyOutOfRange(enemy.name.clone()));
            }
            (enemy, initiate(state, enemy))
        }
    };

    let strike = Strike {
        attack: state.total_attack(),
        crit_chance: state.crit_chance(),
        crit_multiplier: state.hero.stats.crit_multiplier,
    };
    let guard = Guard {
        defense: enemy.defense,
        defending: false,
    };
    let roll = env
        .rng()
        .roll_unit(state.roll_seed(actor::HERO, RollKind::HeroCritical, 0));
    let damage = calculate_damage(&strike, &guard, roll);

    let message = if damage.is_critical {
        format!(
            "Critical hit! You deal {} damage to {}!",
            damage.actual_damage, enemy.name
        )
    } else {
        format!("You attack {} for {} damage.", enemy.name, damage.actual_damage)
    };
    let outcome = CombatOutcome::new(CombatMove::Attack, CombatOutcome::HERO, &enemy.id, message)
        .with_damage(damage);

    Ok(strike_enemy(state, env, enemy, combat, outcome, damage.actual_damage))
}

fn select_target<'s>(state: &'s RpgState, target_id: Option<&str>) -> Result<&'s Enemy, ActionError> {
    match target_id {
        Some(id) => state
            .world
            .enemies
            .get(id)
            .ok_or(ActionError::NoEnemyNearby),
        None => state
            .world
            .enemies
            .values()
            .filter(|enemy| state.hero_position.distance(enemy.position) <= 1)
            .min_by_key(|enemy| state.hero_position.distance(enemy.position))
            .ok_or(ActionError::NoEnemyNearby),
    }
}

/// Applies `amount` damage to the engaged enemy and builds the resulting
/// outcome: defeat and rewards, or the updated encounter.
fn strike_enemy(
    state: &RpgState,
    env: &WorldEnv<'_>,
    enemy: &Enemy,
    mut combat: CombatState,
    mut log: CombatOutcome,
    amount: u32,
) -> ActionOutcome {
    let remaining = combat.enemy_current_hp.saturating_sub(amount);

    if remaining == 0 {
        log.message.push_str(&format!(" {} is defeated!", enemy.name));
        return ActionOutcome::new(log.message).with(StateDelta::EnemyDefeated {
            enemy_id: enemy.id.clone(),
            xp: enemy.xp_reward,
            gold: enemy.coin_reward,
            loot: roll_loot(state, env, &enemy.loot_table),
        });
    }

    let message = log.message.clone();
    combat.enemy_current_hp = remaining;
    combat.hero_is_defending = false;
    combat.record(log);
    ActionOutcome::new(message)
        .with(StateDelta::EnemyHpChanged {
            enemy_id: enemy.id.clone(),
            hp: remaining,
        })
        .with(StateDelta::CombatStateChanged {
            combat: Some(combat),
        })
}

/// Braces for the enemy's next blow, halving its damage.
///
/// # Errors
///
/// Returns `ActionError::NotInCombat` outside an encounter.
pub fn defend(state: &RpgState) -> SystemResult {
    let mut combat = state.combat.clone().ok_or(ActionError::NotInCombat)?;
    let message = "You take a defensive stance, reducing incoming damage.";
    combat.hero_is_defending = true;
    combat.record(CombatOutcome::new(
        CombatMove::Defend,
        CombatOutcome::HERO,
        CombatOutcome::HERO,
        message,
    ));
    Ok(ActionOutcome::new(message).with(StateDelta::CombatStateChanged {
        combat: Some(combat),
    }))
}

/// Attempts to escape. A failed attempt still uses the turn.
///
/// # Errors
///
/// - `ActionError::NotInCombat` outside an encounter
/// - `ActionError::NothingToFleeFrom` when the engaged enemy no longer exists
pub fn flee(state: &RpgState, env: &WorldEnv<'_>) -> SystemResult {
    let combat = state.combat.as_ref().ok_or(ActionError::NotInCombat)?;
    let enemy = state
        .world
        .enemies
        .get(&combat.enemy_id)
        .ok_or(ActionError::NothingToFleeFrom)?;

    let chance = flee_chance(state.hero.stats.speed, enemy.speed);
    let roll = env
        .rng()
        .roll_unit(state.roll_seed(actor::HERO, RollKind::Flee, 0));

    if roll < chance {
        return Ok(ActionOutcome::new("You successfully escaped!")
            .with(StateDelta::CombatStateChanged { combat: None }));
    }

    let message = format!("You failed to escape from {}!", enemy.name);
    let mut combat = combat.clone();
    combat.hero_is_defending = false;
    combat.record(
        CombatOutcome::new(CombatMove::Flee, CombatOutcome::HERO, &enemy.id, &message).failed(),
    );
    Ok(ActionOutcome::new(message).with(StateDelta::CombatStateChanged {
        combat: Some(combat),
    }))
}

/// The engaged enemy's attack. `None` outside combat or when the enemy is gone.
pub fn enemy_turn(state: &RpgState, env: &WorldEnv<'_>) -> Option<ActionOutcome> {
    let mut combat = state.combat.clone()?;
    let enemy = state.world.enemies.get(&combat.enemy_id)?;
    let config = env.config();

    let strike = Strike {
        attack: enemy.attack,
        crit_chance: config.enemy_crit_chance,
        crit_multiplier: config.enemy_crit_multiplier,
    };
    let guard = Guard {
        defense: state.total_defense(),
        defending: combat.hero_is_defending,
    };
    let roll = env
        .rng()
        .roll_unit(state.roll_seed(actor::WORLD, RollKind::EnemyCritical, 0));
    let damage = calculate_damage(&strike, &guard, roll);

    let mut message = if combat.hero_is_defending {
        format!(
            "{} attacks! You block {} damage and take {} damage.",
            enemy.name, damage.damage_blocked, damage.actual_damage
        )
    } else {
        format!("{} attacks you for {} damage!", enemy.name, damage.actual_damage)
    };
    if damage.actual_damage >= state.hero.stats.current_hp {
        message.push_str(" You have been defeated!");
    }

    combat.record(
        CombatOutcome::new(CombatMove::Attack, &enemy.id, CombatOutcome::HERO, &message)
            .with_damage(damage),
    );
    combat.hero_is_defending = false;
    combat.turn_count += 1;

    Some(
        ActionOutcome::new(message)
            .with(StateDelta::HpChanged {
                amount: -i64::from(damage.actual_damage),
            })
            .with(StateDelta::CombatStateChanged {
                combat: Some(combat),
            }),
    )
}

/// Uses a consumable mid-fight. One unit is consumed.
///
/// # Errors
///
/// - `ActionError::NotInCombat` outside an encounter
/// - `ActionError::ItemNotInInventory` when the item is not carried
/// - `ActionError::NotUsableInCombat` for non-consumables and effects with no
///   combat use
pub fn use_item_in_combat(state: &RpgState, env: &WorldEnv<'_>, item_id: &str) -> SystemResult {
    let combat = state.combat.clone().ok_or(ActionError::NotInCombat)?;
    let slot = state
        .inventory
        .find(item_id)
        .ok_or(ActionError::ItemNotInInventory)?;
    let item = &slot.item;
    let ItemKind::Consumable {
        effect,
        value,
        duration,
    } = &item.kind
    else {
        return Err(ActionError::NotUsableInCombat);
    };

    let mut inventory = state.inventory.clone();
    inventory.remove(item_id, 1)?;
    let consumed = StateDelta::InventoryReplaced { inventory };
    let buff_turns = duration.unwrap_or(env.config().combat_buff_duration);

    let (message, delta, applied) = match effect {
        ConsumableEffect::Heal => {
            let restored = (*value).min(state.hero.stats.missing_hp());
            (
                format!("You use {} and restore {} HP.", item.name, restored),
                StateDelta::HpChanged {
                    amount: i64::from(restored),
                },
                None,
            )
        }
        ConsumableEffect::Mana => {
            let restored = (*value).min(state.hero.stats.missing_mp());
            (
                format!("You use {} and restore {} MP.", item.name, restored),
                StateDelta::MpChanged {
                    amount: i64::from(restored),
                },
                None,
            )
        }
        ConsumableEffect::BuffAttack | ConsumableEffect::BuffDefense => {
            let (kind, stat) = if *effect == ConsumableEffect::BuffAttack {
                (StatusEffectKind::BuffAttack, "Attack")
            } else {
                (StatusEffectKind::BuffDefense, "Defense")
            };
            let status = StatusEffect::new(kind, buff_turns, *value, item.id.clone());
            (
                format!(
                    "You use {}. {} increased by {} for {} turns.",
                    item.name, stat, value, buff_turns
                ),
                StateDelta::StatusEffectAdded {
                    effect: status.clone(),
                },
                Some(status),
            )
        }
        ConsumableEffect::Damage => {
            let enemy = state
                .world
                .enemies
                .get(&combat.enemy_id)
                .ok_or(ActionError::EnemyNotFound)?;
            let amount = (*value).max(1);
            let log = CombatOutcome::new(
                CombatMove::UseItem,
                CombatOutcome::HERO,
                &enemy.id,
                format!(
                    "You use {} and deal {} damage to {}.",
                    item.name, amount, enemy.name
                ),
            );
            let mut outcome = strike_enemy(state, env, enemy, combat, log, amount);
            outcome.deltas.insert(0, consumed);
            return Ok(outcome);
        }
        ConsumableEffect::Cure => return Err(ActionError::NotUsableInCombat),
    };

    let mut combat = combat;
    combat.hero_is_defending = false;
    let mut log = CombatOutcome::new(
        CombatMove::UseItem,
        CombatOutcome::HERO,
        CombatOutcome::HERO,
        &message,
    );
    if let Some(status) = applied {
        log = log.with_effect(status);
    }
    combat.record(log);

    Ok(ActionOutcome::new(message)
        .with(consumed)
        .with(delta)
        .with(StateDelta::CombatStateChanged {
            combat: Some(combat),
        }))
}

/// Rolls a loot table: each entry drops when its chance roll succeeds, in a
/// quantity drawn uniformly from its range. Unknown item ids are skipped.
pub fn roll_loot(state: &RpgState, env: &WorldEnv<'_>, table: &[LootDrop]) -> Vec<LootRoll> {
    let rng = env.rng();
    table
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let index = index as u32;
            let roll = rng.roll_unit(state.roll_seed(actor::WORLD, RollKind::LootChance, index));
            if roll >= entry.chance || env.items().definition(&entry.item_id).is_none() {
                return None;
            }
            let quantity = rng.range(
                state.roll_seed(actor::WORLD, RollKind::LootQuantity, index),
                entry.min_quantity,
                entry.max_quantity,
            );
            (quantity > 0).then(|| LootRoll {
                item_id: entry.item_id.clone(),
                quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::geometry::Position;
    use crate::systems::fixtures::{self, Fixture};

    fn engaged(fixture: &Fixture) -> RpgState {
        let mut state = fixture.state();
        let enemy = fixtures::slime("slime-1", Position::new(2, 1));
        state.combat = Some(initiate(&state, &enemy));
        state.world.enemies.insert(enemy.id.clone(), enemy);
        state
    }

    #[test]
    fn attack_engages_adjacent_enemy() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        let enemy = fixtures::slime("slime-1", Position::new(2, 1));
        state.world.enemies.insert(enemy.id.clone(), enemy);

        let outcome = attack(&state, &fixture.env(&FixedRng::HIGHEST), None).expect("attack");
        // 10 attack against 5 defense: 10 - 2 = 8
        assert_eq!(outcome.message, "You attack slime for 8 damage.");
        let combat = outcome.deltas.iter().find_map(|d| match d {
            StateDelta::CombatStateChanged { combat } => combat.clone(),
            _ => None,
        });
        let combat = combat.expect("combat started");
        assert_eq!(combat.enemy_current_hp, 42);
        assert!(combat.hero_goes_first());
        assert_eq!(combat.combat_log.len(), 1);
    }

    #[test]
    fn attack_without_target_is_rejected() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        let enemy = fixtures::slime("slime-1", Position::new(5, 5));
        state.world.enemies.insert(enemy.id.clone(), enemy);
        let env = fixture.env(&FixedRng::HIGHEST);

        assert_eq!(attack(&state, &env, None), Err(ActionError::NoEnemyNearby));
        assert_eq!(
            attack(&state, &env, Some("slime-1")),
            Err(ActionError::EnemyOutOfRange("slime".into()))
        );
        assert_eq!(attack(&state, &env, Some("ghost")), Err(ActionError::NoEnemyNearby));
    }

    #[test]
    fn ranged_weapon_reaches_further() {
        let fixture = Fixture::new();
        let mut state = fixture.state();
        state.inventory.equipped.weapon = Some(fixtures::bow());
        let enemy = fixtures::slime("slime-1", Position::new(4, 1));
        state.world.enemies.insert(enemy.id.clone(), enemy);

        let outcome = attack(&state, &fixture.env(&FixedRng::HIGHEST), Some("slime-1"));
        assert!(outcome.is_ok());
    }

    #[test]
    fn critical_hit_multiplies_damage() {
        let fixture = Fixture::new();
        let state = engaged(&fixture);
        let outcome = attack(&state, &fixture.env(&FixedRng::LOWEST), None).expect("attack");
        // floor(8 * 1.5) = 12
        assert_eq!(outcome.message, "Critical hit! You deal 12 damage to slime!");
    }

    #[test]
    fn lethal_attack_defeats_enemy() {
        let fixture = Fixture::new();
        let mut state = engaged(&fixture);
        if let Some(combat) = state.combat.as_mut() {
            combat.enemy_current_hp = 5;
        }
        let outcome = attack(&state, &fixture.env(&FixedRng::HIGHEST), None).expect("attack");
        assert_eq!(outcome.message, "You attack slime for 8 damage. slime is defeated!");
        assert!(matches!(
            outcome.deltas.as_slice(),
            [StateDelta::EnemyDefeated { xp: 25, gold: 10, .. }]
        ));
    }

    #[test]
    fn defend_and_flee_require_combat() {
        let fixture = Fixture::new();
        let state = fixture.state();
        let env = fixture.env(&FixedRng::LOWEST);
        assert_eq!(defend(&state), Err(ActionError::NotInCombat));
        assert_eq!(flee(&state, &env), Err(ActionError::NotInCombat));
    }

    #[test]
    fn defending_halves_enemy_damage() {
        let fixture = Fixture::new();
        let mut state = engaged(&fixture);
        let env = fixture.env(&FixedRng::HIGHEST);

        let plain = enemy_turn(&state, &env).expect("enemy acts");
        assert_eq!(plain.message, "slime attacks you for 8 damage!");

        let outcome = defend(&state).expect("defend");
        state.combat = outcome.deltas.iter().find_map(|d| match d {
            StateDelta::CombatStateChanged { combat } => combat.clone(),
            _ => None,
        });
        let guarded = enemy_turn(&state, &env).expect("enemy acts");
        assert_eq!(
            guarded.message,
            "slime attacks! You block 4 damage and take 4 damage."
        );
        assert!(guarded.deltas.contains(&StateDelta::HpChanged { amount: -4 }));
    }

    #[test]
    fn flee_follows_roll() {
        let fixture = Fixture::new();
        let state = engaged(&fixture);

        let escaped = flee(&state, &fixture.env(&FixedRng::LOWEST)).expect("flee");
        assert_eq!(escaped.message, "You successfully escaped!");
        assert_eq!(
            escaped.deltas,
            vec![StateDelta::CombatStateChanged { combat: None }]
        );

        let caught = flee(&state, &fixture.env(&FixedRng::HIGHEST)).expect("flee");
        assert_eq!(caught.message, "You failed to escape from slime!");
    }

    #[test]
    fn potions_heal_only_missing_hp() {
        let fixture = Fixture::new();
        let mut state = engaged(&fixture);
        state.hero.stats.current_hp = 90;
        state.inventory.add(&fixtures::potion(), 2).expect("room");

        let outcome = use_item_in_combat(&state, &fixture.env(&FixedRng::HIGHEST), "potion")
            .expect("use");
        assert_eq!(outcome.message, "You use Potion and restore 10 HP.");
        assert!(outcome.deltas.contains(&StateDelta::HpChanged { amount: 10 }));
    }

    #[test]
    fn combat_buff_uses_short_duration() {
        let fixture = Fixture::new();
        let mut state = engaged(&fixture);
        state.inventory.add(&fixtures::elixir(), 1).expect("room");

        let outcome = use_item_in_combat(&state, &fixture.env(&FixedRng::HIGHEST), "elixir")
            .expect("use");
        assert_eq!(
            outcome.message,
            "You use Elixir. Attack increased by 5 for 3 turns."
        );
    }

    #[test]
    fn bombs_damage_the_enemy() {
        let fixture = Fixture::new();
        let mut state = engaged(&fixture);
        state.inventory.add(&fixtures::bomb(), 1).expect("room");

        let outcome = use_item_in_combat(&state, &fixture.env(&FixedRng::HIGHEST), "bomb")
            .expect("use");
        assert_eq!(outcome.message, "You use Bomb and deal 25 damage to slime.");
        assert!(outcome.deltas.contains(&StateDelta::EnemyHpChanged {
            enemy_id: "slime-1".into(),
            hp: 25
        }));
    }

    #[test]
    fn equipment_cannot_be_used_in_combat() {
        let fixture = Fixture::new();
        let mut state = engaged(&fixture);
        state.inventory.add(&fixtures::sword(), 1).expect("room");
        state.inventory.add(&fixtures::antidote(), 1).expect("room");
        let env = fixture.env(&FixedRng::HIGHEST);

        assert_eq!(
            use_item_in_combat(&state, &env, "sword"),
            Err(ActionError::NotUsableInCombat)
        );
        assert_eq!(
            use_item_in_combat(&state, &env, "antidote"),
            Err(ActionError::NotUsableInCombat)
        );
        assert_eq!(
            use_item_in_combat(&state, &env, "potion"),
            Err(ActionError::ItemNotInInventory)
        );
    }

    #[test]
    fn loot_rolls_respect_chance() {
        let fixture = Fixture::new();
        let state = fixture.state();
        let table = vec![
            LootDrop {
                item_id: "potion".into(),
                chance: 0.5,
                min_quantity: 1,
                max_quantity: 3,
            },
            LootDrop {
                item_id: "unknown".into(),
                chance: 1.0,
                min_quantity: 1,
                max_quantity: 1,
            },
        ];

        let rolls = roll_loot(&state, &fixture.env(&FixedRng::LOWEST), &table);
        assert_eq!(
            rolls,
            vec![LootRoll {
                item_id: "potion".into(),
                quantity: 1
            }]
        );
        assert!(roll_loot(&state, &fixture.env(&FixedRng::HIGHEST), &table).is_empty());
    }
}
