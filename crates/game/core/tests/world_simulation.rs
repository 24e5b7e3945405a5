//! World scenarios driven through the public `WorldSimulator` API.

use std::collections::BTreeMap;

use quest_core::env::{
    ChestDefinition, ChestPlacement, ConsumableEffect, Dialogue, DialogueAction, DialogueNode,
    DialogueOption, EnemySpawnConfig, EnemyTemplate, EquipSlot, ItemKind, LootDrop, NpcPlacement,
    NpcProfile, NpcType, Rarity, ShopEntry, SpawnPoint, WeaponType, ZoneTransition,
};
use quest_core::state::Inventory;
use quest_core::{
    Action, Direction, EngineConfig, FixedRng, Item, ItemRegistry, Position, RpgState, WorldData,
    WorldSimulator, ZoneData,
};

fn item(id: &str, name: &str, kind: ItemKind) -> Item {
    Item {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        rarity: Rarity::Common,
        stackable: true,
        max_stack: 10,
        value: 20,
        sprite_key: String::new(),
        kind,
    }
}

fn potion() -> Item {
    item(
        "potion",
        "Potion",
        ItemKind::Consumable {
            effect: ConsumableEffect::Heal,
            value: 30,
            duration: None,
        },
    )
}

fn catalog() -> ItemRegistry {
    [
        potion(),
        item(
            "gate-key",
            "Gate Key",
            ItemKind::Key {
                unlocks_chest_id: None,
                unlocks_door_id: Some("gate".into()),
            },
        ),
    ]
    .into_iter()
    .collect()
}

fn blade(id: &str, name: &str, attack_bonus: u32) -> Item {
    Item {
        stackable: false,
        max_stack: 1,
        ..item(
            id,
            name,
            ItemKind::Weapon {
                weapon_type: WeaponType::Sword,
                attack_bonus,
                crit_bonus: 0.0,
                range: 1,
            },
        )
    }
}

fn option(text: &str, next_node: Option<&str>, action: Option<DialogueAction>) -> DialogueOption {
    DialogueOption {
        text: text.into(),
        next_node: next_node.map(Into::into),
        action,
    }
}

fn merchant() -> NpcProfile {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        "start".to_string(),
        DialogueNode {
            text: "Welcome!".into(),
            options: vec![
                option("Show me your wares", Some("shop"), Some(DialogueAction::OpenShop)),
                option("Bye", None, None),
            ],
        },
    );
    nodes.insert(
        "shop".to_string(),
        DialogueNode {
            text: "Take a look.".into(),
            options: vec![option("Thanks", None, None)],
        },
    );
    NpcProfile {
        display_name: "Mira".into(),
        npc_type: NpcType::Merchant,
        dialogue: Dialogue {
            start_node: "start".into(),
            nodes,
        },
        is_shopkeeper: true,
        shop_inventory: vec![ShopEntry {
            item_id: "potion".into(),
            price: 15,
            stock: 2,
        }],
        sprite_key: "merchant".into(),
    }
}

/// Village with a merchant, a gold chest, a key chest and a locked gate to
/// the forest. The forest holds one weak slime.
fn world() -> WorldData {
    let mut village = ZoneData::open("village", 6, 4);
    village.spawn_points.push(SpawnPoint {
        id: "square".into(),
        position: Position::new(1, 1),
        is_default: true,
        name: "Square".into(),
    });
    village.transitions.push(ZoneTransition {
        id: "gate".into(),
        position: Position::new(1, 0),
        target_zone_id: "forest".into(),
        target_position: Position::new(0, 2),
        required_key_id: Some("gate-key".into()),
        is_locked: true,
    });

    let mut world = WorldData::single_zone(village);
    world.zones.push(ZoneData::open("forest", 5, 5));
    world.npc_placements.insert(
        "village".into(),
        vec![NpcPlacement {
            npc_id: "mira".into(),
            position: Position::new(2, 1),
        }],
    );
    world.npcs.insert("mira".into(), merchant());
    world.chest_placements.insert(
        "village".into(),
        vec![
            ChestPlacement {
                chest_id: "purse".into(),
                position: Position::new(1, 2),
            },
            ChestPlacement {
                chest_id: "lockbox".into(),
                position: Position::new(0, 1),
            },
        ],
    );
    world.chests.insert(
        "purse".into(),
        ChestDefinition {
            coin_amount: 40,
            contents: vec![LootDrop {
                item_id: "potion".into(),
                chance: 1.0,
                min_quantity: 1,
                max_quantity: 1,
            }],
            ..ChestDefinition::fallback()
        },
    );
    world.chests.insert(
        "lockbox".into(),
        ChestDefinition {
            coin_amount: 0,
            contents: vec![LootDrop {
                item_id: "gate-key".into(),
                chance: 1.0,
                min_quantity: 1,
                max_quantity: 1,
            }],
            ..ChestDefinition::fallback()
        },
    );

    let mut slime = EnemyTemplate::fallback("slime");
    slime.stats.max_hp = 5;
    slime.stats.defense = 0;
    slime.stats.speed = 1;
    slime.xp_reward = 150;
    world.enemy_types.insert("slime".into(), slime);
    world.enemy_spawns.insert(
        "forest".into(),
        vec![EnemySpawnConfig {
            id: "slime-1".into(),
            enemy_type: "slime".into(),
            position: Position::new(1, 2),
            level_min: 1,
            level_max: 1,
            respawn_time: 3,
            is_boss: false,
        }],
    );
    world
}

fn simulator() -> WorldSimulator<FixedRng> {
    WorldSimulator::new(world(), catalog(), FixedRng::HIGHEST, EngineConfig::default())
        .expect("village exists")
}

fn run(sim: &WorldSimulator<FixedRng>, actions: &[Action]) -> RpgState {
    sim.simulate(11, actions, 200).expect("run").final_state
}

fn logged(state: &RpgState, line: &str) -> bool {
    state.console_output.iter().any(|l| l == line)
}

#[test]
fn initial_state_populates_the_village() {
    let state = simulator().create_initial_state(11).expect("initial state");

    assert_eq!(state.hero_position, Position::new(1, 1));
    assert_eq!(state.hero.stats.level, 1);
    assert_eq!(state.inventory.max_slots, 20);
    assert!(state.world.npcs.contains_key("mira"));
    assert_eq!(state.world.chests.len(), 2);
    assert!(state.world.enemies.is_empty());
}

#[test]
fn chest_gold_pays_for_shopping() {
    let sim = simulator();
    let state = run(
        &sim,
        &[
            Action::OpenChest {
                chest_id: Some("purse".into()),
            },
            Action::Talk { npc_id: None },
            Action::SelectDialogOption { option_index: 0 },
            Action::Buy {
                item_id: "potion".into(),
                quantity: 2,
            },
            Action::Buy {
                item_id: "potion".into(),
                quantity: 1,
            },
        ],
    );

    assert!(logged(&state, "You open the chest and find: 40 gold, Potion"));
    assert!(logged(&state, "Mira: \"Welcome!\""));
    assert!(logged(&state, "Bought 2x Potion for 30 gold."));
    assert_eq!(state.inventory.gold, 10);
    assert_eq!(state.inventory.count("potion"), 3);
    assert_eq!(
        state.world.npcs["mira"].profile.shop_inventory[0].stock,
        0,
        "stock is spent"
    );
    assert!(state.world.opened_chests.contains("purse"));
    assert_eq!(state.progress.gold_gained, 40);
}

#[test]
fn locked_gate_opens_with_its_key() {
    let sim = simulator();
    let up = Action::move_to(Direction::Up);
    let state = run(
        &sim,
        &[
            up.clone(),
            Action::OpenChest {
                chest_id: Some("lockbox".into()),
            },
            up,
        ],
    );

    assert!(logged(&state, "This passage is locked. You need a key."));
    assert!(logged(&state, "Moving to up"));
    assert_eq!(state.world.current_zone_id, "forest");
    assert_eq!(state.hero_position, Position::new(0, 2));
    assert!(state.world.discovered_zones.contains("forest"));
    assert!(state.world.npcs.is_empty());
    assert!(state.world.enemies.contains_key("slime-1"));
}

#[test]
fn defeated_slime_levels_the_hero_and_returns() {
    let sim = simulator();
    let forest = sim
        .change_zone(&sim.create_initial_state(11).expect("initial"), "forest")
        .expect("forest exists");
    assert_eq!(forest.hero_position, Position::ORIGIN);

    let mut state = sim.execute_action(&forest, &Action::move_to(Direction::Down));
    state = sim.process_end_of_turn(&state);
    state = sim.execute_action(&state, &Action::move_to(Direction::Down));
    state = sim.process_end_of_turn(&state);
    assert_eq!(state.hero_position, Position::new(0, 2));

    state = sim.execute_action(&state, &Action::Attack { target_id: None });
    assert!(logged(&state, "Level up! You are now level 2!"));
    assert_eq!(state.hero.stats.level, 2);
    assert_eq!(state.hero.stats.current_xp, 50);
    assert_eq!(state.progress.enemies_defeated, 1);
    assert_eq!(state.inventory.gold, 10);
    assert!(state.combat.is_none());
    let killed_at = state.current_turn;

    for _ in 0..3 {
        assert!(!state.world.enemies.contains_key("slime-1"));
        state = sim.process_end_of_turn(&state);
    }
    assert_eq!(state.current_turn, killed_at + 3);
    assert!(state.world.enemies.contains_key("slime-1"));
}

#[test]
fn identical_runs_are_identical() {
    let sim = simulator();
    let actions = vec![
        Action::OpenChest { chest_id: None },
        Action::move_to(Direction::Right),
        Action::Wait,
        Action::Unknown,
    ];
    let first = sim.simulate(5, &actions, 200).expect("run");
    let second = sim.simulate(5, &actions, 200).expect("run");

    assert_eq!(first, second);
    assert_eq!(first.turn_states.len(), 5);
    assert_eq!(
        first.final_state.console_output.last().map(String::as_str),
        Some("Unknown action")
    );
}

#[test]
fn selling_counts_as_gold_gained() {
    let sim = simulator();
    let state = run(
        &sim,
        &[
            Action::OpenChest {
                chest_id: Some("purse".into()),
            },
            Action::Talk { npc_id: None },
            Action::SelectDialogOption { option_index: 0 },
            Action::Sell {
                item_id: "potion".into(),
                quantity: 1,
            },
        ],
    );

    assert!(logged(&state, "Sold 1x Potion for 10 gold."));
    assert_eq!(state.inventory.gold, 50);
    assert_eq!(state.inventory.count("potion"), 0);
    assert_eq!(state.progress.gold_gained, 50);
}

#[test]
fn equipping_with_a_full_bag_changes_nothing() {
    let sim = simulator();
    let mut state = sim.create_initial_state(11).expect("initial state");
    let mut inventory = Inventory::new(2);
    inventory
        .add(&blade("axe", "Axe", 6), 1)
        .expect("room for the axe");
    inventory
        .add(&potion(), 1)
        .expect("room for the potion");
    *inventory.equipped.slot_mut(EquipSlot::Weapon) = Some(blade("sword", "Sword", 4));
    state.inventory = inventory;

    let next = sim.execute_action(
        &state,
        &Action::Equip {
            item_id: "axe".into(),
        },
    );

    assert_eq!(
        next.console_output.last().map(String::as_str),
        Some("Inventory full. Cannot unequip current weapon.")
    );
    assert_eq!(next.inventory, state.inventory);
    assert_eq!(
        next.inventory.equipped.get(EquipSlot::Weapon).map(|w| w.id.as_str()),
        Some("sword")
    );
}
