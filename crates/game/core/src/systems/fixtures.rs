//! Shared world and item builders for system tests.

use crate::config::EngineConfig;
use crate::env::{
    ChestPlacement, ConsumableEffect, EnemySpawnConfig, EnemyTemplate, EquipSlot, Item, ItemKind,
    ItemRegistry, NpcPlacement, Rarity, RngOracle, WeaponType, WorldData, WorldEnv, ZoneData,
};
use crate::geometry::Position;
use crate::state::{Chest, Enemy, HeroState, Inventory, Npc, RpgState};

pub const ZONE: &str = "field";

pub struct Fixture {
    pub world: WorldData,
    pub items: ItemRegistry,
    pub config: EngineConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            world: WorldData::single_zone(ZoneData::open(ZONE, 8, 8)),
            items: [potion(), ether(), sword(), bow(), helmet(), bomb(), elixir(), antidote(), key(), relic()]
                .into_iter()
                .collect(),
            config: EngineConfig::default(),
        }
    }

    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> WorldEnv<'a> {
        WorldEnv::new(&self.world, &self.items, rng, &self.config)
    }

    /// Level 1 hero at (1, 1) with an empty 20-slot inventory.
    pub fn state(&self) -> RpgState {
        RpgState::new(
            7,
            Position::new(1, 1),
            ZONE,
            HeroState::new(1),
            Inventory::new(self.config.inventory_slots),
        )
    }

    pub fn item(&self, id: &str) -> Item {
        self.items.get(id).cloned().unwrap_or_else(|| panic!("fixture item {id}"))
    }
}

/// Level 1 fallback slime: 50 HP, attack 10, defense 5, speed 5.
pub fn slime(id: &str, position: Position) -> Enemy {
    let config = EnemySpawnConfig {
        id: id.to_string(),
        enemy_type: "slime".to_string(),
        position,
        level_min: 1,
        level_max: 1,
        respawn_time: 0,
        is_boss: false,
    };
    Enemy::spawn(&config, &EnemyTemplate::fallback("slime"))
}

pub fn villager(id: &str, position: Position) -> Npc {
    let placement = NpcPlacement {
        npc_id: id.to_string(),
        position,
    };
    Npc::spawn(&placement, crate::env::NpcProfile::fallback(id))
}

pub fn chest(id: &str, position: Position) -> Chest {
    let placement = ChestPlacement {
        chest_id: id.to_string(),
        position,
    };
    Chest::spawn(&placement, crate::env::ChestDefinition::fallback())
}

fn base(id: &str, name: &str, kind: ItemKind) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        rarity: Rarity::Common,
        stackable: false,
        max_stack: 1,
        value: 10,
        sprite_key: String::new(),
        kind,
    }
}

fn consumable(id: &str, name: &str, effect: ConsumableEffect, value: u32) -> Item {
    Item {
        stackable: true,
        max_stack: 10,
        ..base(
            id,
            name,
            ItemKind::Consumable {
                effect,
                value,
                duration: None,
            },
        )
    }
}

pub fn potion() -> Item {
    Item {
        value: 20,
        ..consumable("potion", "Potion", ConsumableEffect::Heal, 30)
    }
}

pub fn ether() -> Item {
    consumable("ether", "Ether", ConsumableEffect::Mana, 20)
}

pub fn bomb() -> Item {
    consumable("bomb", "Bomb", ConsumableEffect::Damage, 25)
}

pub fn elixir() -> Item {
    consumable("elixir", "Elixir", ConsumableEffect::BuffAttack, 5)
}

pub fn antidote() -> Item {
    consumable("antidote", "Antidote", ConsumableEffect::Cure, 0)
}

pub fn sword() -> Item {
    Item {
        value: 50,
        ..base(
            "sword",
            "Iron Sword",
            ItemKind::Weapon {
                weapon_type: WeaponType::Sword,
                attack_bonus: 5,
                crit_bonus: 0.0,
                range: 1,
            },
        )
    }
}

pub fn bow() -> Item {
    base(
        "bow",
        "Short Bow",
        ItemKind::Weapon {
            weapon_type: WeaponType::Bow,
            attack_bonus: 2,
            crit_bonus: 0.0,
            range: 3,
        },
    )
}

pub fn helmet() -> Item {
    base(
        "helmet",
        "Leather Cap",
        ItemKind::Armor {
            slot: EquipSlot::Head,
            defense_bonus: 2,
            hp_bonus: 0,
        },
    )
}

pub fn key() -> Item {
    base(
        "gate-key",
        "Gate Key",
        ItemKind::Key {
            unlocks_chest_id: None,
            unlocks_door_id: None,
        },
    )
}

pub fn relic() -> Item {
    base(
        "relic",
        "Old Relic",
        ItemKind::Quest {
            quest_id: "relic-hunt".to_string(),
        },
    )
}
