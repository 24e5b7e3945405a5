//! Typed state changes.
//!
//! Systems never mutate an [`RpgState`](crate::state::RpgState) directly.
//! They validate an action against a read-only state and describe its effect
//! as a list of [`StateDelta`] values; the engine's reducer applies the list in
//! order. A rejected action therefore leaves the state exactly as it was.
mod bitmask;

pub use bitmask::ChangeSet;

use crate::env::Item;
use crate::geometry::Position;
use crate::state::{CombatState, DialogueState, FlagValue, Inventory, StatusEffect};

/// Item and quantity produced by a loot roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LootRoll {
    pub item_id: String,
    pub quantity: u32,
}

/// One change to an RPG state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum StateDelta {
    PositionChanged {
        position: Position,
    },
    /// Switch to another zone and place the hero there.
    ZoneTransition {
        zone_id: String,
        position: Position,
    },
    /// Relative HP change, clamped to the meter.
    HpChanged {
        amount: i64,
    },
    MpChanged {
        amount: i64,
    },
    FullHeal,
    InventoryReplaced {
        inventory: Inventory,
    },
    GoldChanged {
        amount: i64,
    },
    CombatStateChanged {
        combat: Option<CombatState>,
    },
    DialogueStateChanged {
        dialogue: Option<DialogueState>,
    },
    /// Remaining HP written back to a live enemy.
    EnemyHpChanged {
        enemy_id: String,
        hp: u32,
    },
    /// Marks a chest open and pays out its coins. Item contents arrive as
    /// separate [`StateDelta::ItemReceived`] deltas.
    ChestOpened {
        chest_id: String,
        gold: u32,
    },
    /// Removes the enemy, ends combat and pays out rewards.
    EnemyDefeated {
        enemy_id: String,
        xp: u64,
        gold: u32,
        loot: Vec<LootRoll>,
    },
    /// Adds items to the inventory; whatever does not fit is dropped at the
    /// hero's feet.
    ItemReceived {
        item: Item,
        quantity: u32,
    },
    StatusEffectAdded {
        effect: StatusEffect,
    },
    StatusEffectsCured,
    /// Units sold by a shopkeeper. Unlimited stock is left untouched.
    ShopStockChanged {
        npc_id: String,
        item_id: String,
        quantity: u32,
    },
    ItemDropAdded {
        position: Position,
        item_id: String,
        quantity: u32,
    },
    ItemDropRemoved {
        drop_id: String,
    },
    FlagSet {
        key: String,
        value: FlagValue,
    },
    NpcDialogueNode {
        npc_id: String,
        node: String,
    },
}

impl StateDelta {
    /// Parts of the state this delta writes.
    pub fn fields(&self) -> ChangeSet {
        match self {
            StateDelta::PositionChanged { .. } => ChangeSet::POSITION,
            StateDelta::ZoneTransition { .. } => {
                ChangeSet::ZONE | ChangeSet::POSITION | ChangeSet::WORLD
            }
            StateDelta::HpChanged { .. } | StateDelta::FullHeal => ChangeSet::HP,
            StateDelta::MpChanged { .. } => ChangeSet::MP,
            StateDelta::InventoryReplaced { .. } | StateDelta::ItemReceived { .. } => {
                ChangeSet::INVENTORY
            }
            StateDelta::GoldChanged { .. } => ChangeSet::GOLD,
            StateDelta::CombatStateChanged { .. } => ChangeSet::COMBAT,
            StateDelta::DialogueStateChanged { .. } | StateDelta::NpcDialogueNode { .. } => {
                ChangeSet::DIALOGUE
            }
            StateDelta::EnemyHpChanged { .. } => ChangeSet::WORLD,
            StateDelta::EnemyDefeated { .. } => {
                ChangeSet::WORLD | ChangeSet::COMBAT | ChangeSet::XP | ChangeSet::GOLD
            }
            StateDelta::ChestOpened { .. } => ChangeSet::WORLD | ChangeSet::GOLD,
            StateDelta::ShopStockChanged { .. }
            | StateDelta::ItemDropAdded { .. }
            | StateDelta::ItemDropRemoved { .. } => ChangeSet::WORLD,
            StateDelta::StatusEffectAdded { .. } | StateDelta::StatusEffectsCured => {
                ChangeSet::STATUS
            }
            StateDelta::FlagSet { .. } => ChangeSet::FLAGS,
        }
    }

    /// Union of the fields written by `deltas`.
    pub fn union<'a>(deltas: impl IntoIterator<Item = &'a StateDelta>) -> ChangeSet {
        deltas
            .into_iter()
            .fold(ChangeSet::empty(), |acc, delta| acc | delta.fields())
    }
}
