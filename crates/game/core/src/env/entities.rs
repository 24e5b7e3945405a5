//! Static entity definitions referenced by world placement tables.
//!
//! Templates describe what an enemy type, NPC or chest *is*; the live
//! instances in [`crate::state::WorldState`] are stamped from them when a zone
//! is entered.

use std::collections::BTreeMap;

use crate::combat::EnemyStats;
use crate::geometry::Position;

/// One entry of an enemy or chest loot table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LootDrop {
    pub item_id: String,
    /// Probability in `[0, 1]` that this entry drops.
    pub chance: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
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
pub enum BehaviorPattern {
    #[default]
    Stationary,
    Patrol,
    Chase,
    Flee,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemyBehavior {
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern: BehaviorPattern,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patrol_path: Vec<Position>,
    /// HP fraction below which a fleeing enemy runs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flee_threshold: Option<f64>,
}

/// Base definition of an enemy type at level 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemyTemplate {
    pub name: String,
    pub stats: EnemyStats,
    pub xp_reward: u64,
    pub coin_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot_table: Vec<LootDrop>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: EnemyBehavior,
    #[cfg_attr(feature = "serde", serde(default = "default_aggro_range"))]
    pub aggro_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite_key: String,
}

#[cfg(feature = "serde")]
fn default_aggro_range() -> u32 {
    EnemyTemplate::DEFAULT_AGGRO_RANGE
}

impl EnemyTemplate {
    pub const DEFAULT_AGGRO_RANGE: u32 = 3;

    /// Template used for enemy types the world does not define.
    pub fn fallback(enemy_type: &str) -> Self {
        Self {
            name: enemy_type.to_string(),
            stats: EnemyStats {
                max_hp: 50,
                attack: 10,
                defense: 5,
                speed: 5,
                crit_chance: 0.05,
            },
            xp_reward: 25,
            coin_reward: 10,
            loot_table: Vec::new(),
            behavior: EnemyBehavior::default(),
            aggro_range: Self::DEFAULT_AGGRO_RANGE,
            sprite_key: enemy_type.to_string(),
        }
    }
}

// ============================================================================
// NPCs and dialogue
// ============================================================================

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
pub enum NpcType {
    Merchant,
    QuestGiver,
    Trainer,
    #[default]
    Villager,
}

/// Side effect attached to a dialogue option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")
)]
pub enum DialogueAction {
    OpenShop,
    GiveItem {
        item_id: String,
        #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
        quantity: u32,
    },
    GiveQuest {
        quest_id: String,
    },
    Heal,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DialogueOption {
    pub text: String,
    /// Node shown after choosing this option. `None` ends the conversation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next_node: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: Option<DialogueAction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueNode {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<DialogueOption>,
}

/// Dialogue tree: nodes keyed by id plus the node a conversation opens with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Dialogue {
    pub start_node: String,
    pub nodes: BTreeMap<String, DialogueNode>,
}

impl Dialogue {
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }
}

/// Item offered by a shopkeeper.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShopEntry {
    pub item_id: String,
    pub price: u32,
    /// Units left. Negative means unlimited.
    pub stock: i32,
}

impl ShopEntry {
    pub fn is_unlimited(&self) -> bool {
        self.stock < 0
    }

    pub fn has_stock(&self, quantity: u32) -> bool {
        self.is_unlimited() || i64::from(self.stock) >= i64::from(quantity)
    }
}

/// Static description of an NPC.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NpcProfile {
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub npc_type: NpcType,
    pub dialogue: Dialogue,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_shopkeeper: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shop_inventory: Vec<ShopEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite_key: String,
}

impl NpcProfile {
    /// Villager that greets the hero and says goodbye.
    pub fn fallback(npc_id: &str) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "start".to_string(),
            DialogueNode {
                text: "Hello, traveler!".to_string(),
                options: vec![DialogueOption {
                    text: "Goodbye".to_string(),
                    next_node: None,
                    action: None,
                }],
            },
        );
        Self {
            display_name: npc_id.to_string(),
            npc_type: NpcType::Villager,
            dialogue: Dialogue {
                start_node: "start".to_string(),
                nodes,
            },
            is_shopkeeper: false,
            shop_inventory: Vec::new(),
            sprite_key: "npc".to_string(),
        }
    }
}

// ============================================================================
// Chests
// ============================================================================

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
pub enum ChestType {
    #[default]
    Wooden,
    Iron,
    Golden,
    Legendary,
}

/// Static description of a chest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChestDefinition {
    #[cfg_attr(feature = "serde", serde(default))]
    pub chest_type: ChestType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_locked: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_key_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub contents: Vec<LootDrop>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coin_amount: u32,
    /// One-time chests stay empty for the rest of the run; others refill
    /// whenever their zone is entered again.
    #[cfg_attr(feature = "serde", serde(default = "default_one_time"))]
    pub is_one_time: bool,
}

#[cfg(feature = "serde")]
fn default_one_time() -> bool {
    true
}

impl ChestDefinition {
    pub fn fallback() -> Self {
        Self {
            chest_type: ChestType::Wooden,
            is_locked: false,
            required_key_id: None,
            contents: Vec::new(),
            coin_amount: 10,
            is_one_time: true,
        }
    }
}
