use std::collections::BTreeMap;

/// Read-only catalog of item definitions.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &str) -> Option<&Item>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<&Item>;
}

/// Item definition with common fields and type-specific data.
///
/// # Design: Base + Kind Pattern
///
/// - Base struct holds fields every item has (identity, rarity, stacking, value)
/// - `kind` enum holds type-specific data (weapon bonuses, consumable effect, ...)
///
/// Items are copied by value into inventory slots, item drops and deltas, so
/// a state never refers back to the catalog it was built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stack"))]
    pub max_stack: u32,
    /// Base value in gold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite_key: String,
    pub kind: ItemKind,
}

#[cfg(feature = "serde")]
fn default_max_stack() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_range() -> u32 {
    1
}

impl Item {
    /// Units that fit in one inventory slot.
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }

    /// Slot this item occupies when equipped, if it is equippable.
    pub fn equip_slot(&self) -> Option<EquipSlot> {
        match &self.kind {
            ItemKind::Weapon { .. } => Some(EquipSlot::Weapon),
            ItemKind::Armor { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    pub fn attack_bonus(&self) -> u32 {
        match &self.kind {
            ItemKind::Weapon { attack_bonus, .. } => *attack_bonus,
            _ => 0,
        }
    }

    pub fn crit_bonus(&self) -> f64 {
        match &self.kind {
            ItemKind::Weapon { crit_bonus, .. } => *crit_bonus,
            _ => 0.0,
        }
    }

    /// Attack reach of a weapon. Non-weapons have melee reach.
    pub fn range(&self) -> u32 {
        match &self.kind {
            ItemKind::Weapon { range, .. } => (*range).max(1),
            _ => 1,
        }
    }

    pub fn defense_bonus(&self) -> u32 {
        match &self.kind {
            ItemKind::Armor { defense_bonus, .. } => *defense_bonus,
            _ => 0,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self.kind, ItemKind::Key { .. })
    }

    pub fn is_quest_item(&self) -> bool {
        matches!(self.kind, ItemKind::Quest { .. })
    }
}

/// Item type with type-specific data.
///
/// Externally tagged: `weapon(weaponType: sword, attackBonus: 3)` in RON,
/// `{"weapon": {"weaponType": "sword", "attackBonus": 3}}` in JSON.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum ItemKind {
    Weapon {
        weapon_type: WeaponType,
        attack_bonus: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        crit_bonus: f64,
        #[cfg_attr(feature = "serde", serde(default = "default_range"))]
        range: u32,
    },

    Armor {
        slot: EquipSlot,
        defense_bonus: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        hp_bonus: u32,
    },

    Consumable {
        effect: ConsumableEffect,
        value: u32,
        /// Turns a buff lasts. Falls back to the engine default when absent.
        #[cfg_attr(feature = "serde", serde(default))]
        duration: Option<u32>,
    },

    /// Opens a chest or a locked zone transition whose required key id
    /// matches this item's id.
    Key {
        #[cfg_attr(feature = "serde", serde(default))]
        unlocks_chest_id: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        unlocks_door_id: Option<String>,
    },

    Quest { quest_id: String },

    Material,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeaponType {
    Sword,
    Axe,
    Bow,
    Staff,
    Dagger,
}

/// Equipment slots: one weapon slot plus five armor slots.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipSlot {
    Weapon,
    Head,
    Chest,
    Legs,
    Feet,
    Accessory,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConsumableEffect {
    Heal,
    Mana,
    BuffAttack,
    BuffDefense,
    Cure,
    Damage,
}

/// In-memory [`ItemOracle`] keyed by item id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRegistry {
    items: BTreeMap<String, Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item, replacing any previous definition with the same id.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id.clone(), item)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for ItemRegistry {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut registry = Self::new();
        for item in iter {
            registry.insert(item);
        }
        registry
    }
}

impl ItemOracle for ItemRegistry {
    fn definition(&self, id: &str) -> Option<&Item> {
        self.get(id)
    }

    fn all_definitions(&self) -> Vec<&Item> {
        self.items.values().collect()
    }
}
