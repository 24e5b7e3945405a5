//! Hero inventory: item stacks, gold and equipment.

use strum::IntoEnumIterator;

use crate::action::ActionError;
use crate::env::{EquipSlot, Item};

/// One occupied inventory slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub item: Item,
    pub quantity: u32,
}

/// Items worn by the hero, one per slot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub head: Option<Item>,
    pub chest: Option<Item>,
    pub legs: Option<Item>,
    pub feet: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Head => self.head.as_ref(),
            EquipSlot::Chest => self.chest.as_ref(),
            EquipSlot::Legs => self.legs.as_ref(),
            EquipSlot::Feet => self.feet.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Head => &mut self.head,
            EquipSlot::Chest => &mut self.chest,
            EquipSlot::Legs => &mut self.legs,
            EquipSlot::Feet => &mut self.feet,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    /// Equipped items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        EquipSlot::iter().filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn attack_bonus(&self) -> u32 {
        self.weapon.as_ref().map_or(0, Item::attack_bonus)
    }

    pub fn crit_bonus(&self) -> f64 {
        self.weapon.as_ref().map_or(0.0, Item::crit_bonus)
    }

    /// Reach of the equipped weapon; bare hands reach adjacent cells.
    pub fn weapon_range(&self) -> u32 {
        self.weapon.as_ref().map_or(1, Item::range)
    }

    /// Sum of armor defense bonuses.
    pub fn defense_bonus(&self) -> u32 {
        self.iter().map(|(_, item)| item.defense_bonus()).sum()
    }
}

/// Bounded list of item stacks plus gold and equipment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Inventory {
    pub slots: Vec<InventorySlot>,
    pub max_slots: usize,
    pub gold: u32,
    pub equipped: Equipment,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_slots,
            gold: 0,
            equipped: Equipment::default(),
        }
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots.saturating_sub(self.slots.len())
    }

    /// Slots needed to store `quantity` more units of `item`, after topping up
    /// existing stacks.
    fn slots_needed(&self, item: &Item, quantity: u32) -> usize {
        let limit = item.stack_limit();
        let mut remaining = quantity;
        if item.stackable {
            for slot in self.slots.iter().filter(|s| s.item.id == item.id) {
                remaining = remaining.saturating_sub(limit.saturating_sub(slot.quantity));
            }
        }
        remaining.div_ceil(limit) as usize
    }

    /// True when all `quantity` units of `item` fit.
    pub fn can_add(&self, item: &Item, quantity: u32) -> bool {
        self.slots_needed(item, quantity) <= self.free_slots()
    }

    /// Stores `quantity` units of `item`.
    ///
    /// Stackable items top up existing stacks of the same id before opening
    /// new slots. Either everything fits or nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::InventoryFull` when the whole quantity does not fit.
    pub fn add(&mut self, item: &Item, quantity: u32) -> Result<(), ActionError> {
        if !self.can_add(item, quantity) {
            return Err(ActionError::InventoryFull);
        }

        let limit = item.stack_limit();
        let mut remaining = quantity;
        if item.stackable {
            for slot in self.slots.iter_mut().filter(|s| s.item.id == item.id) {
                let room = limit.saturating_sub(slot.quantity).min(remaining);
                slot.quantity += room;
                remaining -= room;
            }
        }
        while remaining > 0 {
            let stack = remaining.min(limit);
            self.slots.push(InventorySlot {
                item: item.clone(),
                quantity: stack,
            });
            remaining -= stack;
        }
        Ok(())
    }

    /// Takes `quantity` units of `item_id`, emptying later stacks first.
    ///
    /// # Errors
    ///
    /// - `ActionError::ItemNotInInventory` when no unit is owned
    /// - `ActionError::NotEnoughItems` when fewer than `quantity` are owned
    pub fn remove(&mut self, item_id: &str, quantity: u32) -> Result<(), ActionError> {
        let owned = self.count(item_id);
        if owned == 0 {
            return Err(ActionError::ItemNotInInventory);
        }
        if owned < quantity {
            return Err(ActionError::NotEnoughItems(owned));
        }

        let mut remaining = quantity;
        for slot in self.slots.iter_mut().rev().filter(|s| s.item.id == item_id) {
            let taken = slot.quantity.min(remaining);
            slot.quantity -= taken;
            remaining -= taken;
            if remaining == 0 {
                break;
            }
        }
        self.slots.retain(|s| s.quantity > 0);
        Ok(())
    }

    /// Units of `item_id` across all stacks.
    pub fn count(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item.id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn has_item(&self, item_id: &str, quantity: u32) -> bool {
        self.count(item_id) >= quantity.max(1)
    }

    /// True when a key item with this id is carried.
    pub fn has_key(&self, key_id: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.item.id == key_id && s.item.is_key())
    }

    /// First stack holding `item_id`.
    pub fn find(&self, item_id: &str) -> Option<&InventorySlot> {
        self.slots.iter().find(|s| s.item.id == item_id)
    }

    /// # Errors
    ///
    /// Returns `ActionError::NotEnoughGold` carrying `amount` when short.
    pub fn spend_gold(&mut self, amount: u32) -> Result<(), ActionError> {
        if self.gold < amount {
            return Err(ActionError::NotEnoughGold(amount));
        }
        self.gold -= amount;
        Ok(())
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Applies a signed gold change, never dropping below zero.
    pub fn adjust_gold(&mut self, delta: i64) {
        self.gold = (i64::from(self.gold) + delta).clamp(0, i64::from(u32::MAX)) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ConsumableEffect, ItemKind, Rarity, WeaponType};

    fn potion(max_stack: u32) -> Item {
        Item {
            id: "potion".into(),
            name: "Potion".into(),
            description: String::new(),
            rarity: Rarity::Common,
            stackable: true,
            max_stack,
            value: 20,
            sprite_key: String::new(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::Heal,
                value: 30,
                duration: None,
            },
        }
    }

    fn sword() -> Item {
        Item {
            id: "sword".into(),
            name: "Sword".into(),
            description: String::new(),
            rarity: Rarity::Common,
            stackable: false,
            max_stack: 1,
            value: 50,
            sprite_key: String::new(),
            kind: ItemKind::Weapon {
                weapon_type: WeaponType::Sword,
                attack_bonus: 5,
                crit_bonus: 0.1,
                range: 1,
            },
        }
    }

    #[test]
    fn stacks_fill_before_new_slots_open() {
        let mut inventory = Inventory::new(3);
        inventory.add(&potion(5), 4).unwrap();
        inventory.add(&potion(5), 3).unwrap();
        assert_eq!(inventory.slots.len(), 2);
        assert_eq!(inventory.slots[0].quantity, 5);
        assert_eq!(inventory.slots[1].quantity, 2);
        assert_eq!(inventory.count("potion"), 7);
    }

    #[test]
    fn overflow_fails_without_change() {
        let mut inventory = Inventory::new(1);
        inventory.add(&potion(5), 4).unwrap();
        let before = inventory.clone();
        assert_eq!(inventory.add(&potion(5), 2), Err(ActionError::InventoryFull));
        assert_eq!(inventory, before);
        assert!(inventory.can_add(&potion(5), 1));
    }

    #[test]
    fn non_stackables_take_one_slot_each() {
        let mut inventory = Inventory::new(2);
        inventory.add(&sword(), 2).unwrap();
        assert_eq!(inventory.slots.len(), 2);
        assert_eq!(inventory.add(&sword(), 1), Err(ActionError::InventoryFull));
    }

    #[test]
    fn remove_reports_owned_quantity() {
        let mut inventory = Inventory::new(4);
        inventory.add(&potion(5), 7).unwrap();
        assert_eq!(inventory.remove("potion", 9), Err(ActionError::NotEnoughItems(7)));
        assert_eq!(inventory.remove("ether", 1), Err(ActionError::ItemNotInInventory));

        inventory.remove("potion", 3).unwrap();
        assert_eq!(inventory.count("potion"), 4);
        assert_eq!(inventory.slots.len(), 1);
    }

    #[test]
    fn gold_never_goes_negative() {
        let mut inventory = Inventory::new(1);
        inventory.add_gold(10);
        assert_eq!(inventory.spend_gold(11), Err(ActionError::NotEnoughGold(11)));
        inventory.spend_gold(4).unwrap();
        inventory.adjust_gold(-100);
        assert_eq!(inventory.gold, 0);
    }

    #[test]
    fn equipment_bonuses() {
        let mut equipment = Equipment::default();
        assert_eq!(equipment.weapon_range(), 1);
        equipment.weapon = Some(sword());
        assert_eq!(equipment.attack_bonus(), 5);
        assert!((equipment.crit_bonus() - 0.1).abs() < 1e-9);
        assert_eq!(equipment.iter().count(), 1);
        assert_eq!(equipment.defense_bonus(), 0);
    }
}
