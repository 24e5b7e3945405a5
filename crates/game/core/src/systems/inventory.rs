//! Equipment changes, field item use and dropping items.

use crate::action::{ActionError, ActionOutcome};
use crate::env::{ConsumableEffect, EquipSlot, ItemKind, WorldEnv};
use crate::state::{RpgState, StateDelta, StatusEffect, StatusEffectKind};
use crate::systems::SystemResult;

/// Moves an item from the bag into its equipment slot. Whatever the slot held
/// goes back into the bag.
///
/// # Errors
///
/// - `ActionError::ItemNotInInventory` when the item is not carried
/// - `ActionError::NotEquippable` for items without a slot
/// - `ActionError::InvalidArmorSlot` for armor that claims the weapon slot
/// - `ActionError::CannotSwapEquipped` when the previous item does not fit
pub fn equip(state: &RpgState, item_id: &str) -> SystemResult {
    let slot = state
        .inventory
        .find(item_id)
        .ok_or(ActionError::ItemNotInInventory)?;
    let item = slot.item.clone();
    let target = item.equip_slot().ok_or(ActionError::NotEquippable)?;
    if matches!(item.kind, ItemKind::Armor { .. }) && target == EquipSlot::Weapon {
        return Err(ActionError::InvalidArmorSlot);
    }

    let mut inventory = state.inventory.clone();
    if let Some(previous) = inventory.equipped.slot_mut(target).take() {
        let label = if target == EquipSlot::Weapon { "weapon" } else { "armor" };
        inventory
            .add(&previous, 1)
            .map_err(|_| ActionError::CannotSwapEquipped(label.to_string()))?;
    }
    inventory.remove(item_id, 1)?;

    let message = match target {
        EquipSlot::Weapon => format!("Equipped {}. Attack +{}", item.name, item.attack_bonus()),
        _ => format!("Equipped {}. Defense +{}", item.name, item.defense_bonus()),
    };
    *inventory.equipped.slot_mut(target) = Some(item);

    Ok(ActionOutcome::new(message).with(StateDelta::InventoryReplaced { inventory }))
}

/// Returns the item in `slot` to the bag.
///
/// # Errors
///
/// - `ActionError::InvalidEquipSlot` when `slot` names no equipment slot
/// - `ActionError::NothingEquipped` when the slot is empty
/// - `ActionError::CannotUnequip` when the bag is full
pub fn unequip(state: &RpgState, slot: &str) -> SystemResult {
    let slot: EquipSlot = slot.parse().map_err(|_| ActionError::InvalidEquipSlot)?;
    let mut inventory = state.inventory.clone();
    let item = inventory
        .equipped
        .slot_mut(slot)
        .take()
        .ok_or(ActionError::NothingEquipped)?;
    inventory
        .add(&item, 1)
        .map_err(|_| ActionError::CannotUnequip)?;

    Ok(ActionOutcome::new(format!("Unequipped {}.", item.name))
        .with(StateDelta::InventoryReplaced { inventory }))
}

/// Uses a consumable outside combat. One unit is consumed.
///
/// # Errors
///
/// - `ActionError::ItemNotInInventory` when the item is not carried
/// - `ActionError::NotUsable` for non-consumables
/// - `ActionError::NotUsableHere` for effects that need a combat target
pub fn use_item(state: &RpgState, env: &WorldEnv<'_>, item_id: &str) -> SystemResult {
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
        return Err(ActionError::NotUsable);
    };
    let turns = duration.unwrap_or(env.config().field_buff_duration);

    let (message, delta) = match effect {
        ConsumableEffect::Heal => {
            let restored = (*value).min(state.hero.stats.missing_hp());
            (
                format!("You use {} and restore {} HP.", item.name, restored),
                StateDelta::HpChanged {
                    amount: i64::from(restored),
                },
            )
        }
        ConsumableEffect::Mana => {
            let restored = (*value).min(state.hero.stats.missing_mp());
            (
                format!("You use {} and restore {} MP.", item.name, restored),
                StateDelta::MpChanged {
                    amount: i64::from(restored),
                },
            )
        }
        ConsumableEffect::BuffAttack => (
            format!("You use {}. Attack increased!", item.name),
            StateDelta::StatusEffectAdded {
                effect: StatusEffect::new(StatusEffectKind::BuffAttack, turns, *value, &item.id),
            },
        ),
        ConsumableEffect::BuffDefense => (
            format!("You use {}. Defense increased!", item.name),
            StateDelta::StatusEffectAdded {
                effect: StatusEffect::new(StatusEffectKind::BuffDefense, turns, *value, &item.id),
            },
        ),
        ConsumableEffect::Cure => (
            format!("You use {}. Status effects cured!", item.name),
            StateDelta::StatusEffectsCured,
        ),
        ConsumableEffect::Damage => return Err(ActionError::NotUsableHere),
    };

    let mut inventory = state.inventory.clone();
    inventory.remove(item_id, 1)?;
    Ok(ActionOutcome::new(message)
        .with(StateDelta::InventoryReplaced { inventory })
        .with(delta))
}

/// Puts `quantity` units on the ground at the hero's feet.
///
/// # Errors
///
/// - `ActionError::InvalidQuantity` for a zero quantity
/// - `ActionError::CannotDrop` when fewer units are carried
pub fn drop_item(state: &RpgState, item_id: &str, quantity: u32) -> SystemResult {
    if quantity == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    let name = state
        .inventory
        .find(item_id)
        .map(|slot| slot.item.name.clone())
        .ok_or(ActionError::CannotDrop)?;
    let mut inventory = state.inventory.clone();
    inventory
        .remove(item_id, quantity)
        .map_err(|_| ActionError::CannotDrop)?;

    Ok(ActionOutcome::new(format!("Dropped {quantity}x {name}."))
        .with(StateDelta::InventoryReplaced { inventory })
        .with(StateDelta::ItemDropAdded {
            position: state.hero_position,
            item_id: item_id.to_string(),
            quantity,
        }))
}
