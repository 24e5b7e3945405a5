//! NPC dialogue, chests, shops and ground items.

use crate::action::{ActionError, ActionOutcome};
use crate::env::{DialogueAction, WorldEnv};
use crate::state::{DialogueState, FlagValue, ItemDrop, Npc, RpgState, StateDelta};
use crate::systems::SystemResult;
use crate::systems::combat::roll_loot;

/// Opens a conversation with the named NPC, or the first one next to the hero.
///
/// # Errors
///
/// - `ActionError::NoOneNearby` when no NPC can be found
/// - `ActionError::NpcTooFar` when the NPC is not orthogonally adjacent
/// - `ActionError::NothingToSay` when the NPC's dialogue has no opening node
pub fn talk(state: &RpgState, npc_id: Option<&str>) -> SystemResult {
    let npc = match npc_id {
        Some(id) => state.world.npcs.get(id),
        None => state
            .world
            .npcs
            .values()
            .find(|npc| state.hero_position.is_adjacent(npc.position)),
    }
    .ok_or(ActionError::NoOneNearby)?;

    if !state.hero_position.is_adjacent(npc.position) {
        return Err(ActionError::NpcTooFar(npc.name().to_string()));
    }
    let dialogue = &npc.profile.dialogue;
    let opening = dialogue
        .node(&dialogue.start_node)
        .ok_or_else(|| ActionError::NothingToSay(npc.name().to_string()))?;

    Ok(
        ActionOutcome::new(format!("{}: \"{}\"", npc.name(), opening.text))
            .with(StateDelta::DialogueStateChanged {
                dialogue: Some(DialogueState::start(&npc.id, &dialogue.start_node)),
            })
            .with(StateDelta::NpcDialogueNode {
                npc_id: npc.id.clone(),
                node: dialogue.start_node.clone(),
            }),
    )
}

/// Chooses option `index` of the current dialogue node and runs its action.
///
/// The conversation ends when the option has no follow-up node or names a
/// node the NPC does not have.
///
/// # Errors
///
/// - `ActionError::NotInConversation` outside a dialogue
/// - `ActionError::NpcNotFound` when the NPC left the zone
/// - `ActionError::InvalidDialogueOption` for an out-of-range index
pub fn select_option(state: &RpgState, env: &WorldEnv<'_>, index: usize) -> SystemResult {
    let dialogue = state
        .dialogue
        .as_ref()
        .ok_or(ActionError::NotInConversation)?;
    let npc = state
        .world
        .npcs
        .get(&dialogue.npc_id)
        .ok_or(ActionError::NpcNotFound)?;
    let option = npc
        .profile
        .dialogue
        .node(&dialogue.current_node)
        .and_then(|node| node.options.get(index))
        .ok_or(ActionError::InvalidDialogueOption)?;

    let mut outcome = ActionOutcome::new(String::new());
    let mut shop_open = dialogue.shop_open;
    let suffix = match &option.action {
        Some(DialogueAction::OpenShop) => {
            shop_open = true;
            " [Shop opened]"
        }
        Some(DialogueAction::GiveItem { item_id, quantity }) => {
            outcome.push(StateDelta::ItemReceived {
                item: env.item(item_id)?.clone(),
                quantity: *quantity,
            });
            " [Received item]"
        }
        Some(DialogueAction::GiveQuest { quest_id }) => {
            outcome.push(StateDelta::FlagSet {
                key: format!("quest:{quest_id}"),
                value: FlagValue::Bool(true),
            });
            " [Received quest]"
        }
        Some(DialogueAction::Heal) => {
            outcome.push(StateDelta::FullHeal);
            " [HP fully restored]"
        }
        None => "",
    };

    let next = option
        .next_node
        .as_ref()
        .and_then(|id| npc.profile.dialogue.node(id).map(|node| (id, node)));

    match next {
        Some((node_id, node)) => {
            let mut continued = dialogue.advance(node_id);
            continued.shop_open = shop_open;
            outcome.message = format!(
                "You: \"{}\"{}\n{}: \"{}\"",
                option.text,
                suffix,
                npc.name(),
                node.text
            );
            outcome.push(StateDelta::DialogueStateChanged {
                dialogue: Some(continued),
            });
            outcome.push(StateDelta::NpcDialogueNode {
                npc_id: npc.id.clone(),
                node: node_id.clone(),
            });
        }
        None => {
            outcome.message = format!("You: \"{}\"{}. [Conversation ended]", option.text, suffix);
            outcome.push(StateDelta::DialogueStateChanged { dialogue: None });
        }
    }

    Ok(outcome)
}

/// Opens the named chest, or the first one under or next to the hero.
///
/// # Errors
///
/// - `ActionError::NoChestNearby` when no chest can be found
/// - `ActionError::ChestTooFar` when the chest is more than one cell away
/// - `ActionError::ChestAlreadyOpen` when it was already looted
/// - `ActionError::ChestLocked` when its key is not carried
pub fn open_chest(state: &RpgState, env: &WorldEnv<'_>, chest_id: Option<&str>) -> SystemResult {
    let chest = match chest_id {
        Some(id) => state.world.chests.get(id),
        None => state
            .world
            .chests
            .values()
            .find(|chest| state.hero_position.is_within_reach(chest.position)),
    }
    .ok_or(ActionError::NoChestNearby)?;

    if !state.hero_position.is_within_reach(chest.position) {
        return Err(ActionError::ChestTooFar);
    }
    if chest.is_open {
        return Err(ActionError::ChestAlreadyOpen);
    }
    let definition = &chest.definition;
    if definition.is_locked {
        if let Some(key) = &definition.required_key_id {
            if !state.inventory.has_key(key) {
                return Err(ActionError::ChestLocked);
            }
        }
    }

    let gold = definition.coin_amount;
    let mut found = Vec::new();
    if gold > 0 {
        found.push(format!("{gold} gold"));
    }
    let mut outcome = ActionOutcome::new(String::new()).with(StateDelta::ChestOpened {
        chest_id: chest.id.clone(),
        gold,
    });
    for roll in roll_loot(state, env, &definition.contents) {
        let item = env.item(&roll.item_id)?;
        found.push(if roll.quantity > 1 {
            format!("{}x {}", roll.quantity, item.name)
        } else {
            item.name.clone()
        });
        outcome.push(StateDelta::ItemReceived {
            item: item.clone(),
            quantity: roll.quantity,
        });
    }

    outcome.message = if found.is_empty() {
        "You open the chest and find: nothing".to_string()
    } else {
        format!("You open the chest and find: {}", found.join(", "))
    };
    Ok(outcome)
}

/// The NPC the hero is talking to, provided it runs a shop.
fn merchant(state: &RpgState) -> Result<&Npc, ActionError> {
    let dialogue = state
        .dialogue
        .as_ref()
        .ok_or(ActionError::NotTalkingToMerchant)?;
    let npc = state
        .world
        .npcs
        .get(&dialogue.npc_id)
        .ok_or(ActionError::NpcNotFound)?;
    if !npc.profile.is_shopkeeper {
        return Err(ActionError::NotAMerchant(npc.name().to_string()));
    }
    Ok(npc)
}

/// Buys `quantity` units from the merchant in conversation.
///
/// # Errors
///
/// - `ActionError::InvalidQuantity` for a zero quantity
/// - `ActionError::NotTalkingToMerchant`, `NpcNotFound` or `NotAMerchant`
///   when no shop is open to the hero
/// - `ActionError::NotForSale` or `OutOfStock` when the shop cannot supply it
/// - `ActionError::NotEnoughGold` when the hero cannot pay
/// - `ActionError::InventoryFull` when the purchase does not fit
pub fn buy(state: &RpgState, env: &WorldEnv<'_>, item_id: &str, quantity: u32) -> SystemResult {
    if quantity == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    let npc = merchant(state)?;
    let entry = npc
        .profile
        .shop_inventory
        .iter()
        .find(|entry| entry.item_id == item_id)
        .ok_or(ActionError::NotForSale)?;
    if !entry.has_stock(quantity) {
        return Err(ActionError::OutOfStock(entry.stock));
    }
    let cost = entry.price.saturating_mul(quantity);
    if state.inventory.gold < cost {
        return Err(ActionError::NotEnoughGold(cost));
    }
    let item = env
        .items()
        .definition(item_id)
        .ok_or(ActionError::UnknownItem)?;

    let mut inventory = state.inventory.clone();
    inventory.add(item, quantity)?;

    Ok(
        ActionOutcome::new(format!("Bought {quantity}x {} for {cost} gold.", item.name))
            .with(StateDelta::InventoryReplaced { inventory })
            .with(StateDelta::GoldChanged {
                amount: -i64::from(cost),
            })
            .with(StateDelta::ShopStockChanged {
                npc_id: npc.id.clone(),
                item_id: item_id.to_string(),
                quantity,
            }),
    )
}

/// Sells `quantity` units to the merchant in conversation at the configured
/// share of their value.
///
/// # Errors
///
/// - `ActionError::NotTalkingToMerchant`, `NpcNotFound` or `NotAMerchant`
///   when no shop is open to the hero
/// - `ActionError::ItemNotOwned` or `NotEnoughItems` when the hero lacks them
/// - `ActionError::CannotSell` for quest items
pub fn sell(state: &RpgState, env: &WorldEnv<'_>, item_id: &str, quantity: u32) -> SystemResult {
    if quantity == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    merchant(state)?;
    let slot = state
        .inventory
        .find(item_id)
        .ok_or(ActionError::ItemNotOwned)?;
    let owned = state.inventory.count(item_id);
    if owned < quantity {
        return Err(ActionError::NotEnoughItems(owned));
    }
    if slot.item.is_quest_item() {
        return Err(ActionError::CannotSell);
    }

    let price = env.config().sell_price(slot.item.value).saturating_mul(quantity);
    let name = slot.item.name.clone();
    let mut inventory = state.inventory.clone();
    inventory.remove(item_id, quantity)?;

    Ok(
        ActionOutcome::new(format!("Sold {quantity}x {name} for {price} gold."))
            .with(StateDelta::InventoryReplaced { inventory })
            .with(StateDelta::GoldChanged {
                amount: i64::from(price),
            }),
    )
}

/// Picks up the named drop, or the one under the hero.
///
/// # Errors
///
/// - `ActionError::NoItemToPickUp` when there is nothing to take
/// - `ActionError::ItemTooFar` when the named drop is more than one cell away
/// - `ActionError::InventoryFull` when the whole stack does not fit
pub fn pick_up(state: &RpgState, env: &WorldEnv<'_>, drop_id: Option<&str>) -> SystemResult {
    let drop: &ItemDrop = match drop_id {
        Some(id) => {
            let drop = state
                .world
                .item_drops
                .get(id)
                .ok_or(ActionError::NoItemToPickUp)?;
            if !state.hero_position.is_within_reach(drop.position) {
                return Err(ActionError::ItemTooFar);
            }
            drop
        }
        None => state
            .world
            .item_drops
            .values()
            .find(|drop| drop.position == state.hero_position)
            .ok_or(ActionError::NoItemToPickUp)?,
    };

    let item = env.item(&drop.item_id)?;
    if !state.inventory.can_add(item, drop.quantity) {
        return Err(ActionError::InventoryFull);
    }

    let message = if drop.quantity > 1 {
        format!("Picked up {}x {}.", drop.quantity, item.name)
    } else {
        format!("Picked up {}.", item.name)
    };
    Ok(ActionOutcome::new(message)
        .with(StateDelta::ItemDropRemoved {
            drop_id: drop.id.clone(),
        })
        .with(StateDelta::ItemReceived {
            item: item.clone(),
            quantity: drop.quantity,
        }))
}
