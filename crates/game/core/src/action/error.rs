//! Action rejection errors.
//!
//! Every variant's `Display` text is the console message the player sees when
//! the action is refused. Rejections never end a run.

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::geometry::Direction;

/// Reasons a world action can be refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    // ===== movement =====
    #[error("Cannot move {0} - path blocked")]
    PathBlocked(Direction),

    #[error("This passage is locked. You need a key.")]
    PassageLocked,

    // ===== combat =====
    #[error("Not in combat")]
    NotInCombat,

    #[error("No enemy nearby to attack")]
    NoEnemyNearby,

    #[error("No enemy to attack")]
    EnemyNotFound,

    #[error("{0} is too far away to attack.")]
    EnemyOutOfRange(String),

    #[error("No enemy to flee from")]
    NothingToFleeFrom,

    // ===== inventory =====
    #[error("Item not found in inventory.")]
    ItemNotInInventory,

    #[error("Item not found.")]
    UnknownItem,

    #[error("This item cannot be equipped.")]
    NotEquippable,

    #[error("Invalid armor slot.")]
    InvalidArmorSlot,

    #[error("Invalid equipment slot.")]
    InvalidEquipSlot,

    #[error("Inventory full. Cannot unequip current {0}.")]
    CannotSwapEquipped(String),

    #[error("Nothing equipped in that slot.")]
    NothingEquipped,

    #[error("Inventory full. Cannot unequip.")]
    CannotUnequip,

    #[error("This item cannot be used.")]
    NotUsable,

    #[error("Cannot use this item in combat")]
    NotUsableInCombat,

    #[error("Cannot use this item here.")]
    NotUsableHere,

    #[error("Inventory is full.")]
    InventoryFull,

    #[error("You only have {0}.")]
    NotEnoughItems(u32),

    #[error("Quantity must be at least 1.")]
    InvalidQuantity,

    #[error("Not enough gold. You need {0} gold.")]
    NotEnoughGold(u32),

    #[error("Cannot drop item.")]
    CannotDrop,

    // ===== interaction =====
    #[error("No one nearby to talk to")]
    NoOneNearby,

    #[error("NPC not found")]
    NpcNotFound,

    #[error("{0} is too far away to talk to.")]
    NpcTooFar(String),

    #[error("{0} has nothing to say.")]
    NothingToSay(String),

    #[error("Not in a conversation")]
    NotInConversation,

    #[error("Invalid dialogue option")]
    InvalidDialogueOption,

    #[error("No chest nearby")]
    NoChestNearby,

    #[error("The chest is too far away.")]
    ChestTooFar,

    #[error("This chest is already open.")]
    ChestAlreadyOpen,

    #[error("This chest is locked. You need a key.")]
    ChestLocked,

    #[error("Not talking to a merchant")]
    NotTalkingToMerchant,

    #[error("{0} is not a merchant.")]
    NotAMerchant(String),

    #[error("This item is not for sale here.")]
    NotForSale,

    #[error("Only {0} available.")]
    OutOfStock(i32),

    #[error("You do not have this item.")]
    ItemNotOwned,

    #[error("You can't sell that.")]
    CannotSell,

    #[error("No item to pick up")]
    NoItemToPickUp,

    #[error("The item is too far away.")]
    ItemTooFar,

    // ===== general =====
    #[error("Unknown action")]
    UnknownAction,

    /// Static data referenced by the state is missing.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            PathBlocked(_) | PassageLocked | NoEnemyNearby | EnemyOutOfRange(_)
            | CannotSwapEquipped(_) | CannotUnequip | InventoryFull | NotEnoughGold(_)
            | NoOneNearby | NpcTooFar(_) | NoChestNearby | ChestTooFar | ChestLocked
            | OutOfStock(_) | NoItemToPickUp | ItemTooFar => ErrorSeverity::Recoverable,

            NotInCombat | EnemyNotFound | NothingToFleeFrom | ItemNotInInventory | UnknownItem
            | NotEquippable | InvalidArmorSlot | InvalidEquipSlot | NothingEquipped
            | NotUsable | NotUsableInCombat | NotUsableHere | NotEnoughItems(_)
            | InvalidQuantity | CannotDrop | NpcNotFound | NothingToSay(_)
            | NotInConversation | InvalidDialogueOption | ChestAlreadyOpen
            | NotTalkingToMerchant | NotAMerchant(_) | NotForSale | ItemNotOwned | CannotSell
            | UnknownAction => ErrorSeverity::Validation,

            Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            PathBlocked(_) => "PATH_BLOCKED",
            PassageLocked => "PASSAGE_LOCKED",
            NotInCombat => "NOT_IN_COMBAT",
            NoEnemyNearby => "NO_ENEMY_NEARBY",
            EnemyNotFound => "ENEMY_NOT_FOUND",
            EnemyOutOfRange(_) => "ENEMY_OUT_OF_RANGE",
            NothingToFleeFrom => "NOTHING_TO_FLEE_FROM",
            ItemNotInInventory => "ITEM_NOT_IN_INVENTORY",
            UnknownItem => "UNKNOWN_ITEM",
            NotEquippable => "NOT_EQUIPPABLE",
            InvalidArmorSlot => "INVALID_ARMOR_SLOT",
            InvalidEquipSlot => "INVALID_EQUIP_SLOT",
            CannotSwapEquipped(_) => "CANNOT_SWAP_EQUIPPED",
            NothingEquipped => "NOTHING_EQUIPPED",
            CannotUnequip => "CANNOT_UNEQUIP",
            NotUsable => "NOT_USABLE",
            NotUsableInCombat => "NOT_USABLE_IN_COMBAT",
            NotUsableHere => "NOT_USABLE_HERE",
            InventoryFull => "INVENTORY_FULL",
            NotEnoughItems(_) => "NOT_ENOUGH_ITEMS",
            InvalidQuantity => "INVALID_QUANTITY",
            NotEnoughGold(_) => "NOT_ENOUGH_GOLD",
            CannotDrop => "CANNOT_DROP",
            NoOneNearby => "NO_ONE_NEARBY",
            NpcNotFound => "NPC_NOT_FOUND",
            NpcTooFar(_) => "NPC_TOO_FAR",
            NothingToSay(_) => "NOTHING_TO_SAY",
            NotInConversation => "NOT_IN_CONVERSATION",
            InvalidDialogueOption => "INVALID_DIALOGUE_OPTION",
            NoChestNearby => "NO_CHEST_NEARBY",
            ChestTooFar => "CHEST_TOO_FAR",
            ChestAlreadyOpen => "CHEST_ALREADY_OPEN",
            ChestLocked => "CHEST_LOCKED",
            NotTalkingToMerchant => "NOT_TALKING_TO_MERCHANT",
            NotAMerchant(_) => "NOT_A_MERCHANT",
            NotForSale => "NOT_FOR_SALE",
            OutOfStock(_) => "OUT_OF_STOCK",
            ItemNotOwned => "ITEM_NOT_OWNED",
            CannotSell => "CANNOT_SELL",
            NoItemToPickUp => "NO_ITEM_TO_PICK_UP",
            ItemTooFar => "ITEM_TOO_FAR",
            UnknownAction => "UNKNOWN_ACTION",
            Oracle(err) => err.error_code(),
        }
    }
}

/// A refused action together with where and when it was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRejection {
    pub error: ActionError,
    pub context: ErrorContext,
}

impl core::fmt::Display for ActionRejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.error.fmt(f)
    }
}

impl GameError for ActionRejection {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn context(&self) -> Option<&ErrorContext> {
        Some(&self.context)
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}
