//! Player actions.
//!
//! An [`Action`] is one tagged command produced by the code sandbox for one
//! simulated turn. The puzzle simulator understands `move` and `wait`; the
//! world simulator understands the whole vocabulary.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`], the reasons an action can be rejected
//! - `outcome`: [`ActionOutcome`] produced by systems and [`ActionReport`]
//!   returned to callers

pub mod error;
pub mod outcome;

pub use error::{ActionError, ActionRejection};
pub use outcome::{ActionOutcome, ActionReport};

use crate::geometry::Direction;

/// A single tagged command.
///
/// Serialized with a `type` tag and camelCase field names, matching the action
/// lists emitted by the sandbox: `{"type":"useItem","itemId":"potion"}`.
/// Tags the engine does not know deserialize to [`Action::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Action {
    Move {
        direction: Direction,
    },
    Wait,
    Attack {
        #[cfg_attr(feature = "serde", serde(default))]
        target_id: Option<String>,
    },
    Defend,
    Flee,
    UseItem {
        item_id: String,
        #[cfg_attr(feature = "serde", serde(default))]
        target_id: Option<String>,
    },
    Equip {
        item_id: String,
    },
    /// Slot name as written by the player; parsed by the inventory system.
    Unequip {
        slot: String,
    },
    PickUp {
        #[cfg_attr(feature = "serde", serde(default))]
        item_drop_id: Option<String>,
    },
    Drop {
        item_id: String,
        #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
        quantity: u32,
    },
    Talk {
        #[cfg_attr(feature = "serde", serde(default))]
        npc_id: Option<String>,
    },
    OpenChest {
        #[cfg_attr(feature = "serde", serde(default))]
        chest_id: Option<String>,
    },
    Buy {
        item_id: String,
        #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
        quantity: u32,
    },
    Sell {
        item_id: String,
        #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
        quantity: u32,
    },
    SelectDialogOption {
        option_index: usize,
    },
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u32 {
    1
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Move { .. } => ActionKind::Move,
            Action::Wait => ActionKind::Wait,
            Action::Attack { .. } => ActionKind::Attack,
            Action::Defend => ActionKind::Defend,
            Action::Flee => ActionKind::Flee,
            Action::UseItem { .. } => ActionKind::UseItem,
            Action::Equip { .. } => ActionKind::Equip,
            Action::Unequip { .. } => ActionKind::Unequip,
            Action::PickUp { .. } => ActionKind::PickUp,
            Action::Drop { .. } => ActionKind::Drop,
            Action::Talk { .. } => ActionKind::Talk,
            Action::OpenChest { .. } => ActionKind::OpenChest,
            Action::Buy { .. } => ActionKind::Buy,
            Action::Sell { .. } => ActionKind::Sell,
            Action::SelectDialogOption { .. } => ActionKind::SelectDialogOption,
            Action::Unknown => ActionKind::Unknown,
        }
    }

    pub fn move_to(direction: Direction) -> Self {
        Action::Move { direction }
    }
}

/// Action tag without payload. Also names the sandbox method that emits it.
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
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ActionKind {
    #[strum(serialize = "move")]
    Move,
    #[strum(serialize = "wait")]
    Wait,
    #[strum(serialize = "attack")]
    Attack,
    #[strum(serialize = "defend")]
    Defend,
    #[strum(serialize = "flee")]
    Flee,
    #[strum(serialize = "useItem")]
    UseItem,
    #[strum(serialize = "equip")]
    Equip,
    #[strum(serialize = "unequip")]
    Unequip,
    #[strum(serialize = "pickUp")]
    PickUp,
    #[strum(serialize = "drop")]
    Drop,
    #[strum(serialize = "talk")]
    Talk,
    #[strum(serialize = "openChest")]
    OpenChest,
    #[strum(serialize = "buy")]
    Buy,
    #[strum(serialize = "sell")]
    Sell,
    #[strum(serialize = "selectDialogOption")]
    SelectDialogOption,
    #[strum(serialize = "unknown")]
    Unknown,
}

impl ActionKind {
    /// Methods a puzzle level may expose to player code.
    pub const PUZZLE_METHODS: [ActionKind; 2] = [ActionKind::Move, ActionKind::Wait];
}
