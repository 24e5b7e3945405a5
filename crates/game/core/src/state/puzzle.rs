use std::collections::BTreeSet;

use crate::action::Action;
use crate::geometry::Position;

/// State of a grid puzzle run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PuzzleState {
    pub hero_position: Position,
    pub collected_coins: BTreeSet<Position>,
    pub current_turn: u64,
    pub is_alive: bool,
    pub has_won: bool,
    pub action_history: Vec<Action>,
}

impl PuzzleState {
    pub fn new(start: Position) -> Self {
        Self {
            hero_position: start,
            collected_coins: BTreeSet::new(),
            current_turn: 0,
            is_alive: true,
            has_won: false,
            action_history: Vec::new(),
        }
    }

    /// True once the run can no longer change.
    pub fn is_finished(&self) -> bool {
        !self.is_alive || self.has_won
    }

    /// SHA-256 digest of the bincode encoding.
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
