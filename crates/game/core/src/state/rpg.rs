use std::collections::BTreeMap;

use crate::action::Action;
use crate::env::{RollKind, compute_seed};
use crate::geometry::Position;
use crate::state::{CombatState, DialogueState, HeroState, Inventory, WorldState};

/// Value of a free-form story flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FlagValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

/// Totals accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RunProgress {
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub items_collected: u64,
    pub enemies_defeated: u64,
}

/// State of an RPG world run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RpgState {
    pub hero_position: Position,
    pub current_turn: u64,
    pub is_alive: bool,
    pub has_won: bool,
    pub action_history: Vec<Action>,
    pub hero: HeroState,
    pub inventory: Inventory,
    pub world: WorldState,
    pub combat: Option<CombatState>,
    pub dialogue: Option<DialogueState>,
    pub flags: BTreeMap<String, FlagValue>,
    pub console_output: Vec<String>,
    /// Fixed when the run starts; every random draw derives from it.
    pub game_seed: u64,
    pub progress: RunProgress,
}

impl RpgState {
    pub fn new(
        game_seed: u64,
        position: Position,
        zone_id: impl Into<String>,
        hero: HeroState,
        inventory: Inventory,
    ) -> Self {
        Self {
            hero_position: position,
            current_turn: 0,
            is_alive: true,
            has_won: false,
            action_history: Vec::new(),
            hero,
            inventory,
            world: WorldState::new(zone_id),
            combat: None,
            dialogue: None,
            flags: BTreeMap::new(),
            console_output: Vec::new(),
            game_seed,
            progress: RunProgress::default(),
        }
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// Seed of the `index`-th `roll` of the action being resolved.
    ///
    /// The nonce is the number of recorded actions, so draws differ between
    /// actions even when the turn counter does not move.
    pub fn roll_seed(&self, actor_id: u32, roll: RollKind, index: u32) -> u64 {
        compute_seed(
            self.game_seed,
            self.action_history.len() as u64,
            actor_id,
            roll.context(index),
        )
    }

    pub fn total_attack(&self) -> u32 {
        self.hero.total_attack(&self.inventory.equipped)
    }

    pub fn total_defense(&self) -> u32 {
        self.hero.total_defense(&self.inventory.equipped)
    }

    pub fn crit_chance(&self) -> f64 {
        self.hero.crit_chance(&self.inventory.equipped)
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

/// Actor ids used when deriving roll seeds.
pub mod actor {
    pub const HERO: u32 = 0;
    pub const WORLD: u32 = 1;
}
