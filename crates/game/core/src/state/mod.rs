//! Simulation state.
//!
//! Two state shapes share one set of invariants: [`PuzzleState`] for grid
//! puzzles and [`RpgState`] for world runs. Both are plain values; simulators
//! clone the incoming state and return a new one, so callers keep every
//! snapshot they were handed.
//!
//! All keyed collections are `BTreeMap`/`BTreeSet` so serialized states and
//! their fingerprints are deterministic.
pub mod delta;

mod combat;
mod dialogue;
mod entities;
mod hero;
mod inventory;
mod puzzle;
mod rpg;
mod status;
mod world;

pub use combat::{CombatMove, CombatOutcome, CombatState, Combatant};
pub use delta::{ChangeSet, LootRoll, StateDelta};
pub use dialogue::DialogueState;
pub use entities::{Chest, Enemy, ItemDrop, Npc};
pub use hero::HeroState;
pub use inventory::{Equipment, Inventory, InventorySlot};
pub use puzzle::PuzzleState;
pub use rpg::{FlagValue, RpgState, RunProgress, actor};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use world::WorldState;
