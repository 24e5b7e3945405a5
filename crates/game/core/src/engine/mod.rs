//! Simulators and the state reducer.
//!
//! [`PuzzleSimulator`] runs move/wait programs on a grid level.
//! [`WorldSimulator`] runs the full action vocabulary against a world: each
//! action is validated by a system from [`crate::systems`], and the resulting
//! [`StateDelta`](crate::state::StateDelta) list is applied by the
//! [`StateReducer`] to a scratch copy, so a failed action never leaves a
//! half-applied state behind.
//!
//! # Module Structure
//!
//! - `error`: [`SimulationError`] for broken static data
//! - `puzzle`: grid puzzle simulator
//! - `reducer`: the single writer of RPG state
//! - `spawn`: zone population, respawns and drop expiry
//! - `world`: RPG world simulator and end-of-turn upkeep

mod error;
mod puzzle;
mod reducer;
pub mod spawn;
mod world;

pub use error::SimulationError;
pub use puzzle::{PuzzleResult, PuzzleSimulator, WinConditionsMet};
pub use reducer::StateReducer;
pub use world::{WorldResult, WorldSimulator};
