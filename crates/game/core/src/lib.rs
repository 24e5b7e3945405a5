//! Deterministic simulation core for the quest coding game.
//!
//! `quest-core` turns a static level or world description plus an ordered
//! action list into a replayable history of states. Two simulators share one
//! set of types: [`engine::PuzzleSimulator`] for grid puzzles and
//! [`engine::WorldSimulator`] for RPG worlds. Every state-producing call takes
//! a state by reference and returns a new one; all RPG state writes flow
//! through [`engine::StateReducer`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod sandbox;
pub mod state;
pub mod systems;

pub use action::{Action, ActionError, ActionKind, ActionOutcome, ActionRejection, ActionReport};
pub use config::EngineConfig;
pub use engine::{
    PuzzleResult, PuzzleSimulator, SimulationError, StateReducer, WinConditionsMet, WorldResult,
    WorldSimulator,
};
pub use env::{
    FixedRng, Item, ItemOracle, ItemRegistry, LevelData, OracleError, PcgRng, RngOracle,
    WorldData, WorldEnv, ZoneData,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use geometry::{Direction, Position};
pub use sandbox::{CodeRunner, RecordedRunner, SandboxOutput, SandboxRequest};
pub use state::{ChangeSet, PuzzleState, RpgState, StateDelta};
