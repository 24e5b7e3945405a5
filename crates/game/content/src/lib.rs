//! Data-driven content and loaders for the quest engine.
//!
//! This crate reads the static inputs of a run from files:
//! - Puzzle levels (JSON)
//! - RPG worlds (JSON)
//! - Item catalogs (RON or JSON)
//! - Engine configuration (TOML)
//! - Recorded action lists and sandbox outputs (JSON)
//!
//! It also validates puzzle levels against the authoring rules. Content is
//! handed to the simulators and never appears in game state.

pub mod validate;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use validate::validate_level;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ConfigLoader, ContentFactory, ItemLoader, LevelLoader, LoadResult, WorldLoader,
};
