//! RPG rule systems.
//!
//! Each system validates one kind of action against a read-only
//! [`RpgState`](crate::state::RpgState) and either rejects it with an
//! [`ActionError`] or describes its effect as an [`ActionOutcome`]. Systems
//! draw randomness only through the [`WorldEnv`](crate::env::WorldEnv) RNG
//! oracle, seeded per draw.
pub mod combat;
pub mod interaction;
pub mod inventory;
pub mod movement;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::action::{ActionError, ActionOutcome};

/// Result of validating an action in a system.
pub type SystemResult = Result<ActionOutcome, ActionError>;
