//! Run-level errors.

use crate::env::OracleError;
use crate::geometry::Position;
use crate::error::{ErrorSeverity, GameError};

/// Faults in the static data a simulator is built from.
///
/// Unlike [`crate::action::ActionError`], these are returned to the caller
/// instead of being written to the console.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulationError {
    #[error("start zone '{0}' not found in world data")]
    StartZoneNotFound(String),

    #[error("Zone {0} not found")]
    ZoneNotFound(String),

    #[error("start position {position} in zone '{zone_id}' is not walkable")]
    BlockedStart { zone_id: String, position: Position },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SimulationError::StartZoneNotFound(_)
            | SimulationError::ZoneNotFound(_)
            | SimulationError::BlockedStart { .. } => ErrorSeverity::Fatal,
            SimulationError::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SimulationError::StartZoneNotFound(_) => "SIMULATION_START_ZONE_NOT_FOUND",
            SimulationError::ZoneNotFound(_) => "SIMULATION_ZONE_NOT_FOUND",
            SimulationError::BlockedStart { .. } => "SIMULATION_BLOCKED_START",
            SimulationError::Oracle(err) => err.error_code(),
        }
    }
}
