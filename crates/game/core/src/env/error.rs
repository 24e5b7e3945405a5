//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Position;

/// Errors raised when static data referenced by the state is missing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The state points at a zone the world does not define.
    #[error("zone '{0}' not found")]
    ZoneNotFound(String),

    /// An item id is not present in the item catalog.
    #[error("item definition '{0}' not found")]
    ItemNotFound(String),

    /// A zone entry point is outside the zone or on a blocking tile.
    #[error("zone '{zone_id}' cannot be entered at {position}")]
    BlockedEntry { zone_id: String, position: Position },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::ZoneNotFound(_) => ErrorSeverity::Internal,
            OracleError::ItemNotFound(_) => ErrorSeverity::Validation,
            OracleError::BlockedEntry { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::ZoneNotFound(_) => "ORACLE_ZONE_NOT_FOUND",
            OracleError::ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            OracleError::BlockedEntry { .. } => "ORACLE_BLOCKED_ENTRY",
        }
    }
}
