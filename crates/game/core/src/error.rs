//! Common error infrastructure for quest-core.
//!
//! Domain-specific errors live next to the code that raises them:
//! [`crate::action::ActionError`] for rejected actions and
//! [`crate::engine::SimulationError`] for configuration faults.
//!
//! # Two tiers
//!
//! - **Action-level** errors never stop a run. Their `Display` text is the
//!   console message shown to the player, and the simulator moves on.
//! - **Run-level** errors are configuration faults (a world without its start
//!   zone) and are returned as `Err` before any turn is simulated.

use crate::geometry::Position;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same goal may succeed with a different action or later
/// - **Validation**: the action referenced something invalid
/// - **Internal**: state and static data disagree
/// - **Fatal**: the simulator cannot be built or cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: target out of reach, not enough gold, inventory full.
    Recoverable,

    /// Examples: unknown item id, invalid dialogue option, unknown action tag.
    Validation,

    /// Examples: an entity placement that references a missing template.
    Internal,

    /// Examples: missing start zone, missing target zone.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken configuration.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Turn at which the error occurred.
    pub turn: u64,

    /// Hero position at the time of the error.
    pub position: Option<Position>,

    /// Entity (enemy, NPC, chest, drop or item) the error concerns.
    pub entity: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u64) -> Self {
        Self {
            turn,
            position: None,
            entity: None,
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

/// Common trait for all quest-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable SCREAMING_SNAKE identifiers for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }

    #[test]
    fn context_builder_collects_fields() {
        let ctx = ErrorContext::new(7)
            .with_position(Position::new(1, 2))
            .with_entity("slime-1");
        assert_eq!(ctx.turn, 7);
        assert_eq!(ctx.position, Some(Position::new(1, 2)));
        assert_eq!(ctx.entity.as_deref(), Some("slime-1"));
    }
}
