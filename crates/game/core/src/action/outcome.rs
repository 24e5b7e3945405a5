use crate::action::ActionRejection;
use crate::state::{ChangeSet, StateDelta};

/// Accepted action: the console message and the changes to apply.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub message: String,
    pub deltas: Vec<StateDelta>,
}

impl ActionOutcome {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            deltas: Vec::new(),
        }
    }

    pub fn with(mut self, delta: StateDelta) -> Self {
        self.deltas.push(delta);
        self
    }

    pub fn push(&mut self, delta: StateDelta) {
        self.deltas.push(delta);
    }

    pub fn changes(&self) -> ChangeSet {
        StateDelta::union(&self.deltas)
    }
}

/// What happened to one action, as returned to callers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    pub success: bool,
    pub message: String,
    pub changes: ChangeSet,
    pub rejection: Option<ActionRejection>,
}

impl ActionReport {
    pub fn accepted(outcome: &ActionOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message.clone(),
            changes: outcome.changes(),
            rejection: None,
        }
    }

    pub fn rejected(rejection: ActionRejection) -> Self {
        Self {
            success: false,
            message: rejection.to_string(),
            changes: ChangeSet::empty(),
            rejection: Some(rejection),
        }
    }

    /// Report for an action recorded after the hero died.
    pub fn ignored() -> Self {
        Self {
            success: false,
            message: String::new(),
            changes: ChangeSet::empty(),
            rejection: None,
        }
    }
}
