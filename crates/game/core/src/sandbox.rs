//! Contract with the code sandbox.
//!
//! Player code never runs inside the engine. A [`CodeRunner`] turns code text
//! into a finished, bounded [`SandboxOutput`]; simulators only ever see its
//! action list.

use crate::action::{Action, ActionKind};

/// Code to run and the limits to run it under.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SandboxRequest {
    pub code: String,
    pub allowed_methods: Vec<ActionKind>,
    #[cfg_attr(feature = "serde", serde(default = "default_timeout_ms"))]
    pub timeout_ms: u64,
    #[cfg_attr(feature = "serde", serde(default = "default_max_actions"))]
    pub max_actions: usize,
}

#[cfg(feature = "serde")]
fn default_timeout_ms() -> u64 {
    SandboxRequest::DEFAULT_TIMEOUT_MS
}

#[cfg(feature = "serde")]
fn default_max_actions() -> usize {
    SandboxRequest::DEFAULT_MAX_ACTIONS
}

impl SandboxRequest {
    pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
    pub const DEFAULT_MAX_ACTIONS: usize = 200;

    pub fn new(code: impl Into<String>, allowed_methods: Vec<ActionKind>) -> Self {
        Self {
            code: code.into(),
            allowed_methods,
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
            max_actions: Self::DEFAULT_MAX_ACTIONS,
        }
    }
}

/// What the sandbox produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SandboxOutput {
    pub actions: Vec<Action>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub console_output: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub error: Option<String>,
}

impl SandboxOutput {
    /// First action whose method is not in `allowed`, with its index.
    pub fn first_disallowed(&self, allowed: &[ActionKind]) -> Option<(usize, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .find(|(_, action)| !allowed.contains(&action.kind()))
    }

    /// Drops actions past `max_actions`.
    pub fn truncate(&mut self, max_actions: usize) {
        self.actions.truncate(max_actions);
    }
}

/// Executes player code in isolation.
///
/// Implementations must stop the code after `timeout_ms`, refuse methods
/// outside `allowed_methods`, and emit at most `max_actions` actions.
pub trait CodeRunner {
    fn run(&self, request: &SandboxRequest) -> SandboxOutput;
}

/// Runner that replays an output recorded earlier.
///
/// Actions past the request's cap are dropped. A recorded action outside the
/// allowed methods ends the replay with an error, the way a live sandbox
/// would reject the call.
#[derive(Clone, Debug, Default)]
pub struct RecordedRunner {
    recorded: SandboxOutput,
}

impl RecordedRunner {
    pub fn new(recorded: SandboxOutput) -> Self {
        Self { recorded }
    }
}

impl CodeRunner for RecordedRunner {
    fn run(&self, request: &SandboxRequest) -> SandboxOutput {
        let mut output = self.recorded.clone();
        if let Some((index, action)) = output.first_disallowed(&request.allowed_methods) {
            let method = action.kind();
            output.actions.truncate(index);
            output.error = Some(format!("hero.{method} is not available in this level"));
        }
        output.truncate(request.max_actions);
        output
    }
}
