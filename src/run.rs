//! Run lifecycle types.
//!
//! The per-run state machine:
//!
//! ```text
//!   NotStarted ──→ [InputPending] ──→ ResourceAcquiring ──→ Running ──→ ReleasingResource ──→ Done
//!                        │                    │
//!                        └────────────────────┴──────────────────────────────────────────────→ Done
//! ```
//!
//! **Invariants:**
//! - `InputPending` is only entered when a parameter is required.
//! - Transitions are monotonic; there is no retry edge.
//! - Once a resource is acquired, `Done` is only reachable through
//!   `ReleasingResource`.
//! - `Done` is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HarnessError;
use crate::operation::OperationInvocation;

/// Phase of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Nothing has happened yet.
    NotStarted,
    /// Waiting for a required parameter.
    InputPending,
    /// Acquiring the simulation resource.
    ResourceAcquiring,
    /// The operation is dispatched and being awaited.
    Running,
    /// Releasing the resource.
    ReleasingResource,
    /// Terminal.
    Done,
}

impl RunPhase {
    /// Check if this is the terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Done)
    }

    /// Check if a resource is held while in this phase.
    pub fn holds_resource(self) -> bool {
        matches!(self, RunPhase::Running | RunPhase::ReleasingResource)
    }

    /// Whether `self → next` is a legal edge.
    pub fn can_transition_to(self, next: RunPhase) -> bool {
        use RunPhase::*;
        matches!(
            (self, next),
            (NotStarted, InputPending | ResourceAcquiring | Done)
                | (InputPending, ResourceAcquiring | Done)
                | (ResourceAcquiring, Running | Done)
                | (Running, ReleasingResource)
                | (ReleasingResource, Done)
        )
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunPhase::NotStarted => "NotStarted",
            RunPhase::InputPending => "InputPending",
            RunPhase::ResourceAcquiring => "ResourceAcquiring",
            RunPhase::Running => "Running",
            RunPhase::ReleasingResource => "ReleasingResource",
            RunPhase::Done => "Done",
        };
        f.write_str(name)
    }
}

/// A phase entered at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Phase entered.
    pub phase: RunPhase,
    /// When it was entered.
    pub at: DateTime<Utc>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The operation completed and the resource was released.
    Succeeded,
    /// The run failed with the given message.
    Failed(String),
}

impl RunOutcome {
    /// Check if the run succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }
}

/// Trace of one run, kept by the harness after `execute` returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Identifier of the operation the run was for.
    pub operation: String,
    /// The invocation, once a resource was acquired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation: Option<OperationInvocation>,
    /// Phases entered, in order. The first entry is always `NotStarted`.
    pub transitions: Vec<PhaseTransition>,
    /// Final outcome, once the run is `Done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RunOutcome>,
}

impl RunRecord {
    /// Start a record in `NotStarted`.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            invocation: None,
            transitions: vec![PhaseTransition {
                phase: RunPhase::NotStarted,
                at: Utc::now(),
            }],
            outcome: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.transitions
            .last()
            .map_or(RunPhase::NotStarted, |transition| transition.phase)
    }

    /// Phases entered so far, in order.
    pub fn phases(&self) -> Vec<RunPhase> {
        self.transitions.iter().map(|t| t.phase).collect()
    }

    /// Enter `next`.
    pub fn enter(&mut self, next: RunPhase) {
        let current = self.phase();
        debug_assert!(
            current.can_transition_to(next),
            "illegal run transition {current} -> {next}"
        );
        debug!(operation = %self.operation, from = %current, to = %next, "run phase");
        self.transitions.push(PhaseTransition {
            phase: next,
            at: Utc::now(),
        });
    }

    /// Enter `Done` and record the outcome.
    pub fn finish<T>(&mut self, result: &Result<T, HarnessError>) {
        self.enter(RunPhase::Done);
        self.outcome = Some(match result {
            Ok(_) => RunOutcome::Succeeded,
            Err(err) => RunOutcome::Failed(err.to_string()),
        });
    }

    /// Whether the run ever reached `phase`.
    pub fn reached(&self, phase: RunPhase) -> bool {
        self.transitions.iter().any(|t| t.phase == phase)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
