// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The event fold: [`RunState`] plus [`RunState::apply`].
//!
//! State is an explicit container mutated only by `apply`, so the whole
//! reduction is unit-testable without a UI framework or an event source.
//! Events are applied one at a time in arrival order; there is no buffering
//! and no reordering. Updates that reference a call or step the state has
//! never seen are no-ops, which is how unordered delivery degrades.

use serde::Serialize;
use tracing::debug;

use super::types::{RunEvent, StepRecord, ToolCallRecord, ToolCallStatus};

/// UI-observable state for the run a view is watching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunState {
    /// The run id this state accepts events for.
    scope: String,
    /// Accumulating streaming text of the in-progress response.
    pub streaming: String,
    /// Tool calls in arrival order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Plan steps in arrival order.
    pub steps: Vec<StepRecord>,
    /// True between run-started and run-finished.
    pub running: bool,
    /// Raised when a finished run means the persisted message store is stale.
    pub needs_refetch: bool,
}

impl RunState {
    /// Create empty state scoped to the given run id.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            streaming: String::new(),
            tool_calls: Vec::new(),
            steps: Vec::new(),
            running: false,
            needs_refetch: false,
        }
    }

    /// The run id this state is scoped to.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Switch to a different run, discarding all derived state.
    pub fn set_scope(&mut self, scope: impl Into<String>) {
        *self = Self::new(scope);
    }

    /// Lower the re-fetch signal after the message store has been reloaded.
    pub fn acknowledge_refetch(&mut self) {
        self.needs_refetch = false;
    }

    /// Fold one event into the state.
    ///
    /// Events scoped to a different run are discarded outright, not buffered.
    /// Scope match is the only admission filter; the `running` flag reports
    /// lifecycle, it does not gate slice updates, so a tool call observed
    /// outside an announced run is still tracked.
    pub fn apply(&mut self, event: &RunEvent) {
        if event.run_id() != self.scope {
            return;
        }

        match event {
            RunEvent::RunStarted { .. } => {
                self.streaming.clear();
                self.tool_calls.clear();
                self.steps.clear();
                self.running = true;
            }

            RunEvent::RunFinished { .. } => {
                self.streaming.clear();
                self.tool_calls.clear();
                self.steps.clear();
                self.running = false;
                self.needs_refetch = true;
            }

            RunEvent::TextFragment { text, .. } => {
                self.streaming.push_str(text);
            }

            RunEvent::ToolCallStarted {
                call_id,
                name,
                arguments,
                ..
            } => {
                if self.tool_calls.iter().any(|c| c.call_id == *call_id) {
                    debug!(%call_id, "duplicate tool-call start ignored");
                    return;
                }
                self.tool_calls
                    .push(ToolCallRecord::started(call_id, name, arguments.clone()));
            }

            RunEvent::ToolResult {
                call_id,
                result,
                error,
                ..
            } => {
                match self.tool_calls.iter_mut().find(|c| c.call_id == *call_id) {
                    Some(call) => {
                        call.result = Some(result.clone());
                        call.status = if error.is_some() {
                            ToolCallStatus::Failed
                        } else {
                            ToolCallStatus::Completed
                        };
                    }
                    None => debug!(%call_id, "orphan tool result ignored"),
                }
            }

            RunEvent::StepStarted { step_id, name, .. } => {
                if self.steps.iter().any(|s| s.step_id == *step_id) {
                    debug!(%step_id, "duplicate step start ignored");
                    return;
                }
                self.steps.push(StepRecord::started(step_id, name));
            }

            RunEvent::StepFinished {
                step_id, status, ..
            } => match self.steps.iter_mut().find(|s| s.step_id == *step_id) {
                Some(step) => step.status = *status,
                None => debug!(%step_id, "orphan step finish ignored"),
            },
        }
    }
}

/// Fold an event into owned state, for use with iterator folds.
pub fn reduce(mut state: RunState, event: &RunEvent) -> RunState {
    state.apply(event);
    state
}
