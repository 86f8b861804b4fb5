// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed run telemetry events and the records they fold into.
//!
//! Every event carries the id of the run it belongs to; the reducer discards
//! events whose run id does not match the scope it is watching.

use serde::{Deserialize, Serialize};

/// Wire names of the run telemetry event types, in no particular order.
///
/// A monitor subscribes to all of them on one channel so arrival order is
/// preserved across types.
pub const RUN_EVENT_TYPES: [&str; 7] = [
    "run-started",
    "run-finished",
    "text-fragment",
    "tool-call-started",
    "tool-result",
    "step-started",
    "step-finished",
];

/// A telemetry event scoped to a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RunEvent {
    /// The run began; all derived state resets.
    RunStarted { run_id: String },

    /// The run ended; derived state clears and the persisted message store
    /// should be re-fetched.
    RunFinished { run_id: String },

    /// A chunk of streaming assistant text.
    TextFragment { run_id: String, text: String },

    /// The agent invoked a tool.
    ToolCallStarted {
        run_id: String,
        call_id: String,
        name: String,
        /// Structured arguments, when the wire payload carried parseable JSON.
        arguments: Option<serde_json::Value>,
    },

    /// A tool invocation finished.
    ToolResult {
        run_id: String,
        call_id: String,
        result: String,
        error: Option<String>,
    },

    /// A plan step began executing.
    StepStarted {
        run_id: String,
        step_id: String,
        name: String,
    },

    /// A plan step reached a terminal status.
    StepFinished {
        run_id: String,
        step_id: String,
        status: StepStatus,
    },
}

impl RunEvent {
    /// The run this event is scoped to.
    pub fn run_id(&self) -> &str {
        match self {
            Self::RunStarted { run_id }
            | Self::RunFinished { run_id }
            | Self::TextFragment { run_id, .. }
            | Self::ToolCallStarted { run_id, .. }
            | Self::ToolResult { run_id, .. }
            | Self::StepStarted { run_id, .. }
            | Self::StepFinished { run_id, .. } => run_id,
        }
    }

    /// Check if this event starts a run.
    pub fn is_start(&self) -> bool {
        matches!(self, Self::RunStarted { .. })
    }

    /// Check if this event finishes a run.
    pub fn is_finish(&self) -> bool {
        matches!(self, Self::RunFinished { .. })
    }
}

/// Status of a tracked tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallStatus {
    Running,
    Completed,
    Failed,
}

impl ToolCallStatus {
    /// Check if the call is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A tool call tracked from start to result for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub call_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub status: ToolCallStatus,
}

impl ToolCallRecord {
    /// Create a record for a call that just started.
    pub fn started(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: Option<serde_json::Value>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
            result: None,
            status: ToolCallStatus::Running,
        }
    }
}

/// Status of a tracked plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Running,
    Completed,
    Failed,
    Cancelled,
    Skipped,
}

impl StepStatus {
    /// Parse a wire status string; unknown strings map to `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    /// Check if the step is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// A plan step tracked from start to finish for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step_id: String,
    pub name: String,
    pub status: StepStatus,
}

impl StepRecord {
    /// Create a record for a step that just started.
    pub fn started(step_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            name: name.into(),
            status: StepStatus::Running,
        }
    }
}
