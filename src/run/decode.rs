// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Defensive decoding of wire event payloads.
//!
//! The push source delivers loosely-typed JSON. Decoding never fails hard:
//! a payload missing its run id cannot be routed and is dropped, any other
//! missing or mistyped field degrades to a default so one malformed event
//! can never halt processing of the ones behind it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{RunEvent, StepStatus};

/// An event as delivered by the push source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Delivery id, unique per envelope.
    pub id: Uuid,
    /// Wire name of the event type (e.g. `"tool-call-started"`).
    pub event_type: String,
    /// When this envelope was received.
    pub received_at: DateTime<Utc>,
    /// Event-specific fields.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Create an envelope received now.
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            received_at: Utc::now(),
            payload,
        }
    }
}

/// Decode an envelope into a typed [`RunEvent`].
///
/// Returns `None` for unknown event types and for payloads without a run id.
/// All other field reads fall back to defaults; at worst the display value
/// is missing or garbled, never a decode failure.
pub fn decode(envelope: &EventEnvelope) -> Option<RunEvent> {
    let payload = &envelope.payload;

    let Some(run_id) = str_field(payload, "run_id") else {
        warn!(event_type = %envelope.event_type, "dropping event without run id");
        return None;
    };

    match envelope.event_type.as_str() {
        "run-started" => Some(RunEvent::RunStarted { run_id }),
        "run-finished" => Some(RunEvent::RunFinished { run_id }),
        "text-fragment" => Some(RunEvent::TextFragment {
            run_id,
            text: str_field(payload, "text").unwrap_or_default(),
        }),
        "tool-call-started" => Some(RunEvent::ToolCallStarted {
            run_id,
            call_id: str_field(payload, "call_id")?,
            name: str_field(payload, "name").unwrap_or_default(),
            arguments: parse_arguments(payload),
        }),
        "tool-result" => Some(RunEvent::ToolResult {
            run_id,
            call_id: str_field(payload, "call_id")?,
            result: str_field(payload, "result").unwrap_or_default(),
            error: str_field(payload, "error").filter(|e| !e.is_empty()),
        }),
        "step-started" => Some(RunEvent::StepStarted {
            run_id,
            step_id: str_field(payload, "step_id")?,
            name: str_field(payload, "name").unwrap_or_default(),
        }),
        "step-finished" => Some(RunEvent::StepFinished {
            run_id,
            step_id: str_field(payload, "step_id")?,
            status: str_field(payload, "status")
                .and_then(|s| StepStatus::from_wire(&s))
                .unwrap_or(StepStatus::Completed),
        }),
        other => {
            debug!(event_type = %other, "ignoring unknown event type");
            None
        }
    }
}

/// Read a string field, tolerating absence and wrong types.
fn str_field(payload: &serde_json::Value, key: &str) -> Option<String> {
    payload.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// Tool-call arguments arrive as a JSON-encoded string. Parse leniently:
/// malformed JSON leaves the structured field absent rather than failing.
fn parse_arguments(payload: &serde_json::Value) -> Option<serde_json::Value> {
    let raw = payload.get("arguments")?.as_str()?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(%err, "tool-call arguments are not valid JSON, leaving unparsed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_run_lifecycle() {
        let envelope = EventEnvelope::new("run-started", json!({"run_id": "r1"}));
        assert_eq!(
            decode(&envelope),
            Some(RunEvent::RunStarted {
                run_id: "r1".to_string()
            })
        );

        let envelope = EventEnvelope::new("run-finished", json!({"run_id": "r1"}));
        assert!(decode(&envelope).unwrap().is_finish());
    }

    #[test]
    fn test_decode_text_fragment_defaults_missing_text() {
        let envelope = EventEnvelope::new("text-fragment", json!({"run_id": "r1"}));
        assert_eq!(
            decode(&envelope),
            Some(RunEvent::TextFragment {
                run_id: "r1".to_string(),
                text: String::new()
            })
        );
    }

    #[test]
    fn test_decode_tool_call_with_arguments() {
        let envelope = EventEnvelope::new(
            "tool-call-started",
            json!({
                "run_id": "r1",
                "call_id": "c1",
                "name": "grep",
                "arguments": r#"{"pattern": "fn main"}"#
            }),
        );
        match decode(&envelope) {
            Some(RunEvent::ToolCallStarted { arguments, name, .. }) => {
                assert_eq!(name, "grep");
                assert_eq!(arguments, Some(json!({"pattern": "fn main"})));
            }
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_decode_tool_call_malformed_arguments() {
        let envelope = EventEnvelope::new(
            "tool-call-started",
            json!({
                "run_id": "r1",
                "call_id": "c1",
                "name": "grep",
                "arguments": "{not json"
            }),
        );
        match decode(&envelope) {
            Some(RunEvent::ToolCallStarted { arguments, .. }) => assert!(arguments.is_none()),
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_decode_tool_result_empty_error_is_success() {
        let envelope = EventEnvelope::new(
            "tool-result",
            json!({"run_id": "r1", "call_id": "c1", "result": "3 matches", "error": ""}),
        );
        match decode(&envelope) {
            Some(RunEvent::ToolResult { error, result, .. }) => {
                assert!(error.is_none());
                assert_eq!(result, "3 matches");
            }
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_decode_step_finished_unknown_status_falls_back() {
        let envelope = EventEnvelope::new(
            "step-finished",
            json!({"run_id": "r1", "step_id": "s1", "status": "vaporized"}),
        );
        match decode(&envelope) {
            Some(RunEvent::StepFinished { status, .. }) => {
                assert_eq!(status, StepStatus::Completed);
            }
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_decode_drops_missing_run_id() {
        let envelope = EventEnvelope::new("text-fragment", json!({"text": "orphan"}));
        assert!(decode(&envelope).is_none());
    }

    #[test]
    fn test_decode_drops_unknown_type() {
        let envelope = EventEnvelope::new("coffee-ready", json!({"run_id": "r1"}));
        assert!(decode(&envelope).is_none());
    }

    #[test]
    fn test_decode_tolerates_wrong_types() {
        // run_id as a number cannot be routed; text as a number degrades.
        let envelope = EventEnvelope::new("text-fragment", json!({"run_id": 42, "text": "x"}));
        assert!(decode(&envelope).is_none());

        let envelope =
            EventEnvelope::new("text-fragment", json!({"run_id": "r1", "text": 42}));
        match decode(&envelope) {
            Some(RunEvent::TextFragment { text, .. }) => assert_eq!(text, ""),
            other => panic!("unexpected decode: {other:?}"),
        }
    }
}
