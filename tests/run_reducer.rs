// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Integration tests for run telemetry: decode, reduce, and the bus/monitor
//! wiring, driven through the public API the dashboard uses.

use serde_json::json;

use agentdeck::run::{
    decode, EventBus, EventEnvelope, RunMonitor, RunState, StepStatus, ToolCallStatus,
};

fn envelope(event_type: &str, payload: serde_json::Value) -> EventEnvelope {
    EventEnvelope::new(event_type, payload)
}

/// Decode a wire envelope and fold it, the way the monitor does.
fn feed(state: &mut RunState, event_type: &str, payload: serde_json::Value) {
    if let Some(event) = decode(&envelope(event_type, payload)) {
        state.apply(&event);
    }
}

// ============================================================================
// Run Lifecycle
// ============================================================================

#[test]
fn test_run_lifecycle_reset() {
    let mut state = RunState::new("A");
    feed(&mut state, "run-started", json!({"run_id": "A"}));
    feed(&mut state, "text-fragment", json!({"run_id": "A", "text": "hi"}));
    feed(
        &mut state,
        "tool-call-started",
        json!({"run_id": "A", "call_id": "1", "name": "bash"}),
    );
    assert_eq!(state.streaming, "hi");
    assert_eq!(state.tool_calls.len(), 1);

    feed(&mut state, "run-finished", json!({"run_id": "A"}));
    assert_eq!(state.streaming, "");
    assert!(state.tool_calls.is_empty());
    assert!(!state.running);
    assert!(state.needs_refetch);
}

#[test]
fn test_running_flag_tracks_lifecycle() {
    let mut state = RunState::new("A");
    assert!(!state.running);

    feed(&mut state, "run-started", json!({"run_id": "A"}));
    assert!(state.running);

    feed(&mut state, "run-finished", json!({"run_id": "A"}));
    assert!(!state.running);
}

// ============================================================================
// Scope Isolation
// ============================================================================

#[test]
fn test_events_for_other_scopes_are_discarded() {
    let mut state = RunState::new("A");
    feed(&mut state, "run-started", json!({"run_id": "B"}));
    feed(&mut state, "text-fragment", json!({"run_id": "B", "text": "leak"}));
    feed(
        &mut state,
        "tool-call-started",
        json!({"run_id": "B", "call_id": "1", "name": "bash"}),
    );
    feed(
        &mut state,
        "step-started",
        json!({"run_id": "B", "step_id": "s1", "name": "plan"}),
    );
    feed(&mut state, "run-finished", json!({"run_id": "B"}));

    assert_eq!(state.streaming, "");
    assert!(state.tool_calls.is_empty());
    assert!(state.steps.is_empty());
    assert!(!state.running);
    assert!(!state.needs_refetch);
}

// ============================================================================
// Tool Calls
// ============================================================================

#[test]
fn test_tool_call_completed_transition() {
    let mut state = RunState::new("A");
    feed(
        &mut state,
        "tool-call-started",
        json!({"run_id": "A", "call_id": "c1", "name": "grep", "arguments": r#"{"q": "fn"}"#}),
    );
    feed(
        &mut state,
        "tool-result",
        json!({"run_id": "A", "call_id": "c1", "result": "3 matches"}),
    );

    let call = &state.tool_calls[0];
    assert_eq!(call.name, "grep");
    assert_eq!(call.status, ToolCallStatus::Completed);
    assert_eq!(call.result.as_deref(), Some("3 matches"));
    assert_eq!(call.arguments, Some(json!({"q": "fn"})));
}

#[test]
fn test_tool_call_failed_transition() {
    let mut state = RunState::new("A");
    feed(
        &mut state,
        "tool-call-started",
        json!({"run_id": "A", "call_id": "c1", "name": "bash"}),
    );
    feed(
        &mut state,
        "tool-result",
        json!({"run_id": "A", "call_id": "c1", "result": "", "error": "exit code 1"}),
    );
    assert_eq!(state.tool_calls[0].status, ToolCallStatus::Failed);
}

#[test]
fn test_orphan_tool_result_is_noop() {
    let mut state = RunState::new("A");
    feed(
        &mut state,
        "tool-result",
        json!({"run_id": "A", "call_id": "unseen", "result": "late"}),
    );
    assert_eq!(state.tool_calls.len(), 0);
}

#[test]
fn test_malformed_tool_arguments_do_not_halt_processing() {
    let mut state = RunState::new("A");
    feed(
        &mut state,
        "tool-call-started",
        json!({"run_id": "A", "call_id": "c1", "name": "edit", "arguments": "{{{"}),
    );
    // Call is tracked, arguments just come through unstructured.
    assert_eq!(state.tool_calls.len(), 1);
    assert!(state.tool_calls[0].arguments.is_none());

    // And the stream keeps flowing afterwards.
    feed(&mut state, "text-fragment", json!({"run_id": "A", "text": "still here"}));
    assert_eq!(state.streaming, "still here");
}

// ============================================================================
// Steps
// ============================================================================

#[test]
fn test_step_status_overwritten_in_place() {
    let mut state = RunState::new("A");
    feed(
        &mut state,
        "step-started",
        json!({"run_id": "A", "step_id": "s1", "name": "plan"}),
    );
    feed(
        &mut state,
        "step-started",
        json!({"run_id": "A", "step_id": "s2", "name": "apply"}),
    );
    feed(
        &mut state,
        "step-finished",
        json!({"run_id": "A", "step_id": "s1", "status": "skipped"}),
    );

    assert_eq!(state.steps.len(), 2);
    assert_eq!(state.steps[0].status, StepStatus::Skipped);
    assert_eq!(state.steps[1].status, StepStatus::Running);
}

#[test]
fn test_orphan_step_finish_is_noop() {
    let mut state = RunState::new("A");
    feed(
        &mut state,
        "step-finished",
        json!({"run_id": "A", "step_id": "never", "status": "failed"}),
    );
    assert!(state.steps.is_empty());
}

// ============================================================================
// Bus + Monitor
// ============================================================================

#[tokio::test]
async fn test_monitor_end_to_end() {
    let bus = EventBus::new();
    let mut monitor = RunMonitor::attach(&bus, "A");

    bus.publish(envelope("run-started", json!({"run_id": "A"})));
    bus.publish(envelope("text-fragment", json!({"run_id": "A", "text": "Working"})));
    bus.publish(envelope(
        "tool-call-started",
        json!({"run_id": "A", "call_id": "c1", "name": "grep"}),
    ));
    bus.publish(envelope(
        "tool-result",
        json!({"run_id": "A", "call_id": "c1", "result": "done"}),
    ));
    // Interleaved chatter from an unrelated run
    bus.publish(envelope("text-fragment", json!({"run_id": "B", "text": "noise"})));

    assert_eq!(monitor.drain(), 5);
    assert_eq!(monitor.state().streaming, "Working");
    assert_eq!(monitor.state().tool_calls[0].status, ToolCallStatus::Completed);
    assert!(monitor.state().running);
}

#[tokio::test]
async fn test_monitor_teardown_stops_delivery() {
    let bus = EventBus::new();
    let monitor = RunMonitor::attach(&bus, "A");
    assert_eq!(bus.subscriber_count("run-started"), 1);

    drop(monitor);
    assert_eq!(bus.subscriber_count("run-started"), 0);
    assert_eq!(bus.publish(envelope("run-started", json!({"run_id": "A"}))), 0);
}

#[tokio::test]
async fn test_two_monitors_on_different_runs() {
    let bus = EventBus::new();
    let mut first = RunMonitor::attach(&bus, "A");
    let mut second = RunMonitor::attach(&bus, "B");

    bus.publish(envelope("run-started", json!({"run_id": "A"})));
    bus.publish(envelope("run-started", json!({"run_id": "B"})));
    bus.publish(envelope("text-fragment", json!({"run_id": "B", "text": "only B"})));

    first.drain();
    second.drain();

    assert!(first.state().running);
    assert_eq!(first.state().streaming, "");
    assert_eq!(second.state().streaming, "only B");
}
