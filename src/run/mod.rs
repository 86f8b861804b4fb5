// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Live run telemetry.
//!
//! The dashboard watches one run (or conversation) at a time and folds its
//! server-pushed events into a handful of UI-observable slices: the streaming
//! text buffer, the tool-call list, the step list, and a running flag.
//!
//! The pieces compose bottom-up:
//!
//! - `types` - the closed [`RunEvent`] sum type plus tool-call/step records
//! - `decode` - defensive decoding of loose wire payloads into [`RunEvent`]s
//! - `reducer` - [`RunState`] and the pure event fold
//! - `monitor` - the in-process [`EventBus`] and the [`RunMonitor`] that
//!   wires a subscription to a reducer, with teardown on drop

mod decode;
mod monitor;
mod reducer;
mod types;

pub use decode::{decode, EventEnvelope};
pub use monitor::{EventBus, RunMonitor, Subscription};
pub use reducer::{reduce, RunState};
pub use types::{
    RunEvent, StepRecord, StepStatus, ToolCallRecord, ToolCallStatus, RUN_EVENT_TYPES,
};
