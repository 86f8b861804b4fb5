// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Agentdeck - headless core for an AI agent orchestration dashboard.
//!
//! The dashboard itself is a thin rendering layer; everything with actual
//! behavior lives here and is exercised without any UI framework:
//!
//! - [`flow`] - deterministic layered layout for execution-plan graphs,
//!   plus Bezier connector paths for drawing edges between plan boxes
//! - [`run`] - live run telemetry: typed events, a defensive wire decoder,
//!   the state reducer, and the subscription layer that feeds it
//! - [`config`] - layout metrics and monitor options from JSON config files
//! - [`error`] - error types and result aliases
//! - [`telemetry`] - tracing initialization
//!
//! # Example
//!
//! ```rust,ignore
//! use agentdeck::flow::{layout, FlowNode, LayoutMetrics};
//! use agentdeck::run::{EventBus, RunMonitor};
//!
//! let nodes = vec![
//!     FlowNode::new("build"),
//!     FlowNode::with_deps("deploy", ["build"]),
//! ];
//! let plan = layout(&nodes, &LayoutMetrics::default())?;
//!
//! let bus = EventBus::new();
//! let monitor = RunMonitor::attach(&bus, "run-42");
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod run;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use error::{ConfigError, GraphError, Result};
pub use flow::{layout, FlowEdge, FlowNode, LayoutMetrics, PlanLayout};
pub use run::{EventBus, EventEnvelope, RunEvent, RunMonitor, RunState};

/// Agentdeck version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
