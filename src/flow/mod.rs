// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Plan-flow graph layout.
//!
//! Turns an execution plan (nodes with dependency references) into a
//! deterministic layered 2D layout: columns by longest dependency path,
//! rows by input order within a column, pixel coordinates derived from
//! configurable metrics. A separate pass derives Bezier connector paths
//! for the edges the dashboard draws between plan boxes.
//!
//! The layout is a pure function of its input: no caching, no incremental
//! update. Callers recompute it whenever the plan changes.

mod layout;
mod paths;
mod types;

pub use layout::layout;
pub use paths::edge_paths;
pub use types::{
    Canvas, EdgePath, FlowEdge, FlowNode, LayoutMetrics, NodePosition, PlanLayout,
};
