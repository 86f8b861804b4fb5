// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Types for plan-flow graphs and their computed layouts.

use serde::{Deserialize, Serialize};

/// A single node in an execution plan graph.
///
/// Only `id` and `depends_on` participate in layout; `label` and `kind`
/// are display metadata carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    /// Unique identifier within the graph.
    pub id: String,

    /// Ids of nodes this node depends on. All must resolve within the graph.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Human-readable label for the node box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Display category (e.g. "task", "gate", "review").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl FlowNode {
    /// Create a node with no dependencies.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            depends_on: Vec::new(),
            label: None,
            kind: None,
        }
    }

    /// Create a node that depends on the given node ids.
    pub fn with_deps<I, S>(id: impl Into<String>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            depends_on: deps.into_iter().map(Into::into).collect(),
            label: None,
            kind: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A drawable connector between two nodes.
///
/// Edges are supplied separately from `depends_on` and may reference nodes
/// absent from the graph; such edges are dropped at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
}

impl FlowEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Rendering constants that drive coordinate derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutMetrics {
    /// Width of a node box in pixels.
    pub node_width: f64,
    /// Height of a node box in pixels.
    pub node_height: f64,
    /// Horizontal gap between columns.
    pub margin_x: f64,
    /// Vertical gap between rows.
    pub margin_y: f64,
    /// Padding around the whole canvas.
    pub padding: f64,
    /// Canvas width used when the graph is empty.
    pub min_canvas_width: f64,
    /// Canvas height used when the graph is empty.
    pub min_canvas_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 56.0,
            margin_x: 40.0,
            margin_y: 32.0,
            padding: 24.0,
            min_canvas_width: 240.0,
            min_canvas_height: 120.0,
        }
    }
}

/// Computed placement for a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    /// Horizontal rank: longest dependency path from a root.
    pub column: usize,
    /// Vertical slot within the column, in input order.
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

/// Overall canvas size needed to contain the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// Result of laying out a plan graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLayout {
    pub nodes: Vec<NodePosition>,
    pub canvas: Canvas,
}

impl PlanLayout {
    /// Look up the position of a node by id.
    pub fn position(&self, id: &str) -> Option<&NodePosition> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// A renderable connector path between two laid-out nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePath {
    pub from: String,
    pub to: String,
    /// Right-center of the source box.
    pub start: (f64, f64),
    /// Left-center of the target box.
    pub end: (f64, f64),
    /// SVG path data for a cubic Bezier S-curve between the endpoints.
    pub svg: String,
}
