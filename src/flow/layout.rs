// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Layered layout for plan graphs.
//!
//! Columns are assigned by longest dependency path (a node sits one column
//! to the right of its deepest dependency), rows by input order within each
//! column. The traversal is an explicit depth-first walk with a three-color
//! mark per node, so dependency cycles surface as a reported error instead
//! of unbounded recursion, and every node's column is computed exactly once.

use std::collections::HashMap;

use tracing::debug;

use crate::error::GraphError;

use super::types::{Canvas, FlowNode, LayoutMetrics, NodePosition, PlanLayout};

/// Traversal mark for the column computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Not yet visited.
    Unvisited,
    /// On the current traversal path.
    InProgress,
    /// Column computed.
    Done,
}

/// Compute the layered layout for a plan graph.
///
/// Column invariant: every node's column is strictly greater than the column
/// of each of its dependencies; nodes without dependencies land in column 0.
/// Rows are zero-based and contiguous within a column, in input order, which
/// makes the output fully deterministic for a fixed input order.
///
/// # Errors
///
/// - [`GraphError::DuplicateNode`] if two nodes share an id.
/// - [`GraphError::UnresolvedDependency`] if a dependency id resolves to no
///   node in the input.
/// - [`GraphError::CyclicDependency`] if the dependency relation contains a
///   cycle; the error carries the offending path.
pub fn layout(nodes: &[FlowNode], metrics: &LayoutMetrics) -> Result<PlanLayout, GraphError> {
    if nodes.is_empty() {
        return Ok(PlanLayout {
            nodes: Vec::new(),
            canvas: Canvas {
                width: metrics.min_canvas_width,
                height: metrics.min_canvas_height,
            },
        });
    }

    // Index nodes by id, rejecting duplicates.
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.id.as_str(), i).is_some() {
            return Err(GraphError::DuplicateNode(node.id.clone()));
        }
    }

    // Fail fast on dangling dependency references. Edges stay lenient
    // (see `edge_paths`), dependencies do not.
    for node in nodes {
        for dep in &node.depends_on {
            if !index.contains_key(dep.as_str()) {
                return Err(GraphError::UnresolvedDependency {
                    node: node.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
    }

    let columns = assign_columns(nodes, &index)?;

    // Rows: input order within each column, zero-based and contiguous.
    let mut next_row: HashMap<usize, usize> = HashMap::new();
    let mut positions = Vec::with_capacity(nodes.len());
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;

    for (i, node) in nodes.iter().enumerate() {
        let column = columns[i];
        let row_slot = next_row.entry(column).or_insert(0);
        let row = *row_slot;
        *row_slot += 1;

        let x = metrics.padding + column as f64 * (metrics.node_width + metrics.margin_x);
        let y = metrics.padding + row as f64 * (metrics.node_height + metrics.margin_y);
        max_x = max_x.max(x + metrics.node_width);
        max_y = max_y.max(y + metrics.node_height);

        positions.push(NodePosition {
            id: node.id.clone(),
            column,
            row,
            x,
            y,
        });
    }

    debug!(
        nodes = nodes.len(),
        columns = next_row.len(),
        "plan layout computed"
    );

    Ok(PlanLayout {
        nodes: positions,
        canvas: Canvas {
            width: metrics.padding + max_x,
            height: metrics.padding + max_y,
        },
    })
}

/// Assign a column to every node: `1 + max(column of deps)`, 0 for roots.
///
/// Explicit stack instead of recursion so deep chains cannot overflow and a
/// cycle can be reconstructed from the in-progress path.
fn assign_columns(
    nodes: &[FlowNode],
    index: &HashMap<&str, usize>,
) -> Result<Vec<usize>, GraphError> {
    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut columns = vec![0usize; nodes.len()];
    // (node index, next dependency to visit)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..nodes.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        marks[start] = Mark::InProgress;
        stack.push((start, 0));

        while let Some(&(current, dep_idx)) = stack.last() {
            let deps = &nodes[current].depends_on;
            if dep_idx < deps.len() {
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                // Resolution was validated up front.
                let dep = index[deps[dep_idx].as_str()];
                match marks[dep] {
                    Mark::Unvisited => {
                        marks[dep] = Mark::InProgress;
                        stack.push((dep, 0));
                    }
                    Mark::InProgress => {
                        return Err(GraphError::CyclicDependency {
                            cycle: cycle_path(nodes, &stack, dep),
                        });
                    }
                    Mark::Done => {}
                }
            } else {
                // All dependencies resolved; this node's column is final.
                let column = deps
                    .iter()
                    .map(|d| columns[index[d.as_str()]] + 1)
                    .max()
                    .unwrap_or(0);
                columns[current] = column;
                marks[current] = Mark::Done;
                stack.pop();
            }
        }
    }

    Ok(columns)
}

/// Extract the cycle from the traversal stack, closing it on `dep`.
fn cycle_path(nodes: &[FlowNode], stack: &[(usize, usize)], dep: usize) -> Vec<String> {
    let start = stack
        .iter()
        .position(|&(i, _)| i == dep)
        .unwrap_or(0);
    let mut cycle: Vec<String> = stack[start..]
        .iter()
        .map(|&(i, _)| nodes[i].id.clone())
        .collect();
    cycle.push(nodes[dep].id.clone());
    cycle
}
