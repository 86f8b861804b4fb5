// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Connector path derivation for rendered plan edges.

use tracing::debug;

use super::types::{EdgePath, FlowEdge, LayoutMetrics, PlanLayout};

/// Derive renderable Bezier paths for the given edges.
///
/// Each path runs from the right-center of the source box to the left-center
/// of the target box, with both control points at the horizontal midpoint
/// carrying their endpoint's vertical coordinate. Edges crossing several
/// columns or rows come out as a smooth S-curve.
///
/// Edges whose endpoints do not both resolve in the layout are dropped
/// silently; the plan renderer tolerates stale edge lists by design.
pub fn edge_paths(edges: &[FlowEdge], layout: &PlanLayout, metrics: &LayoutMetrics) -> Vec<EdgePath> {
    let mut paths = Vec::with_capacity(edges.len());

    for edge in edges {
        let (Some(from), Some(to)) = (layout.position(&edge.from), layout.position(&edge.to))
        else {
            debug!(from = %edge.from, to = %edge.to, "dropping edge with unresolved endpoint");
            continue;
        };

        let start = (from.x + metrics.node_width, from.y + metrics.node_height / 2.0);
        let end = (to.x, to.y + metrics.node_height / 2.0);
        let mid_x = (start.0 + end.0) / 2.0;

        paths.push(EdgePath {
            from: edge.from.clone(),
            to: edge.to.clone(),
            start,
            end,
            svg: format!(
                "M {} {} C {} {}, {} {}, {} {}",
                start.0, start.1, mid_x, start.1, mid_x, end.1, end.0, end.1
            ),
        });
    }

    paths
}
