// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge routing: sibling ranking, collision-avoiding lane resolution,
//! orthogonal path synthesis, and cardinality markers.
//!
//! Routing is a pure function of the diagram snapshot it is handed. The TUI
//! re-invokes it for every visible edge on every frame; nothing here caches
//! across calls or mutates its inputs.

pub mod geometry;
pub mod lane;
pub mod markers;
pub mod path;
pub mod rank;

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::model::{EdgeId, NodeId, Point, Relationship, TableNode};

pub use geometry::{anchor_column, anchor_side, AnchorSide, Rect};
pub use markers::{markers_for, Marker};
pub use path::StepPath;
pub use rank::sibling_rank;

/// Lane distance for a rank-0 edge.
pub const BASE_OFFSET: f64 = 50.0;
/// Extra lane distance per sibling rank.
pub const RANK_STEP: f64 = 20.0;
/// Hard cap on the lane-widening loop.
pub const MAX_ATTEMPTS: usize = 10;
/// Margin applied to both obstacle boxes and the edge's vertical span.
pub const CLEARANCE_MARGIN: f64 = 20.0;
/// How far the lane moves outward after a collision.
pub const OFFSET_BUMP: f64 = 30.0;
/// Corner rounding radius handed to the renderer.
pub const CORNER_RADIUS: f64 = 12.0;
/// Vertical offset from a table's top edge to its first column anchor.
pub const ANCHOR_HEADER_OFFSET: f64 = 40.0;
/// Vertical distance between consecutive column anchors.
pub const ANCHOR_ROW_STEP: f64 = 28.0;

/// Everything the renderer needs to draw one edge. Recomputed per edge per
/// frame; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingResult {
    offset: f64,
    path: StepPath,
    label_point: Point,
}

impl RoutingResult {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn path(&self) -> &StepPath {
        &self.path
    }

    pub fn label_point(&self) -> Point {
        self.label_point
    }
}

/// The canvas point an anchor handle resolves to on a table's face.
///
/// A handle carrying a column index anchors beside that column's row; a
/// handle without one anchors at the face's vertical center.
pub fn anchor_point(table: &TableNode, side: AnchorSide, column: Option<usize>) -> Point {
    let position = table.position();
    let size = table.size_or_default();

    let x = match side {
        AnchorSide::Right => position.x + size.width,
        AnchorSide::Left => position.x,
    };
    let y = match column {
        Some(column) => position.y + ANCHOR_HEADER_OFFSET + column as f64 * ANCHOR_ROW_STEP,
        None => position.y + size.height / 2.0,
    };

    Point::new(x, y)
}

/// Routes one edge against a read-only diagram snapshot.
///
/// Missing endpoint nodes degrade to the canvas origin instead of failing;
/// mid-cascade frames may briefly route such edges and the result merely
/// looks wrong until the store catches up.
pub fn route_edge(
    edge_id: &EdgeId,
    edge: &Relationship,
    nodes: &BTreeMap<NodeId, TableNode>,
    edges: &BTreeMap<EdgeId, Relationship>,
) -> RoutingResult {
    let source_side = anchor_side(edge.source_anchor());
    let target_side = anchor_side(edge.target_anchor());

    let source_point = nodes
        .get(edge.source_node_id())
        .map(|table| anchor_point(table, source_side, anchor_column(edge.source_anchor())))
        .unwrap_or_default();
    let target_point = nodes
        .get(edge.target_node_id())
        .map(|table| anchor_point(table, target_side, anchor_column(edge.target_anchor())))
        .unwrap_or_default();

    let rank = sibling_rank(edge_id, edge, edges, nodes);

    // An edge may legitimately hug its own endpoints.
    let obstacles: SmallVec<[Rect; 16]> = nodes
        .iter()
        .filter(|(node_id, _)| {
            *node_id != edge.source_node_id() && *node_id != edge.target_node_id()
        })
        .map(|(_, table)| Rect::of_table(table))
        .collect();

    let offset = lane::resolve_lane_offset(source_point, target_point, source_side, rank, &obstacles);
    let path = path::synthesize(source_point, target_point, source_side, offset, CORNER_RADIUS);
    let label_point = path.midpoint();

    RoutingResult {
        offset,
        path,
        label_point,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        anchor_point, lane, route_edge, AnchorSide, BASE_OFFSET, CLEARANCE_MARGIN, MAX_ATTEMPTS,
        OFFSET_BUMP,
    };
    use crate::model::fixtures;
    use crate::model::{EdgeId, Point, TableNode};

    fn eid(value: &str) -> EdgeId {
        EdgeId::new(value).expect("edge id")
    }

    #[test]
    fn routing_is_deterministic_for_a_fixed_diagram() {
        let diagram = fixtures::diagram_sibling_fan();

        for (edge_id, edge) in diagram.edges() {
            let first = route_edge(edge_id, edge, diagram.nodes(), diagram.edges());
            let second = route_edge(edge_id, edge, diagram.nodes(), diagram.edges());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn sibling_fan_offsets_follow_rank_order() {
        let diagram = fixtures::diagram_sibling_fan();

        let offset_of = |id: &str| {
            let edge_id = eid(id);
            let edge = diagram.edges().get(&edge_id).expect("edge");
            route_edge(&edge_id, edge, diagram.nodes(), diagram.edges()).offset()
        };

        // Targets at y = 100 (e:b), 200 (e:c), 300 (e:a).
        assert!(offset_of("e:b") < offset_of("e:c"));
        assert!(offset_of("e:c") < offset_of("e:a"));
    }

    #[test]
    fn returned_offset_is_never_below_the_base() {
        let diagram = fixtures::diagram_lane_blocker();

        for (edge_id, edge) in diagram.edges() {
            let result = route_edge(edge_id, edge, diagram.nodes(), diagram.edges());
            let rank = super::sibling_rank(edge_id, edge, diagram.edges(), diagram.nodes());
            assert!(result.offset() >= lane::base_offset(rank));
            assert!(result.offset() <= lane::base_offset(rank) + MAX_ATTEMPTS as f64 * OFFSET_BUMP);
        }
    }

    #[test]
    fn blocked_lane_routes_past_the_obstructing_table() {
        // a(0,0) -> b(0,300) with c(250,150) parked in the lane.
        let diagram = fixtures::diagram_lane_blocker();
        let edge_id = eid("e:ab");
        let edge = diagram.edges().get(&edge_id).expect("edge");

        let result = route_edge(&edge_id, edge, diagram.nodes(), diagram.edges());

        let lane_x = AnchorSide::Right.lane_x(200.0, result.offset());
        assert!(lane_x > 250.0 + 200.0 + CLEARANCE_MARGIN);
    }

    #[test]
    fn endpoint_tables_never_count_as_obstacles() {
        // Source and target overlap each other completely; the base lane
        // crosses both, and must still be accepted.
        let mut diagram = crate::model::Diagram::new("overlap");
        let a = crate::model::NodeId::new("n:a").expect("node id");
        let b = crate::model::NodeId::new("n:b").expect("node id");
        diagram
            .nodes_mut()
            .insert(a.clone(), TableNode::new("a", Point::new(0.0, 0.0)));
        diagram
            .nodes_mut()
            .insert(b.clone(), TableNode::new("b", Point::new(10.0, 10.0)));
        diagram
            .edges_mut()
            .insert(eid("e:ab"), crate::model::Relationship::new(a, b));

        let edge_id = eid("e:ab");
        let edge = diagram.edges().get(&edge_id).expect("edge");
        let result = route_edge(&edge_id, edge, diagram.nodes(), diagram.edges());
        assert_eq!(result.offset(), BASE_OFFSET);
    }

    #[test]
    fn missing_endpoint_degrades_to_the_origin() {
        let mut diagram = crate::model::Diagram::new("dangling");
        let a = crate::model::NodeId::new("n:a").expect("node id");
        diagram
            .nodes_mut()
            .insert(a.clone(), TableNode::new("a", Point::new(0.0, 0.0)));
        diagram.edges_mut().insert(
            eid("e:gone"),
            crate::model::Relationship::new(a, crate::model::NodeId::new("n:gone").expect("id")),
        );

        let edge_id = eid("e:gone");
        let edge = diagram.edges().get(&edge_id).expect("edge");
        let result = route_edge(&edge_id, edge, diagram.nodes(), diagram.edges());
        assert_eq!(result.path().points().last(), Some(&Point::new(0.0, 0.0)));
    }

    #[test]
    fn anchor_points_land_on_the_requested_face() {
        let table = TableNode::new("users", Point::new(100.0, 50.0));

        let right = anchor_point(&table, AnchorSide::Right, Some(1));
        assert_eq!(right, Point::new(300.0, 50.0 + 40.0 + 28.0));

        let left = anchor_point(&table, AnchorSide::Left, None);
        assert_eq!(left, Point::new(100.0, 50.0 + 75.0));
    }

    #[test]
    fn label_point_sits_on_the_path() {
        let diagram = fixtures::diagram_sibling_fan();
        for (edge_id, edge) in diagram.edges() {
            let result = route_edge(edge_id, edge, diagram.nodes(), diagram.edges());
            let label = result.label_point();
            let on_path = result.path().points().windows(2).any(|pair| {
                let (a, b) = (pair[0], pair[1]);
                let min_x = a.x.min(b.x);
                let max_x = a.x.max(b.x);
                let min_y = a.y.min(b.y);
                let max_y = a.y.max(b.y);
                label.x >= min_x && label.x <= max_x && label.y >= min_y && label.y <= max_y
            });
            assert!(on_path, "label point off-path for edge {edge_id}");
        }
    }
}
