// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagram::Diagram;
#[cfg(test)]
use super::ids::EdgeId;
use super::ids::NodeId;
#[cfg(test)]
use super::relationship::Relationship;
use super::table::{Column, Point, TableNode};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

#[cfg(test)]
fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

/// The diagram a fresh session starts from: a single `users` table.
pub(crate) fn starter_diagram() -> Diagram {
    let mut diagram = Diagram::new("untitled");
    diagram.nodes_mut().insert(
        nid("n:users"),
        TableNode::new_with(
            "users",
            Point::new(250.0, 50.0),
            vec![
                Column::primary("id", "bigint"),
                Column::new("email", "varchar"),
            ],
        ),
    );
    diagram
}

/// One hub table with three edges fanning out of its right side to targets
/// at y = 300, 100, and 200. Insertion order deliberately disagrees with the
/// targets' vertical order.
#[cfg(test)]
pub(crate) fn diagram_sibling_fan() -> Diagram {
    let mut diagram = Diagram::new("sibling-fan");

    let hub = nid("n:hub");
    let low = nid("n:low");
    let high = nid("n:high");
    let mid = nid("n:mid");

    diagram
        .nodes_mut()
        .insert(hub.clone(), TableNode::new("hub", Point::new(0.0, 150.0)));
    diagram
        .nodes_mut()
        .insert(low.clone(), TableNode::new("low", Point::new(500.0, 300.0)));
    diagram.nodes_mut().insert(
        high.clone(),
        TableNode::new("high", Point::new(500.0, 100.0)),
    );
    diagram
        .nodes_mut()
        .insert(mid.clone(), TableNode::new("mid", Point::new(500.0, 200.0)));

    diagram
        .edges_mut()
        .insert(eid("e:a"), Relationship::new(hub.clone(), low));
    diagram
        .edges_mut()
        .insert(eid("e:b"), Relationship::new(hub.clone(), high));
    diagram
        .edges_mut()
        .insert(eid("e:c"), Relationship::new(hub, mid));

    diagram
}

/// A source above a target with a third table parked in the routing lane
/// between them. The lane at the base offset clips the blocker, so the
/// router must widen.
#[cfg(test)]
pub(crate) fn diagram_lane_blocker() -> Diagram {
    let mut diagram = Diagram::new("lane-blocker");

    let a = nid("n:a");
    let b = nid("n:b");
    let c = nid("n:c");

    diagram
        .nodes_mut()
        .insert(a.clone(), TableNode::new("a", Point::new(0.0, 0.0)));
    diagram
        .nodes_mut()
        .insert(b.clone(), TableNode::new("b", Point::new(0.0, 300.0)));
    diagram
        .nodes_mut()
        .insert(c, TableNode::new("c", Point::new(250.0, 150.0)));

    diagram.edges_mut().insert(eid("e:ab"), Relationship::new(a, b));

    diagram
}
