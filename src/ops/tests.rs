// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{apply_ops, ApplyError, Op};
use crate::model::fixtures;
use crate::model::{Column, DiagramObject, EdgeId, NodeId, Point, RelationKind, Size};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

#[test]
fn stale_base_rev_is_rejected() {
    let mut diagram = fixtures::diagram_sibling_fan();
    diagram.set_rev(4);

    let result = apply_ops(
        &mut diagram,
        3,
        &[Op::RenameTable {
            node_id: nid("n:hub"),
            name: "renamed".into(),
        }],
    );

    assert_eq!(
        result,
        Err(ApplyError::Conflict {
            base_rev: 3,
            current_rev: 4,
        })
    );
    assert_eq!(diagram.rev(), 4);
}

#[test]
fn empty_batch_does_not_bump_the_rev() {
    let mut diagram = fixtures::diagram_sibling_fan();
    let result = apply_ops(&mut diagram, 0, &[]).expect("apply");
    assert_eq!(result.new_rev, 0);
    assert_eq!(result.applied, 0);
    assert_eq!(diagram.rev(), 0);
}

#[test]
fn add_table_and_connect_report_added_objects() {
    let mut diagram = fixtures::starter_diagram();

    let result = apply_ops(
        &mut diagram,
        0,
        &[
            Op::AddTable {
                node_id: nid("n:orders"),
                name: "orders".into(),
                position: Point::new(600.0, 200.0),
            },
            Op::Connect {
                edge_id: eid("e:1"),
                source_node_id: nid("n:users"),
                target_node_id: nid("n:orders"),
                source_anchor: Some("right:0".into()),
                target_anchor: Some("left:0".into()),
            },
        ],
    )
    .expect("apply");

    assert_eq!(result.new_rev, 1);
    assert_eq!(result.applied, 2);
    assert_eq!(
        result.delta.added,
        vec![
            DiagramObject::Table(nid("n:orders")),
            DiagramObject::Edge(eid("e:1")),
        ]
    );

    let edge = diagram.edges().get(&eid("e:1")).expect("edge");
    assert_eq!(edge.kind(), RelationKind::OneToOne);
    let orders = diagram.nodes().get(&nid("n:orders")).expect("table");
    assert_eq!(orders.columns()[0].name, "id");
}

#[test]
fn removing_a_table_cascades_to_its_edges() {
    let mut diagram = fixtures::diagram_sibling_fan();

    let result = apply_ops(
        &mut diagram,
        0,
        &[Op::RemoveTable {
            node_id: nid("n:hub"),
        }],
    )
    .expect("apply");

    assert!(diagram.edges().is_empty());
    assert!(!diagram.nodes().contains_key(&nid("n:hub")));
    assert_eq!(
        result.delta.removed,
        vec![
            DiagramObject::Table(nid("n:hub")),
            DiagramObject::Edge(eid("e:a")),
            DiagramObject::Edge(eid("e:b")),
            DiagramObject::Edge(eid("e:c")),
        ]
    );
}

#[test]
fn failing_batch_leaves_the_diagram_untouched() {
    let mut diagram = fixtures::starter_diagram();
    let before = diagram.clone();

    let result = apply_ops(
        &mut diagram,
        0,
        &[
            Op::AddTable {
                node_id: nid("n:orders"),
                name: "orders".into(),
                position: Point::default(),
            },
            Op::RemoveEdge {
                edge_id: eid("e:missing"),
            },
        ],
    );

    assert_eq!(
        result,
        Err(ApplyError::EdgeNotFound {
            edge_id: eid("e:missing"),
        })
    );
    assert_eq!(diagram, before);
}

#[test]
fn connect_requires_live_endpoints() {
    let mut diagram = fixtures::starter_diagram();

    let result = apply_ops(
        &mut diagram,
        0,
        &[Op::Connect {
            edge_id: eid("e:1"),
            source_node_id: nid("n:users"),
            target_node_id: nid("n:ghost"),
            source_anchor: None,
            target_anchor: None,
        }],
    );

    assert_eq!(
        result,
        Err(ApplyError::MissingEndpoint {
            edge_id: eid("e:1"),
            node_id: nid("n:ghost"),
        })
    );
}

#[test]
fn column_edits_round_trip_through_ops() {
    let mut diagram = fixtures::starter_diagram();
    let users = nid("n:users");

    apply_ops(
        &mut diagram,
        0,
        &[
            Op::AddColumn {
                node_id: users.clone(),
                column: Column::new("created_at", "timestamp"),
            },
            Op::UpdateColumn {
                node_id: users.clone(),
                index: 1,
                column: Column::new("email_address", "text"),
            },
            Op::RemoveColumn {
                node_id: users.clone(),
                index: 2,
            },
        ],
    )
    .expect("apply");

    let table = diagram.nodes().get(&users).expect("table");
    let names = table
        .columns()
        .iter()
        .map(|column| column.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["id", "email_address"]);
}

#[test]
fn column_index_out_of_range_is_rejected() {
    let mut diagram = fixtures::starter_diagram();

    let result = apply_ops(
        &mut diagram,
        0,
        &[Op::RemoveColumn {
            node_id: nid("n:users"),
            index: 9,
        }],
    );

    assert_eq!(
        result,
        Err(ApplyError::ColumnOutOfRange {
            node_id: nid("n:users"),
            index: 9,
            len: 2,
        })
    );
}

#[test]
fn set_relation_kind_records_an_update() {
    let mut diagram = fixtures::diagram_sibling_fan();

    let result = apply_ops(
        &mut diagram,
        0,
        &[Op::SetRelationKind {
            edge_id: eid("e:a"),
            kind: RelationKind::OneToMany,
        }],
    )
    .expect("apply");

    assert_eq!(result.delta.updated, vec![DiagramObject::Edge(eid("e:a"))]);
    let edge = diagram.edges().get(&eid("e:a")).expect("edge");
    assert_eq!(edge.kind(), RelationKind::OneToMany);
}

#[test]
fn resize_and_move_update_the_table() {
    let mut diagram = fixtures::starter_diagram();
    let users = nid("n:users");

    apply_ops(
        &mut diagram,
        0,
        &[
            Op::MoveTable {
                node_id: users.clone(),
                position: Point::new(10.0, 20.0),
            },
            Op::SetTableSize {
                node_id: users.clone(),
                size: Some(Size::new(240.0, 180.0)),
            },
        ],
    )
    .expect("apply");

    let table = diagram.nodes().get(&users).expect("table");
    assert_eq!(table.position(), Point::new(10.0, 20.0));
    assert_eq!(table.size(), Some(Size::new(240.0, 180.0)));
}
