// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use naiad::model::{Column, Diagram, EdgeId, NodeId, Point, TableNode};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("naiad_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn nid(value: String) -> NodeId {
    NodeId::new(value).expect("valid node id")
}

fn eid(value: String) -> EdgeId {
    EdgeId::new(value).expect("valid edge id")
}

fn table(name: &str, x: f64, y: f64, columns: usize) -> TableNode {
    let mut cols = vec![Column::primary("id", "bigint")];
    for idx in 1..columns {
        cols.push(Column::new(format!("field_{idx}"), "varchar"));
    }
    TableNode::new_with(name, Point::new(x, y), cols)
}

pub mod diagram {
    use super::{eid, nid, table};
    use naiad::model::{Diagram, RelationKind, Relationship};

    #[derive(Debug, Clone, Copy)]
    pub enum Case {
        /// One hub table fanned out to eight satellites on the same side, so
        /// every edge competes for a sibling rank.
        StarSmall,
        /// A 6x5 grid of tables chained left to right with a handful of long
        /// cross links that must widen around intermediate tables.
        GridMedium,
        /// A source/target pair with a column of blockers between them,
        /// forcing the lane search through several widening attempts.
        LaneBlocked,
    }

    impl Case {
        pub fn id(&self) -> &'static str {
            match self {
                Case::StarSmall => "star_small",
                Case::GridMedium => "grid_medium",
                Case::LaneBlocked => "lane_blocked",
            }
        }
    }

    pub fn fixture(case: Case) -> Diagram {
        match case {
            Case::StarSmall => star_small(),
            Case::GridMedium => grid_medium(),
            Case::LaneBlocked => lane_blocked(),
        }
    }

    fn star_small() -> Diagram {
        let mut diagram = Diagram::new("star_small");
        diagram
            .nodes_mut()
            .insert(nid("n:hub".to_owned()), table("hub", 0.0, 700.0, 4));
        for idx in 0..8u32 {
            let node_id = nid(format!("n:sat{idx}"));
            diagram.nodes_mut().insert(
                node_id.clone(),
                table(&format!("sat{idx}"), 600.0, f64::from(idx) * 200.0, 3),
            );
            diagram.edges_mut().insert(
                eid(format!("e:spoke{idx}")),
                Relationship::new_with(
                    nid("n:hub".to_owned()),
                    node_id,
                    Some("right:0".to_owned()),
                    Some("left:0".to_owned()),
                    RelationKind::OneToMany,
                ),
            );
        }
        diagram
    }

    fn grid_medium() -> Diagram {
        const COLS: u32 = 6;
        const ROWS: u32 = 5;

        let mut diagram = Diagram::new("grid_medium");
        for row in 0..ROWS {
            for col in 0..COLS {
                let idx = row * COLS + col;
                diagram.nodes_mut().insert(
                    nid(format!("n:g{idx:02}")),
                    table(
                        &format!("grid_{idx:02}"),
                        f64::from(col) * 320.0,
                        f64::from(row) * 240.0,
                        3,
                    ),
                );
            }
        }
        for idx in 0..(ROWS * COLS - 1) {
            diagram.edges_mut().insert(
                eid(format!("e:chain{idx:02}")),
                Relationship::new_with(
                    nid(format!("n:g{idx:02}")),
                    nid(format!("n:g{:02}", idx + 1)),
                    Some("right:0".to_owned()),
                    Some("left:0".to_owned()),
                    RelationKind::OneToMany,
                ),
            );
        }
        // Long links that cross several grid columns.
        for (idx, (from, to)) in [(0u32, 17u32), (6, 23), (12, 29), (3, 20)].iter().enumerate() {
            diagram.edges_mut().insert(
                eid(format!("e:cross{idx}")),
                Relationship::new_with(
                    nid(format!("n:g{from:02}")),
                    nid(format!("n:g{to:02}")),
                    Some("right:1".to_owned()),
                    Some("left:1".to_owned()),
                    RelationKind::ManyToMany,
                ),
            );
        }
        diagram
    }

    fn lane_blocked() -> Diagram {
        let mut diagram = Diagram::new("lane_blocked");
        diagram
            .nodes_mut()
            .insert(nid("n:src".to_owned()), table("source", 0.0, 0.0, 3));
        diagram
            .nodes_mut()
            .insert(nid("n:dst".to_owned()), table("target", 0.0, 900.0, 3));
        for idx in 0..4u32 {
            diagram.nodes_mut().insert(
                nid(format!("n:block{idx}")),
                table(
                    &format!("blocker{idx}"),
                    240.0 + f64::from(idx) * 60.0,
                    400.0,
                    3,
                ),
            );
        }
        diagram.edges_mut().insert(
            eid("e:long".to_owned()),
            Relationship::new_with(
                nid("n:src".to_owned()),
                nid("n:dst".to_owned()),
                Some("right:0".to_owned()),
                Some("right:0".to_owned()),
                RelationKind::OneToOne,
            ),
        );
        diagram
    }
}

pub fn checksum_routes(diagram: &Diagram) -> u64 {
    let mut acc = 0u64;
    for (edge_id, edge) in diagram.edges() {
        let route = naiad::layout::route_edge(edge_id, edge, diagram.nodes(), diagram.edges());
        acc = acc.wrapping_mul(131).wrapping_add(route.path().points().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(route.offset() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(route.path().length() as u64);
    }
    acc
}
