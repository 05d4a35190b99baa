// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, NodeId};
use super::relationship::Relationship;
use super::table::TableNode;

/// The live diagram: tables and relationships keyed by id, plus a revision
/// counter bumped by every applied op batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagram {
    name: String,
    #[serde(default)]
    nodes: BTreeMap<NodeId, TableNode>,
    #[serde(default)]
    edges: BTreeMap<EdgeId, Relationship>,
    #[serde(default, skip_serializing_if = "is_zero")]
    rev: u64,
}

fn is_zero(rev: &u64) -> bool {
    *rev == 0
}

impl Diagram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            rev: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, TableNode> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<NodeId, TableNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, Relationship> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut BTreeMap<EdgeId, Relationship> {
        &mut self.edges
    }

    /// Ids of every edge with `node_id` as either endpoint, in id order.
    pub fn edges_touching(&self, node_id: &NodeId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|(_, edge)| edge.touches(node_id))
            .map(|(edge_id, _)| edge_id.clone())
            .collect()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::Diagram;
    use crate::model::fixtures;
    use crate::model::{EdgeId, NodeId};

    #[test]
    fn edges_touching_reports_both_endpoint_roles() {
        let diagram = fixtures::diagram_sibling_fan();
        let source = NodeId::new("n:hub").expect("node id");

        let touching = diagram.edges_touching(&source);
        assert_eq!(touching.len(), diagram.edges().len());

        let absent = NodeId::new("n:elsewhere").expect("node id");
        assert!(diagram.edges_touching(&absent).is_empty());
    }

    #[test]
    fn rev_survives_json_round_trip_only_when_nonzero() {
        let mut diagram = Diagram::new("demo");
        let json = serde_json::to_value(&diagram).expect("serialize");
        assert!(json.get("rev").is_none());

        diagram.bump_rev();
        let json = serde_json::to_string(&diagram).expect("serialize");
        let back: Diagram = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.rev(), 1);
    }

    #[test]
    fn edges_touching_returns_ids_in_id_order() {
        let diagram = fixtures::diagram_sibling_fan();
        let hub = NodeId::new("n:hub").expect("node id");

        let touching = diagram.edges_touching(&hub);
        let mut sorted = touching.clone();
        sorted.sort();
        assert_eq!(touching, sorted);
        assert!(touching.contains(&EdgeId::new("e:a").expect("edge id")));
    }
}
