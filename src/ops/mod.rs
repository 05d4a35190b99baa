// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for diagrams.
//!
//! Operations are applied with optimistic concurrency (revision checks) and
//! produce a minimal delta that the UI can use to refresh derived state.
//! A batch is transactional: either every op applies or the diagram is left
//! untouched.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::model::{
    Column, Diagram, DiagramObject, EdgeId, NodeId, Point, RelationKind, Relationship, Size,
    TableNode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddTable {
        node_id: NodeId,
        name: String,
        position: Point,
    },
    RenameTable {
        node_id: NodeId,
        name: String,
    },
    MoveTable {
        node_id: NodeId,
        position: Point,
    },
    SetTableSize {
        node_id: NodeId,
        size: Option<Size>,
    },
    RemoveTable {
        node_id: NodeId,
    },
    AddColumn {
        node_id: NodeId,
        column: Column,
    },
    UpdateColumn {
        node_id: NodeId,
        index: usize,
        column: Column,
    },
    RemoveColumn {
        node_id: NodeId,
        index: usize,
    },
    Connect {
        edge_id: EdgeId,
        source_node_id: NodeId,
        target_node_id: NodeId,
        source_anchor: Option<String>,
        target_anchor: Option<String>,
    },
    SetRelationKind {
        edge_id: EdgeId,
        kind: RelationKind,
    },
    RemoveEdge {
        edge_id: EdgeId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which objects changed as the result of applying
/// ops. Intentionally coarse: added/removed/updated object refs only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<DiagramObject>,
    pub removed: Vec<DiagramObject>,
    pub updated: Vec<DiagramObject>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<DiagramObject>,
    removed: HashSet<DiagramObject>,
    updated: HashSet<DiagramObject>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object: DiagramObject) {
        self.removed.remove(&object);
        self.updated.remove(&object);
        self.added.insert(object);
    }

    fn record_removed(&mut self, object: DiagramObject) {
        self.added.remove(&object);
        self.updated.remove(&object);
        self.removed.insert(object);
    }

    fn record_updated(&mut self, object: DiagramObject) {
        if self.added.contains(&object) || self.removed.contains(&object) {
            return;
        }
        self.updated.insert(object);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta {
            added,
            removed,
            updated,
        }
    }
}

pub fn apply_ops(
    diagram: &mut Diagram,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = diagram.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut nodes = diagram.nodes().clone();
    let mut edges = diagram.edges().clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut nodes, &mut edges, op, &mut delta)?;
    }

    *diagram.nodes_mut() = nodes;
    *diagram.edges_mut() = edges;
    diagram.bump_rev();
    let new_rev = diagram.rev();

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta: delta.finish(),
    })
}

fn apply_op(
    nodes: &mut BTreeMap<NodeId, TableNode>,
    edges: &mut BTreeMap<EdgeId, Relationship>,
    op: &Op,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        Op::AddTable {
            node_id,
            name,
            position,
        } => {
            if nodes.contains_key(node_id) {
                return Err(ApplyError::TableAlreadyExists {
                    node_id: node_id.clone(),
                });
            }
            nodes.insert(node_id.clone(), TableNode::new(name.clone(), *position));
            delta.record_added(DiagramObject::Table(node_id.clone()));
        }
        Op::RenameTable { node_id, name } => {
            let table = table_mut(nodes, node_id)?;
            table.set_name(name.clone());
            delta.record_updated(DiagramObject::Table(node_id.clone()));
        }
        Op::MoveTable { node_id, position } => {
            let table = table_mut(nodes, node_id)?;
            table.set_position(*position);
            delta.record_updated(DiagramObject::Table(node_id.clone()));
        }
        Op::SetTableSize { node_id, size } => {
            let table = table_mut(nodes, node_id)?;
            table.set_size(*size);
            delta.record_updated(DiagramObject::Table(node_id.clone()));
        }
        Op::RemoveTable { node_id } => {
            if nodes.remove(node_id).is_none() {
                return Err(ApplyError::TableNotFound {
                    node_id: node_id.clone(),
                });
            }
            // Cascade: drop every edge referencing the table in the same
            // application, so no frame ever holds a dangling endpoint.
            let touching = edges
                .iter()
                .filter(|(_, edge)| edge.touches(node_id))
                .map(|(edge_id, _)| edge_id.clone())
                .collect::<Vec<_>>();
            for edge_id in touching {
                edges.remove(&edge_id);
                delta.record_removed(DiagramObject::Edge(edge_id));
            }
            delta.record_removed(DiagramObject::Table(node_id.clone()));
        }
        Op::AddColumn { node_id, column } => {
            let table = table_mut(nodes, node_id)?;
            table.columns_mut().push(column.clone());
            delta.record_updated(DiagramObject::Table(node_id.clone()));
        }
        Op::UpdateColumn {
            node_id,
            index,
            column,
        } => {
            let table = table_mut(nodes, node_id)?;
            let len = table.columns().len();
            let slot = table.columns_mut().get_mut(*index).ok_or_else(|| {
                ApplyError::ColumnOutOfRange {
                    node_id: node_id.clone(),
                    index: *index,
                    len,
                }
            })?;
            *slot = column.clone();
            delta.record_updated(DiagramObject::Table(node_id.clone()));
        }
        Op::RemoveColumn { node_id, index } => {
            let table = table_mut(nodes, node_id)?;
            let len = table.columns().len();
            if *index >= len {
                return Err(ApplyError::ColumnOutOfRange {
                    node_id: node_id.clone(),
                    index: *index,
                    len,
                });
            }
            table.columns_mut().remove(*index);
            delta.record_updated(DiagramObject::Table(node_id.clone()));
        }
        Op::Connect {
            edge_id,
            source_node_id,
            target_node_id,
            source_anchor,
            target_anchor,
        } => {
            if edges.contains_key(edge_id) {
                return Err(ApplyError::EdgeAlreadyExists {
                    edge_id: edge_id.clone(),
                });
            }
            for node_id in [source_node_id, target_node_id] {
                if !nodes.contains_key(node_id) {
                    return Err(ApplyError::MissingEndpoint {
                        edge_id: edge_id.clone(),
                        node_id: node_id.clone(),
                    });
                }
            }
            edges.insert(
                edge_id.clone(),
                Relationship::new_with(
                    source_node_id.clone(),
                    target_node_id.clone(),
                    source_anchor.clone(),
                    target_anchor.clone(),
                    RelationKind::OneToOne,
                ),
            );
            delta.record_added(DiagramObject::Edge(edge_id.clone()));
        }
        Op::SetRelationKind { edge_id, kind } => {
            let edge = edges
                .get_mut(edge_id)
                .ok_or_else(|| ApplyError::EdgeNotFound {
                    edge_id: edge_id.clone(),
                })?;
            edge.set_kind(*kind);
            delta.record_updated(DiagramObject::Edge(edge_id.clone()));
        }
        Op::RemoveEdge { edge_id } => {
            if edges.remove(edge_id).is_none() {
                return Err(ApplyError::EdgeNotFound {
                    edge_id: edge_id.clone(),
                });
            }
            delta.record_removed(DiagramObject::Edge(edge_id.clone()));
        }
    }

    Ok(())
}

fn table_mut<'a>(
    nodes: &'a mut BTreeMap<NodeId, TableNode>,
    node_id: &NodeId,
) -> Result<&'a mut TableNode, ApplyError> {
    nodes.get_mut(node_id).ok_or_else(|| ApplyError::TableNotFound {
        node_id: node_id.clone(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    TableAlreadyExists { node_id: NodeId },
    TableNotFound { node_id: NodeId },
    EdgeAlreadyExists { edge_id: EdgeId },
    EdgeNotFound { edge_id: EdgeId },
    MissingEndpoint { edge_id: EdgeId, node_id: NodeId },
    ColumnOutOfRange { node_id: NodeId, index: usize, len: usize },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                base_rev,
                current_rev,
            } => {
                write!(
                    f,
                    "stale base_rev (base_rev={base_rev}, current_rev={current_rev})"
                )
            }
            Self::TableAlreadyExists { node_id } => {
                write!(f, "table already exists (id={node_id})")
            }
            Self::TableNotFound { node_id } => write!(f, "table not found (id={node_id})"),
            Self::EdgeAlreadyExists { edge_id } => {
                write!(f, "edge already exists (id={edge_id})")
            }
            Self::EdgeNotFound { edge_id } => write!(f, "edge not found (id={edge_id})"),
            Self::MissingEndpoint { edge_id, node_id } => {
                write!(f, "edge {edge_id} references missing table {node_id}")
            }
            Self::ColumnOutOfRange {
                node_id,
                index,
                len,
            } => {
                write!(
                    f,
                    "column index {index} out of range for table {node_id} ({len} columns)"
                )
            }
        }
    }
}

impl std::error::Error for ApplyError {}

#[cfg(test)]
mod tests;
