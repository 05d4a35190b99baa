// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use super::geometry::anchor_side;
use crate::model::{EdgeId, NodeId, Relationship, TableNode};

/// Zero-based position of `edge_id` within its sibling group.
///
/// The sibling group is every edge leaving the same source node through the
/// same anchor side. Siblings are ordered by their target's vertical
/// position, ascending, so lines peel off the shared face in the order their
/// targets are stacked; exact ties fall back to edge-id order so the rank
/// never flips between two identical frames. A target that no longer exists
/// (transient, mid-cascade) ranks as if it sat at y = 0.
pub fn sibling_rank(
    edge_id: &EdgeId,
    edge: &Relationship,
    edges: &BTreeMap<EdgeId, Relationship>,
    nodes: &BTreeMap<NodeId, TableNode>,
) -> usize {
    let side = anchor_side(edge.source_anchor());

    let mut siblings: SmallVec<[(&EdgeId, f64); 8]> = SmallVec::new();
    for (sibling_id, sibling) in edges {
        if sibling.source_node_id() != edge.source_node_id() {
            continue;
        }
        if anchor_side(sibling.source_anchor()) != side {
            continue;
        }
        let target_y = nodes
            .get(sibling.target_node_id())
            .map(|target| target.position().y)
            .unwrap_or(0.0);
        siblings.push((sibling_id, target_y));
    }

    siblings.sort_by(|(id_a, y_a), (id_b, y_b)| y_a.total_cmp(y_b).then_with(|| id_a.cmp(id_b)));

    siblings
        .iter()
        .position(|(sibling_id, _)| *sibling_id == edge_id)
        .unwrap_or(0)
}
