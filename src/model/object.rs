// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{EdgeId, NodeId};

/// A reference to one addressable object in a diagram. Used by op deltas and
/// by the renderer's highlight index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagramObject {
    Table(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for DiagramObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(node_id) => write!(f, "table/{node_id}"),
            Self::Edge(edge_id) => write!(f, "edge/{edge_id}"),
        }
    }
}
