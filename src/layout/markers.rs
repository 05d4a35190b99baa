// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::RelationKind;

/// Line-end decoration for one end of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The "one" end.
    Bar,
    /// The "many" end.
    CrowsFoot,
}

/// The `(start, end)` marker pair for a cardinality. A missing kind gets the
/// `1:1` pair.
pub fn markers_for(kind: Option<RelationKind>) -> (Marker, Marker) {
    match kind.unwrap_or_default() {
        RelationKind::OneToOne => (Marker::Bar, Marker::Bar),
        RelationKind::OneToMany => (Marker::Bar, Marker::CrowsFoot),
        RelationKind::ManyToMany => (Marker::CrowsFoot, Marker::CrowsFoot),
    }
}
