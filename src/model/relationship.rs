// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::NodeId;

/// Cardinality of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationKind {
    #[default]
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    pub const ALL: [Self; 3] = [Self::OneToOne, Self::OneToMany, Self::ManyToMany];

    pub fn label(self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:M",
            Self::ManyToMany => "M:M",
        }
    }

    /// Parses a cardinality label. Unknown labels fall back to `1:1`; a
    /// relationship must never be rejected over an unrecognized tag.
    pub fn from_label(label: &str) -> Self {
        match label {
            "1:1" => Self::OneToOne,
            // "1:N" is the legacy spelling of "1:M" in old saved diagrams.
            "1:M" | "1:N" => Self::OneToMany,
            "M:M" | "N:M" => Self::ManyToMany,
            _ => Self::default(),
        }
    }
}

impl Serialize for RelationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RelationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// A relationship edge between two tables.
///
/// Anchors are handle strings of the form `<side>:<column-index>` (for
/// example `right:0`); `None` means the host never reported a handle and the
/// router falls back to its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    source_node_id: NodeId,
    target_node_id: NodeId,
    #[serde(default)]
    source_anchor: Option<String>,
    #[serde(default)]
    target_anchor: Option<String>,
    #[serde(default)]
    kind: RelationKind,
}

impl Relationship {
    pub fn new(source_node_id: NodeId, target_node_id: NodeId) -> Self {
        Self {
            source_node_id,
            target_node_id,
            source_anchor: None,
            target_anchor: None,
            kind: RelationKind::default(),
        }
    }

    pub fn new_with(
        source_node_id: NodeId,
        target_node_id: NodeId,
        source_anchor: Option<String>,
        target_anchor: Option<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            source_node_id,
            target_node_id,
            source_anchor,
            target_anchor,
            kind,
        }
    }

    pub fn source_node_id(&self) -> &NodeId {
        &self.source_node_id
    }

    pub fn target_node_id(&self) -> &NodeId {
        &self.target_node_id
    }

    pub fn source_anchor(&self) -> Option<&str> {
        self.source_anchor.as_deref()
    }

    pub fn set_source_anchor<T: Into<String>>(&mut self, anchor: Option<T>) {
        self.source_anchor = anchor.map(Into::into);
    }

    pub fn target_anchor(&self) -> Option<&str> {
        self.target_anchor.as_deref()
    }

    pub fn set_target_anchor<T: Into<String>>(&mut self, anchor: Option<T>) {
        self.target_anchor = anchor.map(Into::into);
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: RelationKind) {
        self.kind = kind;
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source_node_id == node_id || &self.target_node_id == node_id
    }
}
