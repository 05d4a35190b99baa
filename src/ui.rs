// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge interaction state.
//!
//! Selection is transient UI state: it never persists, and the routing core
//! never sees it. Control-surface actions on the selected edge are turned
//! into ops for the caller to apply; this module never mutates the diagram
//! itself.

use crate::model::{EdgeId, RelationKind};
use crate::ops::Op;

/// An action offered by the selected edge's control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    SetKind(RelationKind),
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeInteraction {
    selected: Option<EdgeId>,
    dirty: bool,
    rev: u64,
}

impl EdgeInteraction {
    pub fn selected(&self) -> Option<&EdgeId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, edge_id: &EdgeId) -> bool {
        self.selected.as_ref() == Some(edge_id)
    }

    /// True when an emitted op has not been persisted yet.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Click semantics: clicking the selected edge unselects it; clicking
    /// any other edge selects that edge. No other edge is affected.
    pub fn click(&mut self, edge_id: &EdgeId) {
        if self.is_selected(edge_id) {
            self.selected = None;
        } else {
            self.selected = Some(edge_id.clone());
        }
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.rev = self.rev.wrapping_add(1);
        }
    }

    /// The op a control-surface action maps to, for the currently selected
    /// edge. Marks the interaction dirty; `Delete` also drops the selection.
    /// Returns `None` when no edge is selected.
    pub fn control_action(&mut self, action: ControlAction) -> Option<Op> {
        let edge_id = self.selected.clone()?;
        self.dirty = true;
        self.rev = self.rev.wrapping_add(1);
        match action {
            ControlAction::SetKind(kind) => Some(Op::SetRelationKind { edge_id, kind }),
            ControlAction::Delete => {
                self.selected = None;
                Some(Op::RemoveEdge { edge_id })
            }
        }
    }

    /// Called after the owning store persisted the diagram.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Called when an edge disappears for any other reason (cascade delete),
    /// so the selection never dangles.
    pub fn note_removed(&mut self, edge_id: &EdgeId) {
        if self.is_selected(edge_id) {
            self.selected = None;
            self.rev = self.rev.wrapping_add(1);
        }
    }
}
