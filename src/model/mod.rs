// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: tables, relationships, and the live diagram.

pub mod diagram;
pub(crate) mod fixtures;
pub mod ids;
pub mod object;
pub mod relationship;
pub mod table;

pub use diagram::Diagram;
pub use ids::{DiagramId, EdgeId, Id, IdError, NodeId};
pub use object::DiagramObject;
pub use relationship::{RelationKind, Relationship};
pub use table::{Column, Point, Size, TableNode, DEFAULT_TABLE_SIZE};
