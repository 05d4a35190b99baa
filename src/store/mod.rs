// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for diagrams on disk.
//!
//! A diagram folder holds one JSON record per diagram. The same folder backs
//! the TUI's save/load keys and the HTTP API.

pub mod diagram_folder;

pub use diagram_folder::{
    DiagramFolder, DiagramRecord, DiagramSummary, SavePayload, StoreError, WriteDurability,
};
