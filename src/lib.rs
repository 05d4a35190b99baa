// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Naiad — entity-relationship diagram editor (routing core + TUI + HTTP API).
//!
//! The interesting part lives in [`layout`]: deterministic, collision-avoiding
//! orthogonal edge routing. Everything else is the editor around it.

pub mod api;
pub mod layout;
pub mod model;
pub mod ops;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;
