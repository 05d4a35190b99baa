// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Point, Size, TableNode};

/// Axis-aligned bounding box in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x + size.width,
            max_y: origin.y + size.height,
        }
    }

    /// The table's bounding box, substituting the default size when the
    /// renderer has not measured the table yet.
    pub fn of_table(table: &TableNode) -> Self {
        Self::new(table.position(), table.size_or_default())
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    /// True when the box's vertical extent overlaps `[span_min, span_max]`.
    pub fn overlaps_vertical_span(&self, span_min: f64, span_max: f64) -> bool {
        self.min_y <= span_max && self.max_y >= span_min
    }
}

/// Which face of the source table an edge leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    Left,
    Right,
}

impl AnchorSide {
    /// The lane x for this side: displaced outward from the anchor x.
    pub fn lane_x(self, anchor_x: f64, offset: f64) -> f64 {
        match self {
            Self::Right => anchor_x + offset,
            Self::Left => anchor_x - offset,
        }
    }
}

/// Resolves the side prefix of an anchor handle string (`"left:2"`,
/// `"right:0"`, ...).
///
/// Only `left` is recognized; everything else, including `top`/`bottom`
/// handles and missing anchors, resolves to `Right`. Top/bottom anchors are
/// deliberately not routed through collision avoidance.
pub fn anchor_side(anchor: Option<&str>) -> AnchorSide {
    match anchor {
        Some(handle) if handle.starts_with("left") => AnchorSide::Left,
        _ => AnchorSide::Right,
    }
}

/// The column index encoded in an anchor handle, if present and numeric.
pub fn anchor_column(anchor: Option<&str>) -> Option<usize> {
    let handle = anchor?;
    let (_, index) = handle.split_once(':')?;
    index.parse().ok()
}
