// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::geometry::AnchorSide;
use crate::model::Point;

/// An orthogonal step path: an ordered corner list plus the radius a
/// renderer should round each corner with. Consecutive points always share
/// an x or a y coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPath {
    points: SmallVec<[Point; 6]>,
    corner_radius: f64,
}

impl StepPath {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| segment_length(pair[0], pair[1]))
            .sum()
    }

    /// The point halfway along the polyline by arc length. Label badges and
    /// the selected-edge control surface hang off this point.
    pub fn midpoint(&self) -> Point {
        let total = self.length();
        if total == 0.0 {
            return self.points.first().copied().unwrap_or_default();
        }

        let mut remaining = total / 2.0;
        for pair in self.points.windows(2) {
            let len = segment_length(pair[0], pair[1]);
            if remaining <= len {
                let t = if len == 0.0 { 0.0 } else { remaining / len };
                return Point::new(
                    pair[0].x + (pair[1].x - pair[0].x) * t,
                    pair[0].y + (pair[1].y - pair[0].y) * t,
                );
            }
            remaining -= len;
        }

        self.points.last().copied().unwrap_or_default()
    }
}

fn segment_length(a: Point, b: Point) -> f64 {
    (b.x - a.x).abs() + (b.y - a.y).abs()
}

/// Builds the step path for one edge: out of the source face to the lane,
/// down (or up) the lane to the target's row, then across to the target.
pub fn synthesize(
    source: Point,
    target: Point,
    side: AnchorSide,
    offset: f64,
    corner_radius: f64,
) -> StepPath {
    let lane_x = side.lane_x(source.x, offset);

    let mut points: SmallVec<[Point; 6]> = SmallVec::new();
    points.push(source);
    for candidate in [
        Point::new(lane_x, source.y),
        Point::new(lane_x, target.y),
        target,
    ] {
        if points.last() != Some(&candidate) {
            points.push(candidate);
        }
    }

    StepPath {
        points,
        corner_radius,
    }
}
