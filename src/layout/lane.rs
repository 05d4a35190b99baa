// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geometry::{AnchorSide, Rect};
use super::{BASE_OFFSET, CLEARANCE_MARGIN, MAX_ATTEMPTS, OFFSET_BUMP, RANK_STEP};
use crate::model::Point;

/// The rank-derived starting offset for the widening loop.
pub fn base_offset(rank: usize) -> f64 {
    BASE_OFFSET + rank as f64 * RANK_STEP
}

/// Resolves the lane offset for one edge's vertical routing segment.
///
/// Starting from the rank-derived base offset, the lane is tested against
/// every obstacle box (endpoint nodes must already be excluded by the
/// caller): a collision is the lane x falling inside the box expanded by the
/// clearance margin while the box's vertical extent overlaps the edge's
/// expanded vertical span. Each collision widens the offset by a fixed bump.
/// The loop is hard-capped; when attempts run out the last offset is
/// accepted as-is, trading a clipped lane for guaranteed termination.
pub fn resolve_lane_offset(
    source: Point,
    target: Point,
    side: AnchorSide,
    rank: usize,
    obstacles: &[Rect],
) -> f64 {
    let span_min = source.y.min(target.y) - CLEARANCE_MARGIN;
    let span_max = source.y.max(target.y) + CLEARANCE_MARGIN;

    let mut offset = base_offset(rank);
    for attempt in 0..MAX_ATTEMPTS {
        let lane_x = side.lane_x(source.x, offset);
        let collides = obstacles.iter().any(|rect| {
            let expanded = rect.expand(CLEARANCE_MARGIN);
            expanded.contains_x(lane_x) && expanded.overlaps_vertical_span(span_min, span_max)
        });
        if !collides {
            return offset;
        }
        if attempt + 1 < MAX_ATTEMPTS {
            offset += OFFSET_BUMP;
        }
    }

    offset
}

#[cfg(test)]
mod tests {
    use super::{base_offset, resolve_lane_offset};
    use crate::layout::geometry::{AnchorSide, Rect};
    use crate::layout::{BASE_OFFSET, CLEARANCE_MARGIN, MAX_ATTEMPTS, OFFSET_BUMP, RANK_STEP};
    use crate::model::{Point, Size};

    #[test]
    fn clear_lane_accepts_the_base_offset() {
        let offset = resolve_lane_offset(
            Point::new(200.0, 75.0),
            Point::new(200.0, 375.0),
            AnchorSide::Right,
            0,
            &[],
        );
        assert_eq!(offset, BASE_OFFSET);
    }

    #[test]
    fn rank_raises_the_starting_offset() {
        assert_eq!(base_offset(0), BASE_OFFSET);
        assert_eq!(base_offset(3), BASE_OFFSET + 3.0 * RANK_STEP);

        let offset = resolve_lane_offset(
            Point::new(200.0, 75.0),
            Point::new(200.0, 375.0),
            AnchorSide::Right,
            2,
            &[],
        );
        assert_eq!(offset, base_offset(2));
    }

    #[test]
    fn blocked_lane_widens_past_the_obstacle() {
        // Obstacle straddling the base lane at x = 250.
        let blocker = Rect::new(Point::new(250.0, 150.0), Size::new(200.0, 150.0));
        let offset = resolve_lane_offset(
            Point::new(200.0, 75.0),
            Point::new(200.0, 375.0),
            AnchorSide::Right,
            0,
            &[blocker],
        );

        let lane_x = AnchorSide::Right.lane_x(200.0, offset);
        assert!(lane_x > 250.0 + 200.0 + CLEARANCE_MARGIN);
        assert!(offset > BASE_OFFSET);
    }

    #[test]
    fn obstacle_outside_vertical_span_is_ignored() {
        // Same x overlap as above, but far below the edge's span.
        let bystander = Rect::new(Point::new(250.0, 2000.0), Size::new(200.0, 150.0));
        let offset = resolve_lane_offset(
            Point::new(200.0, 75.0),
            Point::new(200.0, 375.0),
            AnchorSide::Right,
            0,
            &[bystander],
        );
        assert_eq!(offset, BASE_OFFSET);
    }

    #[test]
    fn left_side_lane_widens_leftward() {
        // Blocker straddling the base lane at x = -50.
        let blocker = Rect::new(Point::new(-120.0, 0.0), Size::new(200.0, 150.0));
        let offset = resolve_lane_offset(
            Point::new(0.0, 75.0),
            Point::new(0.0, 100.0),
            AnchorSide::Left,
            0,
            &[blocker],
        );

        let lane_x = AnchorSide::Left.lane_x(0.0, offset);
        assert!(lane_x < -120.0 - CLEARANCE_MARGIN);
        assert!(offset > BASE_OFFSET);
    }

    #[test]
    fn exhausted_attempts_accept_a_bounded_offset() {
        // A wall too wide to ever clear within the attempt budget.
        let wall = Rect::new(Point::new(0.0, 0.0), Size::new(10_000.0, 500.0));
        let offset = resolve_lane_offset(
            Point::new(200.0, 75.0),
            Point::new(200.0, 375.0),
            AnchorSide::Right,
            0,
            &[wall],
        );

        assert_eq!(
            offset,
            BASE_OFFSET + (MAX_ATTEMPTS - 1) as f64 * OFFSET_BUMP
        );
    }
}
