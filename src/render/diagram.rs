// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic Unicode renderer for a diagram.
//!
//! Tables render as boxes with a header row and one row per column; edges
//! render as their routed step paths with cardinality markers at both ends
//! and a label badge at the routed label point. The selected edge's badge is
//! replaced by its control surface.

use std::collections::BTreeMap;
use std::fmt;

use crate::layout::{self, Marker, Rect, RoutingResult};
use crate::model::{Diagram, DiagramObject, EdgeId, NodeId, Point, RelationKind};

use super::{
    truncate_with_ellipsis, AnnotatedRender, Canvas, CanvasError, HighlightIndex, LineSpan,
};

/// Canvas units per character column.
pub const CELL_WIDTH: f64 = 10.0;
/// Canvas units per character row.
pub const CELL_HEIGHT: f64 = 25.0;

const GRID_MARGIN: usize = 2;
const MAX_GRID_WIDTH: usize = 500;
const MAX_GRID_HEIGHT: usize = 250;

/// The action strip shown at the selected edge's label point.
pub const CONTROL_SURFACE: &str = "[1]1:1 [2]1:M [3]M:M [d]del";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellBox {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

#[derive(Debug)]
struct RenderPlan {
    grid_width: usize,
    grid_height: usize,
    origin: Point,
    tables: BTreeMap<NodeId, CellBox>,
    routes: BTreeMap<EdgeId, RoutingResult>,
}

impl RenderPlan {
    fn build(diagram: &Diagram) -> Option<Self> {
        let mut routes = BTreeMap::new();
        for (edge_id, edge) in diagram.edges() {
            routes.insert(
                edge_id.clone(),
                layout::route_edge(edge_id, edge, diagram.nodes(), diagram.edges()),
            );
        }

        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        let mut grow = |x: f64, y: f64| {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        };
        for table in diagram.nodes().values() {
            let rect = Rect::of_table(table);
            grow(rect.min_x(), rect.min_y());
            grow(rect.max_x(), rect.max_y());
        }
        for route in routes.values() {
            for point in route.path().points() {
                grow(point.x, point.y);
            }
        }
        let (min_x, min_y, max_x, max_y) = bounds?;

        let origin = Point::new(min_x, min_y);
        let grid_width = (((max_x - min_x) / CELL_WIDTH).ceil() as usize + 2 * GRID_MARGIN + 1)
            .min(MAX_GRID_WIDTH);
        let grid_height = (((max_y - min_y) / CELL_HEIGHT).ceil() as usize + 2 * GRID_MARGIN + 1)
            .min(MAX_GRID_HEIGHT);

        let mut plan = Self {
            grid_width,
            grid_height,
            origin,
            tables: BTreeMap::new(),
            routes,
        };

        for (node_id, table) in diagram.nodes() {
            let rect = Rect::of_table(table);
            let x0 = plan.cell_x(rect.min_x());
            let y0 = plan.cell_y(rect.min_y());
            let x1 = plan.cell_x(rect.max_x()).max(x0 + 2).min(grid_width - 1);
            let y1 = plan.cell_y(rect.max_y()).max(y0 + 2).min(grid_height - 1);
            plan.tables.insert(node_id.clone(), CellBox { x0, y0, x1, y1 });
        }

        Some(plan)
    }

    fn cell_x(&self, x: f64) -> usize {
        let cell = ((x - self.origin.x) / CELL_WIDTH).round() as isize + GRID_MARGIN as isize;
        cell.clamp(0, self.grid_width as isize - 1) as usize
    }

    fn cell_y(&self, y: f64) -> usize {
        let cell = ((y - self.origin.y) / CELL_HEIGHT).round() as isize + GRID_MARGIN as isize;
        cell.clamp(0, self.grid_height as isize - 1) as usize
    }

    fn cell(&self, point: Point) -> (usize, usize) {
        (self.cell_x(point.x), self.cell_y(point.y))
    }
}

/// Renders `diagram` to text plus a highlight index. `selected` swaps that
/// edge's label badge for the control surface.
pub fn render_diagram(
    diagram: &Diagram,
    selected: Option<&EdgeId>,
) -> Result<AnnotatedRender, RenderError> {
    let Some(plan) = RenderPlan::build(diagram) else {
        return Ok(AnnotatedRender {
            text: String::new(),
            highlight_index: HighlightIndex::new(),
        });
    };

    let mut canvas = Canvas::new(plan.grid_width, plan.grid_height)?;
    let mut highlight_index = HighlightIndex::new();

    for (node_id, table) in diagram.nodes() {
        let cell_box = plan.tables[node_id];
        draw_table(&mut canvas, diagram, node_id, cell_box)?;

        let mut spans = Vec::<LineSpan>::new();
        for y in cell_box.y0..=cell_box.y1 {
            spans.push((y, cell_box.x0, cell_box.x1));
        }
        highlight_index.insert(DiagramObject::Table(node_id.clone()), spans);
    }

    for (edge_id, route) in &plan.routes {
        let kind = diagram.edges().get(edge_id).map(|edge| edge.kind());
        let is_selected = selected == Some(edge_id);
        let spans = draw_edge(&mut canvas, &plan, route, kind, is_selected)?;
        highlight_index.insert(DiagramObject::Edge(edge_id.clone()), spans);
    }

    let text = canvas.to_trimmed_string();
    clamp_highlight_index(&mut highlight_index, &text);

    Ok(AnnotatedRender {
        text,
        highlight_index,
    })
}

fn draw_table(
    canvas: &mut Canvas,
    diagram: &Diagram,
    node_id: &NodeId,
    cell_box: CellBox,
) -> Result<(), CanvasError> {
    let CellBox { x0, y0, x1, y1 } = cell_box;
    canvas.draw_box(x0, y0, x1, y1)?;

    let inner_width = x1 - x0 - 1;
    let Some(table) = diagram.nodes().get(node_id) else {
        return Ok(());
    };

    let name = truncate_with_ellipsis(table.name(), inner_width);
    let pad = (inner_width - name.chars().count()) / 2;
    canvas.write_str(x0 + 1 + pad, y0 + 1, &name)?;

    // Header separator, with tees where it meets the side walls.
    if y1 > y0 + 2 {
        if x1 > x0 + 1 {
            canvas.draw_hline(x0 + 1, x1 - 1, y0 + 2)?;
        }
        canvas.set(x0, y0 + 2, '├')?;
        canvas.set(x1, y0 + 2, '┤')?;
    }

    for (index, column) in table.columns().iter().enumerate() {
        let y = y0 + 3 + index;
        if y >= y1 {
            break;
        }
        let marker = if column.primary_key { '*' } else { ' ' };
        let text = format!("{marker}{} {}", column.name, column.sql_type);
        canvas.write_str(x0 + 1, y, &truncate_with_ellipsis(&text, inner_width))?;
    }

    Ok(())
}

fn draw_edge(
    canvas: &mut Canvas,
    plan: &RenderPlan,
    route: &RoutingResult,
    kind: Option<RelationKind>,
    is_selected: bool,
) -> Result<Vec<LineSpan>, CanvasError> {
    let cells: Vec<(usize, usize)> = route
        .path()
        .points()
        .iter()
        .map(|point| plan.cell(*point))
        .collect();

    let mut spans = Vec::<LineSpan>::new();
    for pair in cells.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if y0 == y1 {
            canvas.draw_hline(x0, x1, y0)?;
            spans.push((y0, x0.min(x1), x0.max(x1)));
        } else {
            canvas.draw_vline(x0, y0, y1)?;
            for y in y0.min(y1)..=y0.max(y1) {
                spans.push((y, x0, x0));
            }
        }
    }

    let (start_marker, end_marker) = layout::markers_for(kind);
    draw_marker(canvas, &cells, start_marker, MarkerEnd::Start)?;
    draw_marker(canvas, &cells, end_marker, MarkerEnd::End)?;

    let badge = if is_selected {
        CONTROL_SURFACE.to_owned()
    } else {
        kind.unwrap_or_default().label().to_owned()
    };
    let (label_x, label_y) = plan.cell(route.label_point());
    let badge_len = badge.chars().count();
    let badge_x = label_x
        .saturating_sub(badge_len / 2)
        .min(plan.grid_width.saturating_sub(badge_len));
    canvas.write_str(badge_x, label_y, &badge)?;
    spans.push((label_y, badge_x, badge_x + badge_len.saturating_sub(1)));

    spans.sort();
    spans.dedup();
    Ok(spans)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerEnd {
    Start,
    End,
}

fn draw_marker(
    canvas: &mut Canvas,
    cells: &[(usize, usize)],
    marker: Marker,
    end: MarkerEnd,
) -> Result<(), CanvasError> {
    if cells.len() < 2 {
        return Ok(());
    }

    // The marker sits one cell inside the path from its endpoint, facing the
    // node the endpoint touches.
    let (anchor, neighbor) = match end {
        MarkerEnd::Start => (cells[0], cells[1]),
        MarkerEnd::End => (cells[cells.len() - 1], cells[cells.len() - 2]),
    };
    let dx = (neighbor.0 as isize - anchor.0 as isize).signum();
    let dy = (neighbor.1 as isize - anchor.1 as isize).signum();
    let x = anchor.0 as isize + dx;
    let y = anchor.1 as isize + dy;
    if x < 0 || y < 0 {
        return Ok(());
    }
    let (x, y) = (x as usize, y as usize);
    if x >= canvas.width() || y >= canvas.height() {
        return Ok(());
    }

    let glyph = match marker {
        Marker::Bar => {
            if dy == 0 {
                '|'
            } else {
                '-'
            }
        }
        // Crow's foot opens toward the node it touches.
        Marker::CrowsFoot => match (dx, dy) {
            (dx, 0) if dx > 0 => '<',
            (_, 0) => '>',
            (0, dy) if dy > 0 => '^',
            _ => 'v',
        },
    };
    canvas.set(x, y, glyph)
}

fn clamp_highlight_index(highlight_index: &mut HighlightIndex, text: &str) {
    let line_lens: Vec<usize> = text.split('\n').map(|line| line.chars().count()).collect();

    highlight_index.retain(|_, spans| {
        spans.retain_mut(|(y, x0, x1)| {
            let Some(len) = line_lens.get(*y).copied() else {
                return false;
            };
            if len == 0 || *x0 >= len {
                return false;
            }
            if *x1 > len - 1 {
                *x1 = len - 1;
            }
            *x0 <= *x1
        });
        !spans.is_empty()
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Canvas(CanvasError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<CanvasError> for RenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}
