// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram rendering.
//!
//! The renderer produces Unicode text plus a stable highlight index the TUI
//! uses for cell-accurate selection highlighting.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::DiagramObject;

pub mod diagram;

pub use diagram::{render_diagram, RenderError};

/// A contiguous span of highlighted cells within a single rendered line,
/// `(y, x0, x1)` in character cells, inclusive.
pub type LineSpan = (usize, usize, usize);

/// Mapping from diagram objects to the spans that highlight them.
pub type HighlightIndex = BTreeMap<DiagramObject, Vec<LineSpan>>;

/// Render output plus an index for stable, cell-accurate UI highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRender {
    pub text: String,
    pub highlight_index: HighlightIndex,
}

const EDGE_LEFT: u8 = 0b0001;
const EDGE_RIGHT: u8 = 0b0010;
const EDGE_DOWN: u8 = 0b0100;
const EDGE_UP: u8 = 0b1000;

const BOX_CHARS: [(char, u8); 11] = [
    // Bits: left, right, up, down.
    ('─', 0b0011),
    ('│', 0b1100),
    ('┌', 0b0110),
    ('┐', 0b0101),
    ('└', 0b1010),
    ('┘', 0b1001),
    ('├', 0b1110),
    ('┤', 0b1101),
    ('┬', 0b0111),
    ('┴', 0b1011),
    ('┼', 0b1111),
];

fn edges_of(ch: char) -> Option<u8> {
    BOX_CHARS
        .iter()
        .find(|(candidate, _)| *candidate == ch)
        .map(|(_, edges)| *edges)
}

fn char_of(edges: u8) -> char {
    match edges {
        0b0001 | 0b0010 | 0b0011 => '─',
        0b0100 | 0b1000 | 0b1100 => '│',
        0b0110 => '┌',
        0b0101 => '┐',
        0b1010 => '└',
        0b1001 => '┘',
        0b1110 => '├',
        0b1101 => '┤',
        0b0111 => '┬',
        0b1011 => '┴',
        _ => '┼',
    }
}

/// A fixed-size, bounds-checked character grid.
///
/// Collision behavior is deterministic: plain characters overwrite (last
/// writer wins), while box-drawing characters merge into junctions instead
/// of overwriting each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    edges: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![' '; len],
            edges: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.char_at(idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        if let Some(edges) = edges_of(ch) {
            self.edges[idx] |= edges;
        } else {
            self.cells[idx] = ch;
            self.edges[idx] = 0;
        }
        Ok(())
    }

    /// Writes `text` left-to-right starting at `(x, y)`, clipping at the
    /// right edge. An out-of-bounds row is an error.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        let mut x = x;
        for ch in text.chars() {
            if x >= self.width {
                break;
            }
            self.set(x, y, ch)?;
            x += 1;
        }
        Ok(())
    }

    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        if y >= self.height || max_x >= self.width {
            return Err(self.out_of_bounds(max_x, y));
        }
        for x in min_x..=max_x {
            // Endpoint cells reach inward only, so a line that stops on a
            // perpendicular one forms a tee rather than a cross.
            let mut edges = 0;
            if x > min_x {
                edges |= EDGE_LEFT;
            }
            if x < max_x {
                edges |= EDGE_RIGHT;
            }
            if edges == 0 {
                edges = EDGE_LEFT | EDGE_RIGHT;
            }
            self.merge_edges(x, y, edges)?;
        }
        Ok(())
    }

    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if x >= self.width || max_y >= self.height {
            return Err(self.out_of_bounds(x, max_y));
        }
        for y in min_y..=max_y {
            let mut edges = 0;
            if y > min_y {
                edges |= EDGE_UP;
            }
            if y < max_y {
                edges |= EDGE_DOWN;
            }
            if edges == 0 {
                edges = EDGE_UP | EDGE_DOWN;
            }
            self.merge_edges(x, y, edges)?;
        }
        Ok(())
    }

    fn merge_edges(&mut self, x: usize, y: usize, edges: u8) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.edges[idx] |= edges;
        Ok(())
    }

    /// Draws a single-line box with corners at `(x0, y0)` and `(x1, y1)`.
    /// Fails before drawing anything when the box does not fit.
    pub fn draw_box(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if max_x >= self.width || max_y >= self.height {
            return Err(self.out_of_bounds(max_x, max_y));
        }

        if min_y == max_y {
            return self.draw_hline(min_x, max_x, min_y);
        }
        if min_x == max_x {
            return self.draw_vline(min_x, min_y, max_y);
        }

        for x in (min_x + 1)..max_x {
            self.set(x, min_y, '─')?;
            self.set(x, max_y, '─')?;
        }
        for y in (min_y + 1)..max_y {
            self.set(min_x, y, '│')?;
            self.set(max_x, y, '│')?;
        }
        self.set(min_x, min_y, '┌')?;
        self.set(max_x, min_y, '┐')?;
        self.set(min_x, max_y, '└')?;
        self.set(max_x, max_y, '┘')?;
        Ok(())
    }

    /// The canvas as text, with trailing spaces and trailing blank lines
    /// removed.
    pub fn to_trimmed_string(&self) -> String {
        let mut lines = Vec::<String>::with_capacity(self.height);
        for y in 0..self.height {
            let mut line = String::with_capacity(self.width);
            for x in 0..self.width {
                line.push(self.char_at(y * self.width + x));
            }
            lines.push(line.trim_end_matches(' ').to_owned());
        }
        while matches!(lines.last(), Some(line) if line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn char_at(&self, idx: usize) -> char {
        if self.edges[idx] == 0 {
            self.cells[idx]
        } else {
            char_of(self.edges[idx])
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(y * self.width + x)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CanvasError {
        CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.char_at(y * self.width + x))?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }
    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}
