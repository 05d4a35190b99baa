// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive diagram editor shell (ratatui + crossterm). Tables are moved
//! with the arrow keys, edges are selected with `e` and edited through the
//! relation control surface, and `s` persists to the diagram folder.

use std::collections::BTreeMap;
use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{fixtures, Diagram, DiagramId, DiagramObject, EdgeId, NodeId, Point, RelationKind};
use crate::ops::{apply_ops, Op};
use crate::render::diagram::{render_diagram, CELL_HEIGHT, CELL_WIDTH};
use crate::render::AnnotatedRender;
use crate::store::{DiagramFolder, SavePayload};
use crate::ui::{ControlAction, EdgeInteraction};

const FOCUS_COLOR: Color = Color::LightGreen;
const SELECTION_COLOR: Color = Color::LightBlue;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Runs the interactive terminal UI against an optional diagram folder.
///
/// With a folder, the most recently updated record is opened (or a starter
/// diagram when the folder is empty) and `s` saves back to it. Without a
/// folder the editor works on an in-memory starter diagram.
pub fn run(folder: Option<Arc<DiagramFolder>>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::open(folder)?;

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    diagram: Diagram,
    interaction: EdgeInteraction,
    folder: Option<Arc<DiagramFolder>>,
    record_id: Option<DiagramId>,
    record_name: String,
    focused_table: Option<NodeId>,
    pending_source: Option<NodeId>,
    node_serial: u64,
    edge_serial: u64,
    dirty: bool,
    scroll: (u16, u16),
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn open(folder: Option<Arc<DiagramFolder>>) -> Result<Self, Box<dyn Error>> {
        let mut record_id = None;
        let mut record_name = "untitled".to_owned();
        let mut diagram = None;

        if let Some(folder) = &folder {
            if let Some(summary) = folder.list_diagrams()?.into_iter().next() {
                if let Some(record) = folder.load_diagram(&summary.id)? {
                    record_id = Some(record.id);
                    record_name = record.name;
                    diagram = Some(record.diagram);
                }
            }
        }

        let diagram = diagram.unwrap_or_else(fixtures::starter_diagram);
        let mut app = Self {
            diagram,
            interaction: EdgeInteraction::default(),
            folder,
            record_id,
            record_name,
            focused_table: None,
            pending_source: None,
            node_serial: 0,
            edge_serial: 0,
            dirty: false,
            scroll: (0, 0),
            toast: None,
            should_quit: false,
        };
        app.focused_table = app.diagram.nodes().keys().next().cloned();
        Ok(app)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.cancel(),
            KeyCode::Tab => self.cycle_table(),
            KeyCode::Char('e') => self.cycle_edge(),
            KeyCode::Up => self.move_or_scroll(0.0, -CELL_HEIGHT),
            KeyCode::Down => self.move_or_scroll(0.0, CELL_HEIGHT),
            KeyCode::Left => self.move_or_scroll(-CELL_WIDTH, 0.0),
            KeyCode::Right => self.move_or_scroll(CELL_WIDTH, 0.0),
            KeyCode::Char('n') => self.add_table(),
            KeyCode::Char('x') => self.remove_focused_table(),
            KeyCode::Char('c') => self.connect_step(),
            KeyCode::Char('1') => self.control(ControlAction::SetKind(RelationKind::OneToOne)),
            KeyCode::Char('2') => self.control(ControlAction::SetKind(RelationKind::OneToMany)),
            KeyCode::Char('3') => self.control(ControlAction::SetKind(RelationKind::ManyToMany)),
            KeyCode::Char('d') => self.control(ControlAction::Delete),
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
    }

    fn cancel(&mut self) {
        if self.pending_source.take().is_some() {
            self.set_toast("Connect cancelled");
        } else {
            self.interaction.clear_selection();
        }
    }

    fn cycle_table(&mut self) {
        let ids = self.diagram.nodes().keys().cloned().collect::<Vec<_>>();
        if ids.is_empty() {
            self.focused_table = None;
            return;
        }
        let next = match &self.focused_table {
            None => 0,
            Some(current) => ids
                .iter()
                .position(|id| id == current)
                .map(|idx| (idx + 1) % ids.len())
                .unwrap_or(0),
        };
        self.focused_table = Some(ids[next].clone());
    }

    fn cycle_edge(&mut self) {
        let ids = self.diagram.edges().keys().cloned().collect::<Vec<_>>();
        if ids.is_empty() {
            self.set_toast("No edges to select");
            return;
        }
        let next = match self.interaction.selected() {
            None => Some(0),
            Some(current) => ids
                .iter()
                .position(|id| id == current)
                .map(|idx| idx + 1)
                .filter(|idx| *idx < ids.len()),
        };
        match next {
            Some(idx) => self.interaction.click(&ids[idx]),
            None => self.interaction.clear_selection(),
        }
    }

    /// Arrow keys move the focused table one render cell; with no table
    /// focused they scroll the viewport instead.
    fn move_or_scroll(&mut self, dx: f64, dy: f64) {
        let Some(node_id) = self.focused_table.clone() else {
            let (row, col) = self.scroll;
            self.scroll = (
                if dy < 0.0 { row.saturating_sub(1) } else if dy > 0.0 { row + 1 } else { row },
                if dx < 0.0 { col.saturating_sub(1) } else if dx > 0.0 { col + 1 } else { col },
            );
            return;
        };
        let Some(table) = self.diagram.nodes().get(&node_id) else {
            return;
        };
        let position = table.position();
        self.apply(vec![Op::MoveTable {
            node_id,
            position: Point::new(position.x + dx, position.y + dy),
        }]);
    }

    fn add_table(&mut self) {
        let Some(node_id) = fresh_node_id(&self.diagram, &mut self.node_serial) else {
            return;
        };
        let position = self
            .focused_table
            .as_ref()
            .and_then(|id| self.diagram.nodes().get(id))
            .map(|table| {
                let at = table.position();
                Point::new(at.x + 300.0, at.y)
            })
            .unwrap_or_else(|| Point::new(50.0, 50.0));
        if self.apply(vec![Op::AddTable {
            node_id: node_id.clone(),
            name: "new_table".to_owned(),
            position,
        }]) {
            self.focused_table = Some(node_id);
        }
    }

    fn remove_focused_table(&mut self) {
        let Some(node_id) = self.focused_table.clone() else {
            self.set_toast("No table focused");
            return;
        };
        if self.apply(vec![Op::RemoveTable { node_id }]) {
            self.focused_table = self.diagram.nodes().keys().next().cloned();
        }
    }

    /// First `c` marks the focused table as the source; the second one
    /// connects source to the (then) focused table.
    fn connect_step(&mut self) {
        let Some(target) = self.focused_table.clone() else {
            self.set_toast("No table focused");
            return;
        };
        match self.pending_source.take() {
            None => {
                self.set_toast(format!("Connect from {target}: focus a target, press c"));
                self.pending_source = Some(target);
            }
            Some(source) if source == target => {
                self.set_toast("Connect cancelled (same table)");
            }
            Some(source) => {
                let Some(edge_id) = fresh_edge_id(&self.diagram, &mut self.edge_serial) else {
                    return;
                };
                if self.apply(vec![Op::Connect {
                    edge_id: edge_id.clone(),
                    source_node_id: source,
                    target_node_id: target,
                    source_anchor: Some("right:0".to_owned()),
                    target_anchor: Some("left:0".to_owned()),
                }]) {
                    self.interaction.click(&edge_id);
                }
            }
        }
    }

    fn control(&mut self, action: ControlAction) {
        match self.interaction.control_action(action) {
            Some(op) => {
                self.apply(vec![op]);
            }
            None => self.set_toast("No edge selected"),
        }
    }

    fn save(&mut self) {
        let Some(folder) = self.folder.clone() else {
            self.set_toast("No diagram folder configured");
            return;
        };
        let payload = SavePayload {
            id: self.record_id.clone(),
            name: self.record_name.clone(),
            diagram: self.diagram.clone(),
        };
        match folder.save_diagram(&payload) {
            Ok(id) => {
                self.set_toast(format!("Saved {id}"));
                self.record_id = Some(id);
                self.dirty = false;
                self.interaction.mark_saved();
            }
            Err(err) => self.set_toast(format!("Save failed: {err}")),
        }
    }

    fn apply(&mut self, ops: Vec<Op>) -> bool {
        let base_rev = self.diagram.rev();
        match apply_ops(&mut self.diagram, base_rev, &ops) {
            Ok(result) => {
                for object in &result.delta.removed {
                    if let DiagramObject::Edge(edge_id) = object {
                        self.interaction.note_removed(edge_id);
                    }
                }
                self.dirty = true;
                true
            }
            Err(err) => {
                self.set_toast(err.to_string());
                false
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

fn fresh_node_id(diagram: &Diagram, serial: &mut u64) -> Option<NodeId> {
    loop {
        *serial += 1;
        let candidate = NodeId::new(format!("n:t{serial}")).ok()?;
        if !diagram.nodes().contains_key(&candidate) {
            return Some(candidate);
        }
    }
}

fn fresh_edge_id(diagram: &Diagram, serial: &mut u64) -> Option<EdgeId> {
    loop {
        *serial += 1;
        let candidate = EdgeId::new(format!("e:r{serial}")).ok()?;
        if !diagram.edges().contains_key(&candidate) {
            return Some(candidate);
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());

    let title = if app.dirty {
        format!(" {} * ", app.record_name)
    } else {
        format!(" {} ", app.record_name)
    };

    let body = match render_diagram(&app.diagram, app.interaction.selected()) {
        Ok(render) => {
            let mut accents = Vec::new();
            if let Some(node_id) = &app.focused_table {
                accents.push((DiagramObject::Table(node_id.clone()), FOCUS_COLOR));
            }
            if let Some(edge_id) = app.interaction.selected() {
                accents.push((DiagramObject::Edge(edge_id.clone()), SELECTION_COLOR));
            }
            styled_text(&render, &accents)
        }
        Err(err) => Text::raw(format!("render failed: {err}")),
    };

    let diagram = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll(app.scroll);
    frame.render_widget(diagram, layout[0]);

    let toast_snapshot = app
        .toast
        .as_ref()
        .map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => Some(message),
        Some(_) => {
            app.toast = None;
            None
        }
        None => None,
    };
    frame.render_widget(Paragraph::new(footer_line(toast_suffix)), layout[1]);
}

fn footer_line(toast: Option<String>) -> Line<'static> {
    if let Some(message) = toast {
        return Line::from(Span::styled(message, Style::default().fg(Color::White)));
    }
    let hints = [
        ("Tab", "table"),
        ("↑↓←→", "move"),
        ("n", "new"),
        ("x", "drop"),
        ("c", "connect"),
        ("e", "edge"),
        ("1/2/3", "kind"),
        ("d", "delete"),
        ("s", "save"),
        ("q", "quit"),
    ];
    let mut spans = Vec::new();
    for (idx, (key, label)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(FOOTER_KEY_COLOR),
        ));
        spans.push(Span::styled(
            (*label).to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    Line::from(spans)
}

/// Turns an annotated render into styled lines, coloring the spans of each
/// accented object. Span columns are character offsets into trimmed lines, so
/// out-of-range spans are clipped rather than panicking.
fn styled_text(render: &AnnotatedRender, accents: &[(DiagramObject, Color)]) -> Text<'static> {
    let mut per_line: BTreeMap<usize, Vec<(usize, usize, Color)>> = BTreeMap::new();
    for (object, color) in accents {
        if let Some(spans) = render.highlight_index.get(object) {
            for &(line, start, end) in spans {
                per_line.entry(line).or_default().push((start, end, *color));
            }
        }
    }

    let mut lines = Vec::new();
    for (idx, raw) in render.text.lines().enumerate() {
        let Some(line_accents) = per_line.get(&idx) else {
            lines.push(Line::raw(raw.to_owned()));
            continue;
        };
        let mut line_accents = line_accents.clone();
        line_accents.sort_by_key(|&(start, _, _)| start);

        let chars = raw.chars().collect::<Vec<_>>();
        let mut spans = Vec::new();
        let mut cursor = 0usize;
        for (start, end, color) in line_accents {
            let start = start.min(chars.len()).max(cursor);
            let end = end.min(chars.len());
            if start > cursor {
                spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
                cursor = start;
            }
            if end > cursor {
                spans.push(Span::styled(
                    chars[cursor..end].iter().collect::<String>(),
                    Style::default().fg(color),
                ));
                cursor = end;
            }
        }
        if cursor < chars.len() {
            spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
        }
        lines.push(Line::from(spans));
    }
    Text::from(lines)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
