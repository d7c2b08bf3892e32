//! Application state and terminal event handling.
//!
//! Turns raw key and mouse events into board operations. A left-button
//! press on a column header or task arms a gesture; it becomes a drag once
//! the pointer has travelled the activation distance, and otherwise counts
//! as a click that opens the entity for editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tackboard_proto::{EntityKind, Id};

use crate::board::{BoardController, IdGenerator, UuidIds};
use crate::storage::SnapshotSink;
use crate::ui::layout::{BoardLayout, Hit, board_area};

/// Entity whose text is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// A column title.
    Column(Id),
    /// A task's content.
    Task(Id),
}

impl EditTarget {
    /// Id of the edited entity.
    #[must_use]
    pub const fn id(&self) -> &Id {
        match self {
            Self::Column(id) | Self::Task(id) => id,
        }
    }
}

/// In-progress text edit with a cursor counted in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    /// What the text will be applied to.
    pub target: EditTarget,
    buffer: String,
    cursor: usize,
}

impl Editor {
    fn new(target: EditTarget, text: &str) -> Self {
        Self {
            target,
            buffer: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position, in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` if this edit targets `id`.
    #[must_use]
    pub fn is_editing(&self, id: &Id) -> bool {
        self.target.id() == id
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.buffer.remove(at);
    }

    fn delete(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let at = self.byte_index();
            self.buffer.remove(at);
        }
    }

    const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    fn end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }
}

/// Left-button state between press and release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Pointer {
    #[default]
    Idle,
    /// Pressed on a draggable entity; not yet past the activation distance.
    Pressed {
        kind: EntityKind,
        id: Id,
        origin: (u16, u16),
    },
}

/// Application state.
#[derive(Debug)]
pub struct App<S, G = UuidIds> {
    /// The board being edited.
    pub board: BoardController<S, G>,
    /// Open text edit, if any.
    pub editor: Option<Editor>,
    /// Whether the app should quit.
    pub should_quit: bool,
    pointer: Pointer,
    viewport: Rect,
    column_width: u16,
    drag_threshold: u16,
}

impl<S: SnapshotSink, G: IdGenerator> App<S, G> {
    /// Create an app around `board` with default geometry.
    pub const fn new(board: BoardController<S, G>) -> Self {
        Self {
            board,
            editor: None,
            should_quit: false,
            pointer: Pointer::Idle,
            viewport: Rect::ZERO,
            column_width: 32,
            drag_threshold: 3,
        }
    }

    /// Set the on-screen column width.
    #[must_use]
    pub const fn with_column_width(mut self, width: u16) -> Self {
        self.column_width = width;
        self
    }

    /// Set the pointer travel needed before a press becomes a drag.
    #[must_use]
    pub const fn with_drag_threshold(mut self, cells: u16) -> Self {
        self.drag_threshold = cells;
        self
    }

    /// Record the terminal area the board is drawn into.
    pub const fn resize(&mut self, screen: Rect) {
        self.viewport = screen;
    }

    /// Geometry of the board as currently drawn.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        BoardLayout::compute(
            board_area(self.viewport),
            self.board.columns(),
            self.board.tasks(),
            self.column_width,
        )
    }

    /// Returns `true` while a press is waiting to turn into a drag or click.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pointer != Pointer::Idle
    }

    // -- Keyboard --

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.editor.is_some() {
            self.handle_edit_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') => {
                self.board.create_column();
            }
            KeyCode::Esc => {
                self.pointer = Pointer::Idle;
                self.board.cancel_drag();
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let line_break = key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);
        match key.code {
            // Task content may span lines; column titles may not.
            KeyCode::Enter if line_break && matches!(editor.target, EditTarget::Task(_)) => {
                editor.insert('\n');
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => self.editor = None,
            KeyCode::Char(c) => editor.insert(c),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Delete => editor.delete(),
            KeyCode::Left => editor.left(),
            KeyCode::Right => editor.right(),
            KeyCode::Home => editor.cursor = 0,
            KeyCode::End => editor.end(),
            _ => {}
        }
    }

    /// Apply the open edit to the board and close the editor.
    fn commit_edit(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        match &editor.target {
            EditTarget::Column(id) => self.board.rename_column(id, &editor.buffer),
            EditTarget::Task(id) => self.board.edit_task(id, &editor.buffer),
        }
    }

    fn start_edit(&mut self, kind: EntityKind, id: &Id) {
        self.editor = match kind {
            EntityKind::Column => self
                .board
                .column(id)
                .map(|column| Editor::new(EditTarget::Column(id.clone()), &column.title)),
            EntityKind::Task => self
                .board
                .task(id)
                .map(|task| Editor::new(EditTarget::Task(id.clone()), &task.content)),
        };
    }

    // -- Mouse --

    /// Handle a mouse event. Only the left button is used.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(x, y),
            MouseEventKind::Drag(MouseButton::Left) => self.motion(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.release(x, y),
            _ => {}
        }
    }

    fn press(&mut self, x: u16, y: u16) {
        // A drag still active here lost its release outside the terminal.
        if self.board.drag().is_active() {
            self.board.cancel_drag();
        }
        self.pointer = Pointer::Idle;

        let hit = self.layout().hit_test(x, y);

        // Clicking anywhere else ends the edit, like losing focus.
        let inside_edit = hit.as_ref().and_then(Hit::draggable).is_some_and(|(_, id)| {
            self.editor.as_ref().is_some_and(|editor| editor.is_editing(id))
        });
        if !inside_edit {
            self.commit_edit();
        }

        match hit {
            None | Some(Hit::ColumnBody(_)) => {}
            Some(Hit::AddColumn) => {
                self.board.create_column();
            }
            Some(Hit::AddTask(column)) => {
                if let Err(e) = self.board.create_task(&column) {
                    tracing::warn!(error = %e, "could not add task");
                }
            }
            Some(Hit::DeleteColumn(id)) => self.board.delete_column(&id),
            Some(Hit::DeleteTask(id)) => self.board.delete_task(&id),
            Some(Hit::ColumnHeader(id)) => self.arm(EntityKind::Column, id, (x, y)),
            Some(Hit::Task(id)) => self.arm(EntityKind::Task, id, (x, y)),
        }
    }

    fn arm(&mut self, kind: EntityKind, id: Id, origin: (u16, u16)) {
        // The entity being edited stays put.
        if self
            .editor
            .as_ref()
            .is_some_and(|editor| editor.is_editing(&id))
        {
            return;
        }
        self.pointer = Pointer::Pressed { kind, id, origin };
    }

    fn motion(&mut self, x: u16, y: u16) {
        if let Pointer::Pressed { kind, id, origin } = &self.pointer {
            let travelled = x.abs_diff(origin.0).max(y.abs_diff(origin.1));
            if travelled < self.drag_threshold {
                return;
            }
            let (kind, id) = (*kind, id.clone());
            self.pointer = Pointer::Idle;
            if !self.board.begin_drag(kind, &id) {
                return;
            }
        }
        self.hover(x, y);
    }

    fn hover(&mut self, x: u16, y: u16) {
        let Some(kind) = self.board.drag().active().map(|drag| drag.kind) else {
            return;
        };
        let target = self.layout().drop_target(kind, x, y);
        self.board.drag_over(target.as_ref());
    }

    fn release(&mut self, x: u16, y: u16) {
        let pointer = std::mem::take(&mut self.pointer);

        if let Some(kind) = self.board.drag().active().map(|drag| drag.kind) {
            match self.layout().drop_target(kind, x, y) {
                Some(target) => {
                    self.board.drop(&target);
                }
                None => self.board.cancel_drag(),
            }
            return;
        }

        if let Pointer::Pressed { kind, id, .. } = pointer {
            self.start_edit(kind, &id);
        }
    }
}
