//! Screen geometry of the board and pointer hit-testing.
//!
//! Rendering and mouse handling share one [`BoardLayout`], so whatever is
//! drawn at a cell is exactly what a click on that cell resolves to.
//!
//! Each column is a bordered box: the first inner row is the header (title,
//! task count badge, delete glyph in the last cell), then tasks stacked as
//! three-row boxes, and the last inner row holds the "+ Add task" button.

use ratatui::layout::{Position, Rect};
use tackboard_proto::{Column, EntityKind, Id, Task};

use crate::board::OrderedStore;

/// Rows taken by one task box.
pub const TASK_HEIGHT: u16 = 3;

/// Width of the trailing "+ Add column" button.
pub const ADD_COLUMN_WIDTH: u16 = 16;

/// Blank cells between columns.
const COLUMN_GAP: u16 = 1;

/// Border, header, and add-task rows.
const COLUMN_CHROME: u16 = 4;

/// What a cell on screen belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// Column header row; pressing here starts a column drag.
    ColumnHeader(Id),
    /// Column area not covered by anything more specific.
    ColumnBody(Id),
    /// Task box; pressing here starts a task drag.
    Task(Id),
    /// Delete glyph of a column.
    DeleteColumn(Id),
    /// Delete glyph of a task.
    DeleteTask(Id),
    /// "+ Add task" button of a column.
    AddTask(Id),
    /// "+ Add column" button.
    AddColumn,
}

impl Hit {
    /// The draggable entity under the pointer, if any.
    #[must_use]
    pub fn draggable(&self) -> Option<(EntityKind, &Id)> {
        match self {
            Self::ColumnHeader(id) => Some((EntityKind::Column, id)),
            Self::Task(id) => Some((EntityKind::Task, id)),
            _ => None,
        }
    }
}

/// Placement of one task box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSlot {
    /// Task id.
    pub id: Id,
    /// Whole bordered box.
    pub area: Rect,
    /// Single content row inside the border, left of the delete glyph.
    pub content: Rect,
    /// Delete glyph cell.
    pub delete: Rect,
}

/// Placement of one column and its visible tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSlot {
    /// Column id.
    pub id: Id,
    /// Whole bordered box.
    pub area: Rect,
    /// Header text cells, left of the delete glyph.
    pub header: Rect,
    /// Delete glyph cell.
    pub delete: Rect,
    /// Visible tasks, top to bottom.
    pub tasks: Vec<TaskSlot>,
    /// Tasks that did not fit.
    pub hidden_tasks: usize,
    /// "+ Add task" row.
    pub add_task: Rect,
}

/// Geometry of every visible board element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Visible columns, left to right.
    pub columns: Vec<ColumnSlot>,
    /// "+ Add column" button, when there is room for it.
    pub add_column: Option<Rect>,
}

/// Area left for the board once the status bar row is taken.
#[must_use]
pub const fn board_area(screen: Rect) -> Rect {
    Rect {
        height: screen.height.saturating_sub(1),
        ..screen
    }
}

/// The status bar row at the bottom of the screen.
#[must_use]
pub const fn status_area(screen: Rect) -> Rect {
    Rect {
        y: screen.y + screen.height.saturating_sub(1),
        height: if screen.height > 0 { 1 } else { 0 },
        ..screen
    }
}

impl BoardLayout {
    /// Lays out `columns` left to right inside `area`, each `column_width`
    /// cells wide. Columns that do not fit are left out.
    #[must_use]
    pub fn compute(
        area: Rect,
        columns: &OrderedStore<Column>,
        tasks: &OrderedStore<Task>,
        column_width: u16,
    ) -> Self {
        let mut layout = Self::default();
        if area.height < COLUMN_CHROME {
            return layout;
        }

        let mut x = area.x;
        for column in columns {
            if x.saturating_add(column_width) > area.right() {
                break;
            }
            let rect = Rect::new(x, area.y, column_width, area.height);
            layout
                .columns
                .push(ColumnSlot::compute(rect, &column.id, tasks));
            x = x.saturating_add(column_width + COLUMN_GAP);
        }

        if x.saturating_add(ADD_COLUMN_WIDTH) <= area.right() {
            layout.add_column = Some(Rect::new(x, area.y, ADD_COLUMN_WIDTH, TASK_HEIGHT));
        }
        layout
    }

    /// Resolves the cell at (`x`, `y`).
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        let point = Position::new(x, y);
        if self.add_column.is_some_and(|rect| rect.contains(point)) {
            return Some(Hit::AddColumn);
        }

        let column = self.column_at(point)?;
        if column.delete.contains(point) {
            return Some(Hit::DeleteColumn(column.id.clone()));
        }
        if column.header.contains(point) {
            return Some(Hit::ColumnHeader(column.id.clone()));
        }
        if column.add_task.contains(point) {
            return Some(Hit::AddTask(column.id.clone()));
        }
        if let Some(task) = column.task_at(point) {
            if task.delete.contains(point) {
                return Some(Hit::DeleteTask(task.id.clone()));
            }
            return Some(Hit::Task(task.id.clone()));
        }
        Some(Hit::ColumnBody(column.id.clone()))
    }

    /// Drop target for a drag of `kind` released at (`x`, `y`).
    ///
    /// Task drags resolve to the task under the pointer, otherwise to the
    /// enclosing column. Column drags always resolve to the enclosing
    /// column, so dropping a column onto one of another column's tasks
    /// still moves it.
    #[must_use]
    pub fn drop_target(&self, kind: EntityKind, x: u16, y: u16) -> Option<Id> {
        let point = Position::new(x, y);
        let column = self.column_at(point)?;
        if kind == EntityKind::Task
            && let Some(task) = column.task_at(point)
        {
            return Some(task.id.clone());
        }
        Some(column.id.clone())
    }

    fn column_at(&self, point: Position) -> Option<&ColumnSlot> {
        self.columns.iter().find(|column| column.area.contains(point))
    }
}

impl ColumnSlot {
    fn compute(area: Rect, id: &Id, tasks: &OrderedStore<Task>) -> Self {
        let inner_x = area.x + 1;
        let inner_width = area.width.saturating_sub(2);
        let bottom = area.bottom().saturating_sub(1);
        let header_y = area.y + 1;
        let add_task_y = bottom.saturating_sub(1);

        let tasks_top = header_y + 1;
        let capacity = usize::from(add_task_y.saturating_sub(tasks_top) / TASK_HEIGHT);

        let members = tasks.filter(|task| &task.column_id == id);
        let total = members.count();
        let mut slots = Vec::with_capacity(total.min(capacity));
        let mut y = tasks_top;
        for task in members.iter().take(capacity) {
            slots.push(TaskSlot::compute(
                Rect::new(inner_x, y, inner_width, TASK_HEIGHT),
                &task.id,
            ));
            y += TASK_HEIGHT;
        }

        Self {
            id: id.clone(),
            area,
            header: Rect::new(inner_x, header_y, inner_width.saturating_sub(1), 1),
            delete: Rect::new(inner_x + inner_width.saturating_sub(1), header_y, 1, 1),
            hidden_tasks: total - slots.len(),
            tasks: slots,
            add_task: Rect::new(inner_x, add_task_y, inner_width, 1),
        }
    }

    fn task_at(&self, point: Position) -> Option<&TaskSlot> {
        self.tasks.iter().find(|task| task.area.contains(point))
    }
}

impl TaskSlot {
    fn compute(area: Rect, id: &Id) -> Self {
        let inner_width = area.width.saturating_sub(2);
        let row = area.y + 1;
        Self {
            id: id.clone(),
            area,
            content: Rect::new(area.x + 1, row, inner_width.saturating_sub(1), 1),
            delete: Rect::new(area.x + inner_width, row, 1, 1),
        }
    }
}
