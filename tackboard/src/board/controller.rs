//! Board owner: CRUD edits, drag gestures, and persistence hand-off.

use std::collections::HashSet;

use tackboard_proto::{BoardSnapshot, Column, EntityKind, Id, Identified, Task};

use super::BoardError;
use super::drag::DragSession;
use super::ids::{IdGenerator, UuidIds};
use super::ordered::{Filtered, OrderedStore};
use super::reorder::reorder;
use crate::storage::SnapshotSink;

/// Owns the column and task sequences plus the drag session.
///
/// Every operation runs to completion synchronously. Operations that change
/// the board hand the new [`BoardSnapshot`] to the sink; no-ops do not.
#[derive(Debug)]
pub struct BoardController<S, G = UuidIds> {
    columns: OrderedStore<Column>,
    tasks: OrderedStore<Task>,
    drag: DragSession,
    ids: G,
    sink: S,
}

impl<S: SnapshotSink, G: IdGenerator> BoardController<S, G> {
    /// Builds a controller from a (possibly persisted) snapshot.
    ///
    /// Duplicate ids keep their first occurrence and tasks pointing at a
    /// missing column are dropped, so the board starts out consistent.
    pub fn new(snapshot: BoardSnapshot, sink: S, ids: G) -> Self {
        let (columns, tasks) = repair(snapshot);
        tracing::debug!(
            columns = columns.len(),
            tasks = tasks.len(),
            "board loaded"
        );
        Self {
            columns,
            tasks,
            drag: DragSession::default(),
            ids,
            sink,
        }
    }

    // -- Reads --

    /// Columns in display order.
    #[must_use]
    pub const fn columns(&self) -> &OrderedStore<Column> {
        &self.columns
    }

    /// Every task, in the flat order that decides in-column order.
    #[must_use]
    pub const fn tasks(&self) -> &OrderedStore<Task> {
        &self.tasks
    }

    /// Tasks of one column, in display order.
    #[must_use]
    pub fn tasks_in<'a>(
        &'a self,
        column_id: &'a Id,
    ) -> Filtered<'a, Task, impl Fn(&Task) -> bool + 'a> {
        self.tasks.filter(move |task| &task.column_id == column_id)
    }

    /// Current drag session.
    #[must_use]
    pub const fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, id: &Id) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Looks up a task.
    #[must_use]
    pub fn task(&self, id: &Id) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Copies the board out for persistence or inspection.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self.columns.to_vec(),
            tasks: self.tasks.to_vec(),
        }
    }

    /// The persistence sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    // -- Columns --

    /// Appends a column titled `Column {n}` and returns its id.
    pub fn create_column(&mut self) -> Id {
        let id = self.fresh_id();
        let title = format!("Column {}", self.columns.len() + 1);
        let columns = self
            .columns
            .clone()
            .insert_at_end(Column::new(id.clone(), title));
        self.commit(columns, self.tasks.clone());
        tracing::debug!(id = %id, "column created");
        id
    }

    /// Removes a column together with every task in it.
    pub fn delete_column(&mut self, id: &Id) {
        let columns = self.columns.clone().remove_by_id(id);
        let tasks = self.tasks.clone().retain(|task| &task.column_id != id);
        if self.commit(columns, tasks) {
            tracing::debug!(id = %id, "column deleted");
        }
    }

    /// Sets a column's title. Unknown ids are ignored.
    pub fn rename_column(&mut self, id: &Id, title: &str) {
        let columns = self
            .columns
            .clone()
            .update_by_id(id, |column| title.clone_into(&mut column.title));
        self.commit(columns, self.tasks.clone());
    }

    // -- Tasks --

    /// Appends a task titled `Task {n}` to `column_id` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnNotFound`] if the column does not exist;
    /// the board is left unchanged.
    pub fn create_task(&mut self, column_id: &Id) -> Result<Id, BoardError> {
        if !self.columns.contains(column_id) {
            return Err(BoardError::ColumnNotFound(column_id.clone()));
        }
        let id = self.fresh_id();
        let content = format!("Task {}", self.tasks.len() + 1);
        let tasks = self
            .tasks
            .clone()
            .insert_at_end(Task::new(id.clone(), column_id.clone(), content));
        self.commit(self.columns.clone(), tasks);
        tracing::debug!(id = %id, column = %column_id, "task created");
        Ok(id)
    }

    /// Removes a task. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: &Id) {
        let tasks = self.tasks.clone().remove_by_id(id);
        self.commit(self.columns.clone(), tasks);
    }

    /// Sets a task's content. Unknown ids are ignored.
    pub fn edit_task(&mut self, id: &Id, content: &str) {
        let tasks = self
            .tasks
            .clone()
            .update_by_id(id, |task| content.clone_into(&mut task.content));
        self.commit(self.columns.clone(), tasks);
    }

    /// Removes every column and task.
    pub fn clear(&mut self) {
        if self.columns.is_empty() && self.tasks.is_empty() {
            return;
        }
        self.drag.end();
        self.commit(OrderedStore::new(), OrderedStore::new());
        tracing::info!("board cleared");
    }

    // -- Gestures --

    /// Starts dragging the entity `id` of `kind`.
    ///
    /// Any earlier session ends first. Returns `false`, with no drag
    /// active, if no such entity exists.
    pub fn begin_drag(&mut self, kind: EntityKind, id: &Id) -> bool {
        let exists = match kind {
            EntityKind::Column => self.columns.contains(id),
            EntityKind::Task => self.tasks.contains(id),
        };
        if !exists {
            tracing::debug!(%kind, id = %id, "drag on unknown entity refused");
            self.cancel_drag();
            return false;
        }
        self.drag.begin(kind, id.clone());
        true
    }

    /// Records the entity under the pointer. Only affects highlighting.
    pub fn drag_over(&mut self, target: Option<&Id>) {
        self.drag.hover(target.cloned());
    }

    /// Drops the dragged entity onto `target` and ends the session.
    ///
    /// Returns whether the board changed.
    pub fn drop(&mut self, target: &Id) -> bool {
        let next = reorder(&self.columns, &self.tasks, &self.drag, target);
        self.drag.end();
        self.commit(next.columns, next.tasks)
    }

    /// Abandons the drag in progress without touching the board.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.end() {
            tracing::debug!(kind = %drag.kind, id = %drag.id, "drag cancelled");
        }
    }

    // -- Internals --

    /// Installs the next sequences, persisting them if either changed.
    fn commit(&mut self, columns: OrderedStore<Column>, tasks: OrderedStore<Task>) -> bool {
        let changed = !columns.same_as(&self.columns) || !tasks.same_as(&self.tasks);
        self.columns = columns;
        self.tasks = tasks;
        if changed {
            self.sink.submit(self.snapshot());
        }
        changed
    }

    /// Draws ids until one is not held by a live entity.
    fn fresh_id(&mut self) -> Id {
        loop {
            let id = self.ids.generate();
            if !self.columns.contains(&id) && !self.tasks.contains(&id) {
                return id;
            }
            tracing::debug!(id = %id, "generated id already live, drawing again");
        }
    }
}

/// Drops duplicate ids (first wins) and orphaned tasks.
fn repair(snapshot: BoardSnapshot) -> (OrderedStore<Column>, OrderedStore<Task>) {
    let BoardSnapshot { columns, tasks } = snapshot;
    let (column_count, task_count) = (columns.len(), tasks.len());

    let columns = dedupe(columns);
    let column_ids: HashSet<&Id> = columns.iter().map(Identified::id).collect();
    let tasks: Vec<Task> = dedupe(tasks)
        .into_iter()
        .filter(|task| column_ids.contains(&task.column_id))
        .collect();

    let discarded = (column_count - columns.len()) + (task_count - tasks.len());
    if discarded > 0 {
        tracing::warn!(discarded, "dropped duplicate or orphaned board entries");
    }
    (OrderedStore::from_vec(columns), OrderedStore::from_vec(tasks))
}

fn dedupe<T: Identified>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect()
}
