//! Drop resolution: turns a finished drag into the next board sequences.
//!
//! [`reorder`] is pure. Any reference it cannot resolve (the dragged entity
//! or the target was deleted mid-gesture, the pointer landed on empty space,
//! a column was dropped onto a task) degrades to returning the inputs
//! untouched. Unchanged outputs share storage with the inputs, so
//! [`Reordered::changed`] is exact.

use tackboard_proto::{Column, EntityKind, Id, Task};

use super::drag::DragSession;
use super::ordered::{OrderedStore, Placement};

/// Result of resolving a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reordered {
    /// Column sequence after the drop.
    pub columns: OrderedStore<Column>,
    /// Task sequence after the drop.
    pub tasks: OrderedStore<Task>,
    /// Whether either sequence differs from the input.
    pub changed: bool,
}

/// Resolves dropping the active drag of `session` onto `target`.
///
/// * Column drags only respond to other columns: the dragged column takes
///   the target's slot and the columns in between shift by one.
/// * Task drags onto a task move the dragged task into the target's column,
///   immediately before the target.
/// * Task drags onto a column move the task into that column, after every
///   other task.
#[must_use]
pub fn reorder(
    columns: &OrderedStore<Column>,
    tasks: &OrderedStore<Task>,
    session: &DragSession,
    target: &Id,
) -> Reordered {
    let Some(drag) = session.active() else {
        tracing::debug!(drop_target = %target, "drop without an active drag ignored");
        return unchanged(columns, tasks);
    };
    if &drag.id == target {
        return unchanged(columns, tasks);
    }

    let (next_columns, next_tasks) = match drag.kind {
        EntityKind::Column => (move_column(columns.clone(), &drag.id, target), tasks.clone()),
        EntityKind::Task => (
            columns.clone(),
            move_task(columns, tasks.clone(), &drag.id, target),
        ),
    };

    let changed = !next_columns.same_as(columns) || !next_tasks.same_as(tasks);
    if !changed {
        tracing::debug!(
            kind = %drag.kind,
            id = %drag.id,
            drop_target = %target,
            "drop left the board unchanged"
        );
    }
    Reordered {
        columns: next_columns,
        tasks: next_tasks,
        changed,
    }
}

fn unchanged(columns: &OrderedStore<Column>, tasks: &OrderedStore<Task>) -> Reordered {
    Reordered {
        columns: columns.clone(),
        tasks: tasks.clone(),
        changed: false,
    }
}

/// Moves column `active` into the slot held by column `target`.
fn move_column(columns: OrderedStore<Column>, active: &Id, target: &Id) -> OrderedStore<Column> {
    let (Some(from), Some(to)) = (columns.position(active), columns.position(target)) else {
        return columns;
    };
    // Moving right lands after the target, moving left lands before it.
    let anchor = if to < from {
        Some(target.clone())
    } else {
        columns.as_slice().get(to + 1).map(|next| next.id.clone())
    };
    let placement = anchor.as_ref().map_or(Placement::End, Placement::Before);
    columns.move_to(active, placement)
}

/// Moves task `active` onto `target`, which may be a task or a column.
fn move_task(
    columns: &OrderedStore<Column>,
    tasks: OrderedStore<Task>,
    active: &Id,
    target: &Id,
) -> OrderedStore<Task> {
    if !tasks.contains(active) {
        return tasks;
    }

    if let Some(destination) = tasks.get(target).map(|task| task.column_id.clone()) {
        return tasks
            .update_by_id(active, |task| task.column_id = destination)
            .move_to(active, Placement::Before(target));
    }

    if columns.contains(target) {
        return tasks
            .update_by_id(active, |task| task.column_id = target.clone())
            .move_to(active, Placement::End);
    }

    tasks
}
