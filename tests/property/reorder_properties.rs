//! Property-based tests for drop resolution.
//!
//! Uses proptest to verify, over random boards:
//! 1. Dropping an entity onto itself changes nothing.
//! 2. A column move lands in the target's slot and keeps every other
//!    column in order.
//! 3. A task dropped onto an empty column joins it as its last task.
//! 4. A task dropped onto a task ends up directly before it, and no other
//!    task moves relative to the rest.
//! 5. Drops without an active drag change nothing.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use proptest::sample::Index;
use tackboard::board::{DragSession, OrderedStore, reorder};
use tackboard_proto::{Column, EntityKind, Id, Task};

// --- Helpers ---

#[derive(Debug, Clone)]
struct Board {
    columns: OrderedStore<Column>,
    tasks: OrderedStore<Task>,
}

/// Columns `c0..cN`, tasks `t0..tM` spread randomly over them.
fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..6)
        .prop_flat_map(|n| (Just(n), prop::collection::vec(0..n, 0..20)))
        .prop_map(|(n, owners)| Board {
            columns: OrderedStore::from_vec(
                (0..n)
                    .map(|i| Column::new(format!("c{i}"), format!("Column {i}")))
                    .collect(),
            ),
            tasks: OrderedStore::from_vec(
                owners
                    .iter()
                    .enumerate()
                    .map(|(i, owner)| Task::new(format!("t{i}"), format!("c{owner}"), "x"))
                    .collect(),
            ),
        })
}

fn dragging(kind: EntityKind, id: &Id) -> DragSession {
    let mut session = DragSession::default();
    session.begin(kind, id.clone());
    session
}

fn ids<T: tackboard_proto::Identified>(items: &[T]) -> Vec<Id> {
    items.iter().map(|item| item.id().clone()).collect()
}

fn without(order: &[Id], id: &Id) -> Vec<Id> {
    order.iter().filter(|other| *other != id).cloned().collect()
}

// --- Property tests ---

proptest! {
    #[test]
    fn self_drop_is_noop(board in arb_board(), pick in any::<Index>()) {
        let column = pick.get(board.columns.as_slice()).id.clone();
        let out = reorder(
            &board.columns,
            &board.tasks,
            &dragging(EntityKind::Column, &column),
            &column,
        );
        prop_assert!(!out.changed);
        prop_assert_eq!(&out.columns, &board.columns);
        prop_assert_eq!(&out.tasks, &board.tasks);

        if !board.tasks.is_empty() {
            let task = pick.get(board.tasks.as_slice()).id.clone();
            let out = reorder(&board.columns, &board.tasks, &dragging(EntityKind::Task, &task), &task);
            prop_assert!(!out.changed);
            prop_assert_eq!(&out.tasks, &board.tasks);
        }
    }

    #[test]
    fn column_move_takes_target_slot(
        board in arb_board(),
        active in any::<Index>(),
        target in any::<Index>(),
    ) {
        let before = ids(board.columns.as_slice());
        let from = active.index(before.len());
        let to = target.index(before.len());
        prop_assume!(from != to);

        let out = reorder(
            &board.columns,
            &board.tasks,
            &dragging(EntityKind::Column, &before[from]),
            &before[to],
        );
        let after = ids(out.columns.as_slice());

        prop_assert!(out.changed);
        prop_assert_eq!(&after[to], &before[from]);
        prop_assert_eq!(without(&after, &before[from]), without(&before, &before[from]));
        prop_assert!(out.tasks.same_as(&board.tasks));
    }

    #[test]
    fn task_onto_empty_column_appends(board in arb_board(), pick in any::<Index>()) {
        prop_assume!(!board.tasks.is_empty());
        let task = pick.get(board.tasks.as_slice()).id.clone();

        // A fresh column is always empty.
        let columns = board
            .columns
            .clone()
            .insert_at_end(Column::new("empty", "Empty"));
        let empty = Id::from("empty");
        let out = reorder(&columns, &board.tasks, &dragging(EntityKind::Task, &task), &empty);

        let moved = out.tasks.get(&task).unwrap();
        prop_assert_eq!(&moved.column_id, &empty);
        prop_assert_eq!(&out.tasks.as_slice().last().unwrap().id, &task);
        let view: Vec<&Id> = out.tasks.filter(|t| t.column_id == empty).iter().map(|t| &t.id).collect();
        prop_assert_eq!(view, vec![&task]);

        let before = ids(board.tasks.as_slice());
        let after = ids(out.tasks.as_slice());
        prop_assert_eq!(without(&after, &task), without(&before, &task));
    }

    #[test]
    fn task_onto_task_lands_before_it(
        board in arb_board(),
        active in any::<Index>(),
        target in any::<Index>(),
    ) {
        prop_assume!(board.tasks.len() >= 2);
        let before = ids(board.tasks.as_slice());
        let (from, to) = (active.index(before.len()), target.index(before.len()));
        prop_assume!(from != to);
        let (dragged, onto) = (&before[from], &before[to]);
        let destination = board.tasks.get(onto).unwrap().column_id.clone();

        let out = reorder(&board.columns, &board.tasks, &dragging(EntityKind::Task, dragged), onto);
        let after = ids(out.tasks.as_slice());

        let dragged_at = out.tasks.position(dragged).unwrap();
        let onto_at = out.tasks.position(onto).unwrap();
        prop_assert_eq!(dragged_at + 1, onto_at);
        prop_assert_eq!(&out.tasks.get(dragged).unwrap().column_id, &destination);
        prop_assert_eq!(without(&after, dragged), without(&before, dragged));

        // Every other task keeps its column.
        for task in out.tasks.iter().filter(|t| &t.id != dragged) {
            prop_assert_eq!(&task.column_id, &board.tasks.get(&task.id).unwrap().column_id);
        }
        prop_assert!(out.columns.same_as(&board.columns));
    }

    #[test]
    fn idle_drop_is_noop(board in arb_board(), pick in any::<Index>()) {
        let target = pick.get(board.columns.as_slice()).id.clone();
        let out = reorder(&board.columns, &board.tasks, &DragSession::Idle, &target);
        prop_assert!(!out.changed);
        prop_assert!(out.columns.same_as(&board.columns));
        prop_assert!(out.tasks.same_as(&board.tasks));
    }
}
