//! Integration tests for board editing through `BoardController`.
//!
//! Walks the user-level flows: reordering tasks within a column, moving a
//! task into a newly created column, and deleting columns with their
//! tasks, checking what ends up persisted along the way.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tackboard::board::{BoardController, BoardError, SequentialIds};
use tackboard::storage::{Discard, MemoryStore, SyncWriter, load_snapshot};
use tackboard_proto::{BoardSnapshot, Column, EntityKind, Format, Id, Task};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn id(raw: &str) -> Id {
    Id::from(raw)
}

/// One "Todo" column holding tasks A and B.
fn starting_board() -> BoardSnapshot {
    BoardSnapshot {
        columns: vec![Column::new("c1", "Todo")],
        tasks: vec![Task::new("t1", "c1", "A"), Task::new("t2", "c1", "B")],
    }
}

/// Controller whose generated ids are `c1`, `c2`, ... minus any live ones.
fn persisted_board() -> BoardController<SyncWriter<MemoryStore>, SequentialIds> {
    BoardController::new(
        starting_board(),
        SyncWriter::new(MemoryStore::new(), Format::Json),
        SequentialIds::new("c"),
    )
}

fn stored(board: &BoardController<SyncWriter<MemoryStore>, SequentialIds>) -> BoardSnapshot {
    load_snapshot(board.sink().store(), Format::Json)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn drag_second_task_onto_first() {
    let mut board = persisted_board();

    assert!(board.begin_drag(EntityKind::Task, &id("t2")));
    assert!(board.drop(&id("t1")));

    assert_eq!(
        board.tasks().to_vec(),
        vec![Task::new("t2", "c1", "B"), Task::new("t1", "c1", "A")]
    );
    assert!(!board.drag().is_active());
    assert_eq!(stored(&board).tasks, board.tasks().to_vec());
}

#[test]
fn move_task_into_new_column() {
    let mut board = persisted_board();

    let created = board.create_column();
    assert_eq!(created, id("c2"));
    assert_eq!(
        board.columns().to_vec(),
        vec![Column::new("c1", "Todo"), Column::new("c2", "Column 2")]
    );

    assert!(board.begin_drag(EntityKind::Task, &id("t1")));
    assert!(board.drop(&id("c2")));

    assert_eq!(board.task(&id("t1")).unwrap().column_id, id("c2"));
    assert_eq!(board.tasks_in(&id("c2")).last().unwrap().id, id("t1"));
    assert_eq!(stored(&board), board.snapshot());
}

#[test]
fn delete_only_column() {
    let mut board = persisted_board();
    board.delete_column(&id("c1"));

    assert!(board.columns().is_empty());
    assert!(board.tasks().iter().all(|task| task.column_id != id("c1")));
    // Nothing left to store: both keys are gone.
    assert!(stored(&board).is_empty());
}

#[test]
fn delete_column_after_moving_a_task_out() {
    let mut board = persisted_board();
    board.create_column();
    board.begin_drag(EntityKind::Task, &id("t1"));
    board.drop(&id("c2"));

    board.delete_column(&id("c1"));

    assert_eq!(board.columns().to_vec(), vec![Column::new("c2", "Column 2")]);
    assert_eq!(board.tasks().to_vec(), vec![Task::new("t1", "c2", "A")]);
    assert_eq!(stored(&board), board.snapshot());
}

#[test]
fn every_persisted_state_is_free_of_orphans() {
    let snapshot = BoardSnapshot {
        columns: vec![Column::new("c1", "Todo"), Column::new("c2", "Done")],
        tasks: vec![
            Task::new("t1", "c1", "A"),
            Task::new("t2", "c2", "B"),
            Task::new("t3", "c1", "C"),
        ],
    };
    let mut board = BoardController::new(
        snapshot,
        SyncWriter::new(MemoryStore::new(), Format::Json),
        SequentialIds::new("n"),
    );

    board.delete_column(&id("c1"));
    let saved = stored(&board);
    assert_eq!(saved.columns, vec![Column::new("c2", "Done")]);
    assert_eq!(saved.tasks, vec![Task::new("t2", "c2", "B")]);
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn drop_without_drag_changes_nothing() {
    let mut board = BoardController::new(starting_board(), Discard, SequentialIds::new("n"));
    assert!(!board.drop(&id("t1")));
    assert_eq!(board.snapshot(), starting_board());
}

#[test]
fn drag_of_deleted_task_is_dropped_silently() {
    let mut board = BoardController::new(starting_board(), Discard, SequentialIds::new("n"));
    board.begin_drag(EntityKind::Task, &id("t2"));
    board.delete_task(&id("t2"));

    assert!(!board.drop(&id("t1")));
    assert!(!board.drag().is_active());
    assert_eq!(board.tasks().to_vec(), vec![Task::new("t1", "c1", "A")]);
}

#[test]
fn task_for_missing_column_is_rejected() {
    let mut board = persisted_board();
    assert_eq!(
        board.create_task(&id("c9")),
        Err(BoardError::ColumnNotFound(id("c9")))
    );
    assert_eq!(board.tasks().len(), 2);
    // No mutation happened yet, so nothing was written.
    assert!(board.sink().store().is_empty());
}

#[test]
fn new_tasks_get_default_content_and_fresh_ids() {
    let mut board = persisted_board();
    let first = board.create_task(&id("c1")).unwrap();
    let second = board.create_task(&id("c1")).unwrap();

    assert_ne!(first, second);
    assert_eq!(board.task(&first).unwrap().content, "Task 3");
    assert_eq!(board.task(&second).unwrap().content, "Task 4");
    let c1 = id("c1");
    let order: Vec<&str> = board.tasks_in(&c1).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, ["t1", "t2", first.as_str(), second.as_str()]);
}

#[test]
fn loaded_board_is_repaired() {
    let snapshot = BoardSnapshot {
        columns: vec![Column::new("c1", "Todo"), Column::new("c1", "Dup")],
        tasks: vec![Task::new("t1", "c1", "A"), Task::new("t2", "gone", "B")],
    };
    let board = BoardController::new(snapshot, Discard, SequentialIds::new("n"));
    assert_eq!(board.columns().to_vec(), vec![Column::new("c1", "Todo")]);
    assert_eq!(board.tasks().to_vec(), vec![Task::new("t1", "c1", "A")]);
}
