//! Integration tests for board persistence.
//!
//! Covers saving through the background writer, reloading from a data
//! directory, and recovering from stored data that cannot be decoded.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tackboard::board::{BoardController, SequentialIds};
use tackboard::storage::{
    BackgroundWriter, FileStore, KvStore, SyncWriter, load_snapshot, save_snapshot,
};
use tackboard_proto::codec::{COLUMNS_KEY, TASKS_KEY};
use tackboard_proto::{BoardSnapshot, Column, EntityKind, Format, Id, Task};

fn id(raw: &str) -> Id {
    Id::from(raw)
}

fn sample() -> BoardSnapshot {
    BoardSnapshot {
        columns: vec![Column::new("c1", "Todo"), Column::new("c2", "Done")],
        tasks: vec![Task::new("t1", "c1", "A"), Task::new("t2", "c2", "B")],
    }
}

#[tokio::test]
async fn edits_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    for format in [Format::Json, Format::Postcard] {
        let data_dir = dir.path().join(format.to_string());
        let store = FileStore::new(&data_dir);
        save_snapshot(&store, &sample(), format).unwrap();

        // First session: load, edit, quit.
        let (writer, handle) = BackgroundWriter::spawn(store.clone(), format);
        let mut board = BoardController::new(
            load_snapshot(&store, format),
            writer,
            SequentialIds::new("n"),
        );
        board.rename_column(&id("c2"), "Shipped");
        board.begin_drag(EntityKind::Task, &id("t1"));
        board.drop(&id("c2"));
        let expected = board.snapshot();
        drop(board);
        handle.shutdown().await;

        // Second session sees the final state.
        let reloaded = load_snapshot(&FileStore::new(&data_dir), format);
        assert_eq!(reloaded, expected);
        assert_eq!(reloaded.columns[1].title, "Shipped");
        assert_eq!(
            reloaded.tasks,
            vec![Task::new("t2", "c2", "B"), Task::new("t1", "c2", "A")]
        );
    }
}

#[test]
fn missing_data_directory_loads_empty_board() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("never-created"));
    assert!(load_snapshot(&store, Format::Json).is_empty());
}

#[test]
fn malformed_tasks_fall_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    save_snapshot(&store, &sample(), Format::Json).unwrap();
    std::fs::write(dir.path().join(TASKS_KEY), b"not json at all").unwrap();

    let loaded = load_snapshot(&store, Format::Json);
    assert_eq!(loaded.columns, sample().columns);
    assert!(loaded.tasks.is_empty());
}

#[test]
fn browser_export_with_numeric_ids_loads() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .save(COLUMNS_KEY, br#"[{"id":1712,"title":"Todo"}]"#)
        .unwrap();
    store
        .save(
            TASKS_KEY,
            br#"[{"id":3301,"columnId":1712,"content":"Buy milk"}]"#,
        )
        .unwrap();

    let loaded = load_snapshot(&store, Format::Json);
    assert_eq!(loaded.columns, vec![Column::new("1712", "Todo")]);
    assert_eq!(loaded.tasks, vec![Task::new("3301", "1712", "Buy milk")]);
}

#[test]
fn stored_json_uses_column_id_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let mut board = BoardController::new(
        BoardSnapshot::default(),
        SyncWriter::new(store.clone(), Format::Json),
        SequentialIds::new("n"),
    );
    let column = board.create_column();
    board.create_task(&column).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(TASKS_KEY)).unwrap();
    assert_eq!(raw, r#"[{"id":"n2","columnId":"n1","content":"Task 1"}]"#);
}

#[test]
fn clearing_the_board_removes_stored_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    save_snapshot(&store, &sample(), Format::Json).unwrap();

    let mut board = BoardController::new(
        load_snapshot(&store, Format::Json),
        SyncWriter::new(store.clone(), Format::Json),
        SequentialIds::new("n"),
    );
    board.clear();

    assert!(!dir.path().join(COLUMNS_KEY).exists());
    assert!(!dir.path().join(TASKS_KEY).exists());
}
