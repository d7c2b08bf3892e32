//! Property-based tests for the stored board format.
//!
//! Uses proptest to verify:
//! 1. Any board survives encode → decode in every format.
//! 2. Random bytes never cause a panic in decode (returns `Err` gracefully).
//! 3. JSON columns and tasks always use the stored field names.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use tackboard_proto::codec::{self, COLUMNS_KEY, TASKS_KEY};
use tackboard_proto::{BoardSnapshot, Column, Format, Id, Task};

// --- Strategies ---

fn arb_id() -> impl Strategy<Value = Id> {
    prop_oneof![
        "[a-z0-9-]{1,36}".prop_map(Id::new),
        any::<u64>().prop_map(|n| Id::new(n.to_string())),
    ]
}

fn arb_format() -> impl Strategy<Value = Format> {
    prop_oneof![Just(Format::Json), Just(Format::Postcard)]
}

/// Boards whose tasks all point at one of the generated columns.
fn arb_snapshot() -> impl Strategy<Value = BoardSnapshot> {
    prop::collection::vec((arb_id(), ".{0,40}"), 0..8).prop_flat_map(|columns| {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(id, title)| Column::new(id, title))
            .collect();
        let column_ids: Vec<Id> = columns.iter().map(|c| c.id.clone()).collect();
        let tasks = if column_ids.is_empty() {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec(
                (arb_id(), prop::sample::select(column_ids), ".{0,80}"),
                0..16,
            )
            .prop_map(|tasks| {
                tasks
                    .into_iter()
                    .map(|(id, column_id, content)| Task::new(id, column_id, content))
                    .collect()
            })
            .boxed()
        };
        (Just(columns), tasks).prop_map(|(columns, tasks)| BoardSnapshot { columns, tasks })
    })
}

// --- Property tests ---

proptest! {
    /// Any board survives an encode → decode round-trip.
    #[test]
    fn snapshot_round_trip(snapshot in arb_snapshot(), format in arb_format()) {
        let [(columns_key, columns), (tasks_key, tasks)] =
            codec::encode_snapshot(&snapshot, format).expect("encode should succeed");
        prop_assert_eq!(columns_key, COLUMNS_KEY);
        prop_assert_eq!(tasks_key, TASKS_KEY);

        let decoded = BoardSnapshot {
            columns: codec::decode_columns(&columns, format).expect("columns should decode"),
            tasks: codec::decode_tasks(&tasks, format).expect("tasks should decode"),
        };
        prop_assert_eq!(snapshot, decoded);
    }

    /// Random bytes never panic the decoder.
    #[test]
    fn random_bytes_decode_no_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..512),
        format in arb_format(),
    ) {
        let _ = codec::decode_columns(&bytes, format);
        let _ = codec::decode_tasks(&bytes, format);
    }

    /// JSON tasks carry `id`, `columnId` and `content`, nothing else.
    #[test]
    fn json_task_fields(snapshot in arb_snapshot()) {
        let bytes = codec::encode_sequence(&snapshot.tasks, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for task in value.as_array().unwrap() {
            let object = task.as_object().unwrap();
            prop_assert_eq!(object.len(), 3);
            prop_assert!(object.contains_key("id"));
            prop_assert!(object.contains_key("columnId"));
            prop_assert!(object.contains_key("content"));
        }
    }
}
