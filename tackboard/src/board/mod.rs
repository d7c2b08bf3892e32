//! Board state and drag-and-drop reordering.
//!
//! The board is two ordered sequences: columns, and one flat list of tasks
//! whose `column_id` decides membership. [`BoardController`] owns both plus
//! the [`DragSession`], applies edits, and resolves drops through the pure
//! [`reorder`] function.

pub mod controller;
pub mod drag;
pub mod ids;
pub mod ordered;
pub mod reorder;

pub use controller::BoardController;
pub use drag::{ActiveDrag, DragSession};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use ordered::{Filtered, OrderedStore, Placement};
pub use reorder::{Reordered, reorder};

use tackboard_proto::Id;
use thiserror::Error;

/// Errors returned by board edits that would break board invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A task was created for a column that does not exist.
    #[error("column not found: {0}")]
    ColumnNotFound(Id),
}
