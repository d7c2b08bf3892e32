//! Board entities: columns, tasks, and the snapshot persisted between
//! sessions.
//!
//! Field names serialize in camelCase (`columnId`) so boards stored by the
//! original browser app load unchanged.

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// Anything stored in an ordered sequence and looked up by identity.
pub trait Identified {
    /// Returns the entity's unique id.
    fn id(&self) -> &Id;
}

/// Which kind of entity a drag gesture or drop target refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A board column.
    Column,
    /// A task card.
    Task,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column => write!(f, "column"),
            Self::Task => write!(f, "task"),
        }
    }
}

/// A named, ordered group that owns zero or more tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique column identifier.
    pub id: Id,
    /// Display title, edited in place.
    pub title: String,
}

impl Column {
    /// Creates a column with the given id and title.
    #[must_use]
    pub fn new(id: impl Into<Id>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Identified for Column {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// An item belonging to exactly one column at a time.
///
/// Membership comes from `column_id`; order within the column comes from
/// the task's position in the board's flat task sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: Id,
    /// Column this task currently belongs to.
    pub column_id: Id,
    /// Free-form task text.
    pub content: String,
}

impl Task {
    /// Creates a task in the given column.
    #[must_use]
    pub fn new(id: impl Into<Id>, column_id: impl Into<Id>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            content: content.into(),
        }
    }
}

impl Identified for Task {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// The full persisted state of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Tasks of every column, in display order.
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Returns `true` if the board has neither columns nor tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tasks.is_empty()
    }
}
