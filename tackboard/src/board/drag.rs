//! Drag gesture state machine.
//!
//! A board has at most one drag in flight. [`DragSession`] is either idle or
//! tracking the dragged entity plus, optionally, the drop candidate under
//! the pointer. The candidate only drives highlighting; drops always name
//! their target explicitly.

use tackboard_proto::{EntityKind, Id};

/// The entity being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    /// Whether a column or a task is being dragged.
    pub kind: EntityKind,
    /// Id of the dragged entity.
    pub id: Id,
    /// Current drop candidate, if the pointer is over one.
    pub over: Option<Id>,
}

/// Drag session: idle, or active on one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragSession {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is in progress.
    Active(ActiveDrag),
}

impl DragSession {
    /// Starts dragging `id`, replacing any session already in progress.
    pub fn begin(&mut self, kind: EntityKind, id: Id) {
        if let Self::Active(previous) = self {
            tracing::debug!(
                kind = %previous.kind,
                id = %previous.id,
                "replacing unfinished drag session"
            );
        }
        *self = Self::Active(ActiveDrag {
            kind,
            id,
            over: None,
        });
    }

    /// Records the drop candidate under the pointer. Ignored while idle.
    pub fn hover(&mut self, target: Option<Id>) {
        if let Self::Active(drag) = self {
            drag.over = target;
        }
    }

    /// Returns to idle, yielding the drag that was in progress.
    pub fn end(&mut self) -> Option<ActiveDrag> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Active(drag) => Some(drag),
        }
    }

    /// The drag in progress, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Active(drag) => Some(drag),
        }
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Returns `true` if `id` is the entity being dragged.
    #[must_use]
    pub fn is_dragging(&self, id: &Id) -> bool {
        self.active().is_some_and(|drag| &drag.id == id)
    }

    /// The current drop candidate, if any.
    #[must_use]
    pub fn over(&self) -> Option<&Id> {
        self.active().and_then(|drag| drag.over.as_ref())
    }
}
