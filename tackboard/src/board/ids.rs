//! Id generation for new columns and tasks.

use tackboard_proto::Id;

/// Source of fresh entity ids.
pub trait IdGenerator {
    /// Produces an id not handed out before by this generator.
    fn generate(&mut self) -> Id;
}

/// Random, time-ordered UUID v7 ids. Safe across restarts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn generate(&mut self) -> Id {
        Id::generate()
    }
}

/// Predictable `prefix` + counter ids (`c1`, `c2`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Creates a generator producing `{prefix}1`, `{prefix}2`, ...
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> Id {
        let id = Id::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
