//! Shared board model and persistence format for `Tackboard`.

pub mod board;
pub mod codec;
pub mod id;

pub use board::{BoardSnapshot, Column, EntityKind, Identified, Task};
pub use codec::{CodecError, Format};
pub use id::Id;
