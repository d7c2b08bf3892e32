//! `Tackboard` — terminal kanban board library.
//!
//! [`board`] holds the board model and the drag-and-drop reorder logic,
//! [`storage`] persists it, and [`app`] plus [`ui`] drive it from a
//! terminal.

pub mod app;
pub mod board;
pub mod config;
pub mod storage;
pub mod ui;
