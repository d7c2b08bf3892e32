//! Terminal UI rendering.

pub mod board_view;
pub mod layout;
pub mod status_bar;
pub mod theme;

use ratatui::Frame;

use crate::app::App;
use crate::board::IdGenerator;
use crate::storage::SnapshotSink;

/// Main draw function for the entire UI.
///
/// The board is drawn from [`App::layout`], so the app must have been
/// resized to `frame.area()` first.
pub fn draw<S: SnapshotSink, G: IdGenerator>(frame: &mut Frame, app: &App<S, G>) {
    board_view::render(frame, app);
    status_bar::render(frame, layout::status_area(frame.area()), app);
}
