//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use tackboard_proto::Id;

use super::theme;
use crate::app::App;
use crate::board::IdGenerator;
use crate::storage::SnapshotSink;

/// Render the status bar at the bottom of the screen.
pub fn render<S: SnapshotSink, G: IdGenerator>(frame: &mut Frame, area: Rect, app: &App<S, G>) {
    let (state, help_text) = if let Some(drag) = app.board.drag().active() {
        let over = drag
            .over
            .as_ref()
            .map_or_else(|| "nothing".to_string(), |id| describe(app, id));
        (
            format!("Dragging {} over {over}", describe(app, &drag.id)),
            "Release: drop | Esc: cancel",
        )
    } else if app.editor.is_some() {
        (
            "Editing".to_string(),
            "Enter: save | Esc: discard | ←→: move cursor",
        )
    } else {
        (
            format!(
                "{} columns, {} tasks",
                app.board.columns().len(),
                app.board.tasks().len()
            ),
            "Click: edit | Drag: move | c: new column | q: quit",
        )
    };

    let status_line = Line::from(vec![
        Span::styled(concat!("Tackboard v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::raw(state),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

/// Human-readable name of a column or task.
fn describe<S: SnapshotSink, G: IdGenerator>(app: &App<S, G>, id: &Id) -> String {
    if let Some(column) = app.board.column(id) {
        format!("column \"{}\"", column.title)
    } else if let Some(task) = app.board.task(id) {
        format!("task \"{}\"", task.content)
    } else {
        id.to_string()
    }
}
