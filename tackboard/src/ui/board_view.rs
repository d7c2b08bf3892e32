//! Board rendering: columns, task cards, and their buttons.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use tackboard_proto::{Column, Id, Task};

use super::layout::{ColumnSlot, TaskSlot};
use super::theme;
use crate::app::App;
use crate::board::IdGenerator;
use crate::storage::SnapshotSink;

/// Shown for a task with blank content.
const TASK_PLACEHOLDER: &str = "Task content here";

/// Render every visible column plus the "+ Add column" button.
pub fn render<S: SnapshotSink, G: IdGenerator>(frame: &mut Frame, app: &App<S, G>) {
    let layout = app.layout();
    for slot in &layout.columns {
        if let Some(column) = app.board.column(&slot.id) {
            render_column(frame, app, slot, column);
        }
    }
    if let Some(area) = layout.add_column {
        let button = Paragraph::new(Span::styled("+ Add column", theme::button()))
            .block(Block::default().borders(Borders::ALL).border_style(theme::dimmed()));
        frame.render_widget(button, area);
    }
}

fn render_column<S: SnapshotSink, G: IdGenerator>(
    frame: &mut Frame,
    app: &App<S, G>,
    slot: &ColumnSlot,
    column: &Column,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app, &column.id));
    frame.render_widget(block, slot.area);

    let count = app.board.tasks_in(&column.id).count();
    let title = match &app.editor {
        Some(editor) if editor.is_editing(&column.id) => {
            Span::styled(with_cursor(editor.text(), editor.cursor()), theme::normal())
        }
        _ => Span::styled(column.title.clone(), theme::bold()),
    };
    let header = Line::from(vec![
        title,
        Span::raw(" "),
        Span::styled(format!(" {count} "), theme::count_badge()),
    ]);
    frame.render_widget(Paragraph::new(header), slot.header);
    render_delete_glyph(frame, slot.delete);

    for task_slot in &slot.tasks {
        if let Some(task) = app.board.task(&task_slot.id) {
            render_task(frame, app, task_slot, task);
        }
    }

    let mut footer = vec![Span::styled("+ Add task", theme::button())];
    if slot.hidden_tasks > 0 {
        footer.push(Span::styled(
            format!("  ({} more)", slot.hidden_tasks),
            theme::dimmed(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), slot.add_task);
}

fn render_task<S: SnapshotSink, G: IdGenerator>(
    frame: &mut Frame,
    app: &App<S, G>,
    slot: &TaskSlot,
    task: &Task,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app, &task.id));
    frame.render_widget(block, slot.area);

    let content = match &app.editor {
        Some(editor) if editor.is_editing(&task.id) => {
            Text::styled(with_cursor(editor.text(), editor.cursor()), theme::normal())
        }
        _ if task.content.trim().is_empty() => Text::styled(TASK_PLACEHOLDER, theme::dimmed()),
        _ => Text::styled(task.content.clone(), theme::normal()),
    };
    frame.render_widget(Paragraph::new(content), slot.content);
    render_delete_glyph(frame, slot.delete);
}

fn render_delete_glyph(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Span::styled("x", theme::delete_glyph())),
        area,
    );
}

/// Border style reflecting drag and edit state.
fn border_style<S: SnapshotSink, G: IdGenerator>(app: &App<S, G>, id: &Id) -> Style {
    let drag = app.board.drag();
    if drag.is_dragging(id) {
        theme::dragging()
    } else if drag.over() == Some(id) {
        theme::drop_target()
    } else if app.editor.as_ref().is_some_and(|editor| editor.is_editing(id)) {
        theme::editing()
    } else {
        theme::normal()
    }
}

/// Inserts a block cursor at character position `cursor`.
fn with_cursor(text: &str, cursor: usize) -> String {
    let mut display = text.to_string();
    let at = text
        .char_indices()
        .nth(cursor)
        .map_or(text.len(), |(i, _)| i);
    display.insert(at, '█');
    display
}
