//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for the drop candidate.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Color of the entity being dragged.
pub const DRAGGING: Color = Color::Yellow;

/// Color of the entity being edited.
pub const EDITING: Color = Color::Green;

/// Color of delete glyphs.
pub const DANGER: Color = Color::Red;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (placeholders, hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Border of the current drop candidate.
#[must_use]
pub fn drop_target() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Border of the entity being dragged.
#[must_use]
pub fn dragging() -> Style {
    Style::default()
        .fg(DRAGGING)
        .add_modifier(Modifier::BOLD | Modifier::DIM)
}

/// Border of the entity being edited.
#[must_use]
pub fn editing() -> Style {
    Style::default().fg(EDITING)
}

/// Delete glyph style.
#[must_use]
pub fn delete_glyph() -> Style {
    Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
}

/// "+ Add ..." button style.
#[must_use]
pub fn button() -> Style {
    Style::default().fg(FG_SECONDARY).add_modifier(Modifier::ITALIC)
}

/// Task count badge next to a column title.
#[must_use]
pub fn count_badge() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .bg(Color::Rgb(30, 30, 50))
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}
