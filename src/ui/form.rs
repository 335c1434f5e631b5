//! Add/edit form widget rendering.
//!
//! Displays the draft fields with the focused input highlighted.

use crate::app::{App, FormField, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render one labeled input line.
fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(label, Style::default().fg(Color::Cyan)),
        Span::styled(value, value_style),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

/// Render the add/edit form widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows the pending draft at all times; while the form is active the
/// focused field carries a cursor underscore and an instruction line is
/// appended. Name and brand are required, notes are optional.
pub fn render_form(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Form;

    let lines = vec![
        input_line(
            "Name:  ",
            &app.draft.name,
            is_active && app.focus == FormField::Name,
        ),
        input_line(
            "Brand: ",
            &app.draft.brand,
            is_active && app.focus == FormField::Brand,
        ),
        input_line(
            "Notes: ",
            &app.draft.notes,
            is_active && app.focus == FormField::Notes,
        ),
        if is_active {
            Line::from(Span::styled(
                "Tab to switch field, Enter to save, Esc to cancel",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                "Press 'a' to add, 'e' to edit the selected perfume",
                Style::default().fg(Color::DarkGray),
            ))
        },
    ];

    let title = match (is_active, app.editing) {
        (true, Some(id)) => format!("Edit Perfume #{}", id),
        (true, None) => "Add Perfume".to_string(),
        (false, _) => "Perfume Form".to_string(),
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}
