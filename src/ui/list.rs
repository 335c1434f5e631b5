//! Record list widget rendering.
//!
//! Displays a scrollable list of perfume records with selection highlighting.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Number of terminal rows each record card occupies.
///
/// Kept fixed so scroll-offset math and mouse hit-testing stay simple:
/// name, brand, notes, price, image (or blank), separator.
pub const LINES_PER_RECORD: u16 = 6;

/// Render the record list widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Displays each record as a fixed-height card and keeps the selected one
/// roughly centered in the visible window. The title carries the record
/// count and the time of the last successful reload.
pub fn render_list(app: &App, area: Rect, buf: &mut Buffer) {
    let title = match app.refreshed_at {
        Some(at) => format!(
            "Perfumes ({}) · refreshed {}",
            app.records.len(),
            at.format("%H:%M:%S")
        ),
        None => format!("Perfumes ({})", app.records.len()),
    };

    // Handle empty list
    if app.records.is_empty() {
        let list = List::new(vec![ListItem::new("No perfumes found...")])
            .block(Block::default().title(title).borders(Borders::ALL));
        Widget::render(list, area, buf);
        return;
    }

    // Ensure selected_index is valid
    let selected_index = app.selected_index.min(app.records.len().saturating_sub(1));

    // Calculate separator width (accounting for borders)
    let separator_width = area.width.saturating_sub(2).max(10) as usize;
    let separator_line = "─".repeat(separator_width);

    // Calculate scroll offset to keep selection centered
    let available_height = area.height.saturating_sub(2); // Account for borders
    let visible_records = (available_height / LINES_PER_RECORD).max(1) as usize;
    let center_offset = visible_records / 2;

    let scroll_offset = if selected_index >= center_offset {
        selected_index.saturating_sub(center_offset)
    } else {
        0
    };

    // Ensure we don't scroll past the end
    let max_scroll = app.records.len().saturating_sub(visible_records);
    let scroll_offset = scroll_offset.min(max_scroll);

    let start_idx = scroll_offset;
    let end_idx = (scroll_offset + visible_records).min(app.records.len());

    let items: Vec<ListItem> = app
        .records
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(end_idx - start_idx)
        .map(|(idx, record)| {
            let is_selected = idx == selected_index;

            let base_style = if is_selected {
                Style::default()
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let name_style = Style::default()
                .fg(if is_selected {
                    Color::Yellow
                } else {
                    Color::White
                })
                .add_modifier(Modifier::BOLD);

            // Line 1: Perfume name
            let line1 = Line::from(vec![Span::styled(&record.name, name_style)]);

            // Line 2: Brand
            let line2 = Line::from(vec![Span::styled(
                format!("Brand: {}", record.brand),
                Style::default().fg(Color::Cyan),
            )]);

            // Line 3: Notes (may be empty)
            let line3 = Line::from(vec![Span::styled(
                format!("Notes: {}", record.notes()),
                Style::default().fg(Color::Gray),
            )]);

            // Line 4: Price
            let line4 = Line::from(vec![Span::styled(
                record.format_price(),
                Style::default().fg(Color::Green),
            )]);

            // Line 5: Image URL when the service resolved one, blank otherwise
            let line5 = match record.image.as_deref() {
                Some(url) => Line::from(vec![Span::styled(
                    url.to_string(),
                    Style::default().fg(Color::DarkGray),
                )]),
                None => Line::from(""),
            };

            // Line 6: Separator
            let separator_style = if is_selected {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let separator = Line::from(vec![Span::styled(separator_line.clone(), separator_style)]);

            ListItem::new(vec![line1, line2, line3, line4, line5, separator]).style(base_style)
        })
        .collect();

    // Calculate relative selected index for visible items
    let relative_selected = if selected_index >= scroll_offset
        && selected_index < scroll_offset + items.len()
        && !items.is_empty()
    {
        Some(selected_index - scroll_offset)
    } else {
        None
    };

    let mut list_state = ListState::default();
    list_state.select(relative_selected);

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    StatefulWidget::render(list, area, buf, &mut list_state);
}
