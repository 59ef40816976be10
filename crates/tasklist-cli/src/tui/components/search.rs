//! Search box component.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::{App, InputMode};

/// Render the search box and the active category filter.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let searching = app.input_mode == InputMode::Searching;
    let border_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let filter = app.view.filter.as_deref().unwrap_or("All");
    let block = Block::default()
        .title(" Search ")
        .title(Line::from(format!(" Category: {} ", filter)).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner_area = block.inner(area);

    let (text, text_style) = if searching {
        (format!("{}_", app.view.search), Style::default().fg(Color::White))
    } else if app.view.search.is_empty() {
        ("Press '/' to search...".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (app.view.search.clone(), Style::default().fg(Color::White))
    };

    frame.render_widget(Paragraph::new(text).style(text_style).block(block), area);

    if searching {
        let cursor_x = inner_area.x + app.view.search.chars().count() as u16;
        frame.set_cursor_position(Position::new(cursor_x, inner_area.y));
    }
}
