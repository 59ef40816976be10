//! Create/edit form component.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::{App, FormField, InputMode};

/// Render the description and category inputs.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;

    let title = match app.view.editing {
        Some(id) => format!(" Edit Task {} ", id),
        None => " Add Task ".to_string(),
    };
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner_area);

    let form = &app.view.form;
    render_field(frame, fields[0], "Description", &form.description, editing && app.field == FormField::Description);
    render_field(frame, fields[1], "Category", &form.category, editing && app.field == FormField::Category);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if focused {
        let offset = (label.len() + 2 + value.chars().count()) as u16;
        frame.set_cursor_position(Position::new(area.x + offset, area.y));
    }
}
