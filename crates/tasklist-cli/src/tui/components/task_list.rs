//! Task list component.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::tui::app::App;

/// Render the filtered task list.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let tasks = app.view.filtered();

    let title = format!(" Tasks ({}/{}) ", tasks.len(), app.view.tasks.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.view.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if tasks.is_empty() {
        let empty = Paragraph::new("No tasks. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let pending = app.view.pending_delete == Some(task.id);
            let editing = app.view.editing == Some(task.id);

            let description_style = if pending {
                Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT)
            } else if editing {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(format!("{:>4} ", task.id), Style::default().fg(Color::DarkGray)),
                Span::styled(task.description(), description_style),
            ];
            if let Some(category) = task.category() {
                spans.push(Span::styled(
                    format!("  [{}]", category),
                    Style::default().fg(Color::Cyan),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}
