//! UI rendering for the TUI.

use ratatui::{prelude::*, widgets::Paragraph};

use super::app::{App, InputMode};
use super::components::{categories, form, search, task_list};

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: search, content, form, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Main content
            Constraint::Length(3), // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    search::render(app, frame, chunks[0]);
    render_main_content(app, frame, chunks[1]);
    form::render(app, frame, chunks[2]);
    render_status_bar(app, frame, chunks[3]);
}

/// Render the main content area (tasks and categories side by side).
fn render_main_content(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    task_list::render(app, frame, chunks[0]);
    categories::render(app, frame, chunks[1]);
}

/// Render the status bar. An error replaces the key hints.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(error) = &app.view.error {
        let bar = Paragraph::new(format!("Error: {}", error))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(bar, area);
        return;
    }

    let hints = match app.input_mode {
        InputMode::Normal => {
            "[a] Add  [e] Edit  [d] Delete  [/] Search  [c] Category  [r] Reload  [q] Quit"
        }
        InputMode::Editing => "[Enter] Save  [Tab] Next field  [Esc] Cancel",
        InputMode::Searching => "[Enter] Done  [Esc] Clear",
        InputMode::ConfirmDelete => "Are you sure you want to delete this task? [y/n]",
    };

    let style = if app.input_mode == InputMode::ConfirmDelete {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let status = format!("{}  |  {}", hints, app.source);
    frame.render_widget(Paragraph::new(status).style(style), area);
}
