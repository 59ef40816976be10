//! Category sidebar component.

use std::borrow::Cow;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::tui::app::App;

/// Render the distinct categories, marking the active filter.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let active = app.view.filter.as_deref();
    let entries = std::iter::once((Cow::Borrowed("All"), active.is_none())).chain(
        app.view.categories().into_iter().map(|c| {
            let selected = active == Some(c.as_ref());
            (c, selected)
        }),
    );

    let items: Vec<ListItem> = entries
        .map(|(label, selected)| {
            let (icon, style) = if selected {
                ("●", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", icon), style),
                Span::styled(label, style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner_area);
}
