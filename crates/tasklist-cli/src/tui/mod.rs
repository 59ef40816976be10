//! Terminal client for a task store.
//!
//! Provides an interactive terminal UI with:
//! - Search box and category filter
//! - Task list with the derived (filtered) view
//! - Create/edit form
//! - Confirm-before-delete

mod app;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use app::App;
use tasklist_core::TaskApi;

/// Run the TUI application against the given store.
///
/// `source` is shown in the status bar (server URL or file path).
pub async fn run(api: Arc<dyn TaskApi>, source: String) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    // Leave the alternate screen before a panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut app = App::new(api, source);
    let result = app.run(&mut terminal).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

fn restore_terminal() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)
}
