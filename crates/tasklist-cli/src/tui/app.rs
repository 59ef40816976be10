//! Application state and main event loop.

use std::io::Stdout;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use tasklist_core::view::{self, Mutation};
use tasklist_core::{Task, TaskApi, TaskView};

use super::event::{Event, EventHandler};
use super::ui;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigating the list
    #[default]
    Normal,
    /// Typing into the create/edit form
    Editing,
    /// Typing into the search box
    Searching,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Which form field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Description,
    Category,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Description => Self::Category,
            Self::Category => Self::Description,
        }
    }
}

/// Main application state.
pub struct App {
    /// Client view state (collection, search, filter, form)
    pub view: TaskView,
    /// Current input mode
    pub input_mode: InputMode,
    /// Focused form field
    pub field: FormField,
    /// Index into the filtered list
    pub selected: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Where the tasks come from, for the status bar
    pub source: String,
    api: Arc<dyn TaskApi>,
}

impl App {
    /// Create a new app instance.
    pub fn new(api: Arc<dyn TaskApi>, source: String) -> Self {
        Self {
            view: TaskView::new(),
            input_mode: InputMode::Normal,
            field: FormField::Description,
            selected: 0,
            should_quit: false,
            source,
            api,
        }
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut events = EventHandler::new();
        self.refresh(events.sender());

        loop {
            terminal.draw(|frame| ui::render(self, frame))?;

            if let Some(event) = events.next().await {
                self.handle_event(event, events.sender());
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one event to the state.
    pub fn handle_event(&mut self, event: Event, event_tx: mpsc::UnboundedSender<Event>) {
        match event {
            Event::Key(key) => self.handle_key_event(key, event_tx),
            Event::Tick => {}
            Event::Loaded(result) => {
                self.view.finish_load(result);
                self.clamp_selection();
            }
            Event::Saved(result) => {
                if self.view.finish_submit(result) {
                    self.refresh(event_tx);
                }
            }
            Event::Deleted(result) => {
                if self.view.finish_delete(result) {
                    self.refresh(event_tx);
                }
            }
        }
    }

    /// The task under the cursor, if any.
    pub fn selected_task(&self) -> Option<&Task> {
        self.view.filtered().get(self.selected).copied()
    }

    /// Fetch the full collection in the background.
    fn refresh(&mut self, event_tx: mpsc::UnboundedSender<Event>) {
        self.view.start_loading();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = api.list().await;
            let _ = event_tx.send(Event::Loaded(result));
        });
    }

    /// Send the form to the store in the background.
    fn submit(&mut self, event_tx: mpsc::UnboundedSender<Event>) {
        let Some(mutation) = self.view.prepare_submit() else {
            return;
        };
        self.input_mode = InputMode::Normal;
        self.spawn_mutation(mutation, event_tx);
    }

    fn spawn_mutation(&self, mutation: Mutation, event_tx: mpsc::UnboundedSender<Event>) {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = view::send(api.as_ref(), mutation).await;
            let _ = event_tx.send(Event::Saved(result));
        });
    }

    /// Delete the confirmed task in the background.
    fn delete_confirmed(&mut self, event_tx: mpsc::UnboundedSender<Event>) {
        self.input_mode = InputMode::Normal;
        let Some(id) = self.view.take_confirmed_delete() else {
            return;
        };
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = api.delete(id).await;
            let _ = event_tx.send(Event::Deleted(result));
        });
    }

    /// Handle a key event.
    fn handle_key_event(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key, event_tx),
            InputMode::Editing => self.handle_editing_mode_key(key, event_tx),
            InputMode::Searching => self.handle_search_mode_key(key),
            InputMode::ConfirmDelete => self.handle_confirm_mode_key(key, event_tx),
        }
    }

    /// Handle key in normal mode.
    fn handle_normal_mode_key(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('a') => {
                self.view.cancel_edit();
                self.field = FormField::Description;
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('i') => {
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.selected_task().cloned() {
                    self.view.begin_edit(&task);
                    self.field = FormField::Description;
                    self.input_mode = InputMode::Editing;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.view.request_delete(id);
                    self.input_mode = InputMode::ConfirmDelete;
                }
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Searching;
            }
            KeyCode::Char('c') => {
                self.view.cycle_filter();
                self.selected = 0;
            }
            KeyCode::Char('r') => self.refresh(event_tx),
            _ => {}
        }
    }

    /// Handle key while typing into the form.
    fn handle_editing_mode_key(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match key.code {
            KeyCode::Esc => {
                // Leaving an edit abandons it; a half-typed new task is kept.
                if self.view.editing.is_some() {
                    self.view.cancel_edit();
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = self.field.toggle();
            }
            KeyCode::Enter => self.submit(event_tx),
            KeyCode::Char(c) => self.active_field_mut().push(c),
            KeyCode::Backspace => {
                self.active_field_mut().pop();
            }
            _ => {}
        }
    }

    /// Handle key while typing into the search box.
    fn handle_search_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view.search.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Char(c) => self.view.search.push(c),
            KeyCode::Backspace => {
                self.view.search.pop();
            }
            _ => return,
        }
        self.selected = 0;
    }

    /// Handle key while a delete waits for confirmation.
    fn handle_confirm_mode_key(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_confirmed(event_tx),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.view.cancel_delete();
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Description => &mut self.view.form.description,
            FormField::Category => &mut self.view.form.category,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.view.filtered().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.view.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
