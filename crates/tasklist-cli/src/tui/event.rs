//! Event handling for the TUI.

use crossterm::event::{KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

use tasklist_core::{ApiError, Task};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// A tick occurred
    Tick,
    /// The collection fetch finished
    Loaded(Result<Vec<Task>, ApiError>),
    /// A create or update finished
    Saved(Result<Task, ApiError>),
    /// A delete finished
    Deleted(Result<Task, ApiError>),
}

/// Handles events from various sources.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        let tick_rate = Duration::from_millis(250);
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        // Spawn the event polling task
        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                let crossterm_event = reader.next().fuse();
                let tick = interval.tick();

                tokio::select! {
                    maybe_event = crossterm_event => {
                        match maybe_event {
                            Some(Ok(crossterm::event::Event::Key(key))) => {
                                // Only handle key press events, not release
                                if key.kind == KeyEventKind::Press
                                    && event_tx.send(Event::Key(key)).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Ok(_)) | Some(Err(_)) => {}
                            None => break,
                        }
                    }
                    _ = tick => {
                        if event_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Get the sender for store results.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
