//! Client-side state for browsing and editing the task list.
//!
//! [`TaskView`] holds everything a front end needs to render the list: the
//! last fetched collection, the search text and category filter, the
//! create/edit form, and the loading/error slots. Filtering is recomputed
//! from scratch on every call; nothing derived is stored.
//!
//! Remote work is split in two halves so a UI can run it in the background:
//! a `prepare_*`/`start_*` step that says what to send, and a `finish_*`
//! step that applies the store's answer. The async helpers
//! ([`TaskView::refresh`], [`TaskView::submit`], [`TaskView::confirm_delete`])
//! run both halves in place.

use std::borrow::Cow;

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ApiError, TaskApi};
use crate::task::{Task, TaskId, TaskPatch};

/// Shown when fetching the collection fails.
pub const LOAD_ERROR: &str = "Failed to load tasks";

/// Shown when a create or update fails.
pub const SAVE_ERROR: &str = "Failed to save task";

/// Shown when a delete fails.
pub const DELETE_ERROR: &str = "Failed to delete task";

/// Contents of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub description: String,
    pub category: String,
}

impl TaskForm {
    /// True when there is nothing worth submitting.
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }

    /// The form as a request body.
    pub fn to_patch(&self) -> TaskPatch {
        let mut patch = TaskPatch::new();
        patch.insert("description".to_string(), Value::from(self.description.clone()));
        patch.insert("category".to_string(), Value::from(self.category.clone()));
        patch
    }
}

/// A change to send to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(TaskPatch),
    Update(TaskId, TaskPatch),
}

/// State of the task list client.
#[derive(Debug, Clone, Default)]
pub struct TaskView {
    /// Last fetched collection
    pub tasks: Vec<Task>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// User-visible error, if any
    pub error: Option<String>,
    /// Free-text search
    pub search: String,
    /// Selected category filter (`None` = all categories)
    pub filter: Option<String>,
    /// Create/edit form contents
    pub form: TaskForm,
    /// Task currently being edited
    pub editing: Option<TaskId>,
    /// Task waiting for delete confirmation
    pub pending_delete: Option<TaskId>,
}

impl TaskView {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Tasks matching the current search text and category filter.
    pub fn filtered(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.search, self.filter.as_deref())
    }

    /// Distinct non-empty categories, in first-seen order.
    pub fn categories(&self) -> Vec<Cow<'_, str>> {
        categories(&self.tasks)
    }

    /// Selects the category filter; an empty string means "all".
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        let filter = filter.into();
        self.filter = if filter.is_empty() { None } else { Some(filter) };
    }

    /// Moves the filter to the next category, wrapping back to "all".
    pub fn cycle_filter(&mut self) {
        let next = {
            let categories = self.categories();
            match self.filter.as_deref() {
                None => categories.first().map(|c| c.to_string()),
                Some(current) => categories
                    .iter()
                    .position(|c| c == current)
                    .and_then(|i| categories.get(i + 1))
                    .map(|c| c.to_string()),
            }
        };
        self.filter = next;
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Marks a fetch as started.
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Applies the result of a fetch.
    pub fn finish_load(&mut self, result: Result<Vec<Task>, ApiError>) {
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
        self.loading = false;
    }

    /// Fetches the full collection.
    pub async fn refresh<A: TaskApi + ?Sized>(&mut self, api: &A) {
        self.start_loading();
        let result = api.list().await;
        self.finish_load(result);
    }

    // ------------------------------------------------------------------
    // Create / edit
    // ------------------------------------------------------------------

    /// Loads a task into the form for editing. No remote call.
    pub fn begin_edit(&mut self, task: &Task) {
        self.form = TaskForm {
            description: task.description().into_owned(),
            category: task.category_label().into_owned(),
        };
        self.editing = Some(task.id);
    }

    /// Abandons the edit and clears the form. No remote call.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = TaskForm::default();
    }

    /// Works out what the form would send.
    ///
    /// Returns `None` for a blank description: the submission is dropped
    /// without a user-visible error.
    pub fn prepare_submit(&self) -> Option<Mutation> {
        if self.form.is_blank() {
            debug!("ignoring submit with empty description");
            return None;
        }
        let patch = self.form.to_patch();
        Some(match self.editing {
            Some(id) => Mutation::Update(id, patch),
            None => Mutation::Create(patch),
        })
    }

    /// Applies the result of a create or update.
    ///
    /// Returns true when the collection should be refreshed.
    pub fn finish_submit(&mut self, result: Result<Task, ApiError>) -> bool {
        match result {
            Ok(_) => {
                self.cancel_edit();
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save task");
                self.error = Some(SAVE_ERROR.to_string());
                false
            }
        }
    }

    /// Submits the form and refreshes on success.
    ///
    /// Returns false if nothing was sent.
    pub async fn submit<A: TaskApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(mutation) = self.prepare_submit() else {
            return false;
        };
        let result = send(api, mutation).await;
        if self.finish_submit(result) {
            self.refresh(api).await;
        }
        true
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Asks for confirmation before deleting. No remote call.
    pub fn request_delete(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    /// Drops a pending delete.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Takes the confirmed delete target, if any.
    pub fn take_confirmed_delete(&mut self) -> Option<TaskId> {
        self.pending_delete.take()
    }

    /// Applies the result of a delete.
    ///
    /// Returns true when the collection should be refreshed.
    pub fn finish_delete(&mut self, result: Result<Task, ApiError>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "failed to delete task");
                self.error = Some(DELETE_ERROR.to_string());
                false
            }
        }
    }

    /// Deletes the pending task and refreshes on success.
    ///
    /// Returns false if no delete was pending.
    pub async fn confirm_delete<A: TaskApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(id) = self.take_confirmed_delete() else {
            return false;
        };
        let result = api.delete(id).await;
        if self.finish_delete(result) {
            self.refresh(api).await;
        }
        true
    }
}

/// Sends a mutation to the store.
pub async fn send<A: TaskApi + ?Sized>(api: &A, mutation: Mutation) -> Result<Task, ApiError> {
    match mutation {
        Mutation::Create(patch) => api.create(patch).await,
        Mutation::Update(id, patch) => api.update(id, patch).await,
    }
}

/// Filters tasks by search text and category.
///
/// A task matches when its description or category contains `search`
/// (case-insensitive) and, if `category` is set, its category equals it
/// exactly.
pub fn filter_tasks<'a>(tasks: &'a [Task], search: &str, category: Option<&str>) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|t| {
            let matches_search = t.description().to_lowercase().contains(&needle)
                || t.category_label().to_lowercase().contains(&needle);
            let matches_filter = category.map_or(true, |c| t.category_label() == c);
            matches_search && matches_filter
        })
        .collect()
}

/// Distinct non-empty categories, in first-seen order.
pub fn categories(tasks: &[Task]) -> Vec<Cow<'_, str>> {
    let mut seen: Vec<Cow<'_, str>> = Vec::new();
    for category in tasks.iter().filter_map(Task::category) {
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}
