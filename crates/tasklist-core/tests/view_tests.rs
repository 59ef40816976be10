use async_trait::async_trait;
use serde_json::json;
use tasklist_core::view::{DELETE_ERROR, LOAD_ERROR, SAVE_ERROR};
use tasklist_core::{
    ApiError, FileStorage, LocalTaskApi, Task, TaskApi, TaskId, TaskManager, TaskPatch, TaskView,
};
use tempfile::TempDir;

fn create_local_api() -> (LocalTaskApi<FileStorage>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("tasks.json"));
    storage.init().unwrap();
    (LocalTaskApi::new(TaskManager::new(storage)), temp_dir)
}

/// A store that is always down.
struct Unreachable;

#[async_trait]
impl TaskApi for Unreachable {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        Err(ApiError::Network("connection refused".to_string()))
    }

    async fn create(&self, _patch: TaskPatch) -> Result<Task, ApiError> {
        Err(ApiError::Network("connection refused".to_string()))
    }

    async fn update(&self, id: TaskId, _patch: TaskPatch) -> Result<Task, ApiError> {
        Err(ApiError::NotFound(id))
    }

    async fn delete(&self, id: TaskId) -> Result<Task, ApiError> {
        Err(ApiError::NotFound(id))
    }
}

#[tokio::test]
async fn test_initial_load() {
    let (api, _temp) = create_local_api();
    api.create(json!({"description": "Buy milk", "category": "errands"}).as_object().cloned().unwrap())
        .await
        .unwrap();

    let mut view = TaskView::new();
    view.refresh(&api).await;

    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.categories(), vec!["errands"]);
}

#[tokio::test]
async fn test_submit_creates_then_refreshes() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();
    view.refresh(&api).await;

    view.form.description = "Write report".to_string();
    view.form.category = "work".to_string();
    assert!(view.submit(&api).await);

    assert_eq!(view.form.description, "");
    assert_eq!(view.editing, None);
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].id, 1);
    assert_eq!(view.tasks[0].category().as_deref(), Some("work"));
}

#[tokio::test]
async fn test_blank_submit_sends_nothing() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();

    view.form.description = "  \t".to_string();
    view.form.category = "work".to_string();

    assert!(!view.submit(&api).await);
    assert_eq!(view.error, None);
    assert_eq!(view.form.category, "work");
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_flow_updates_in_place() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();
    view.form.description = "Old".to_string();
    view.submit(&api).await;

    let task = view.tasks[0].clone();
    view.begin_edit(&task);
    view.form.description = "New".to_string();
    view.submit(&api).await;

    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].id, task.id);
    assert_eq!(view.tasks[0].description(), "New");
    assert_eq!(view.editing, None);
}

#[tokio::test]
async fn test_cancel_edit_makes_no_call() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();
    view.form.description = "Keep".to_string();
    view.submit(&api).await;

    let task = view.tasks[0].clone();
    view.begin_edit(&task);
    view.form.description = "Discard".to_string();
    view.cancel_edit();

    assert_eq!(view.form.description, "");
    assert_eq!(api.list().await.unwrap()[0].description(), "Keep");
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();
    view.form.description = "Doomed".to_string();
    view.submit(&api).await;

    // Nothing pending: nothing happens.
    assert!(!view.confirm_delete(&api).await);
    assert_eq!(api.list().await.unwrap().len(), 1);

    view.request_delete(1);
    assert!(view.confirm_delete(&api).await);

    assert!(view.tasks.is_empty());
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failures_become_generic_messages() {
    let mut view = TaskView::new();

    view.refresh(&Unreachable).await;
    assert_eq!(view.error.as_deref(), Some(LOAD_ERROR));
    assert!(view.tasks.is_empty());

    view.form.description = "Try".to_string();
    view.submit(&Unreachable).await;
    assert_eq!(view.error.as_deref(), Some(SAVE_ERROR));
    assert_eq!(view.form.description, "Try");

    view.request_delete(4);
    view.confirm_delete(&Unreachable).await;
    assert_eq!(view.error.as_deref(), Some(DELETE_ERROR));
}

#[tokio::test]
async fn test_successful_refresh_clears_error() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();

    view.refresh(&Unreachable).await;
    assert!(view.error.is_some());

    view.refresh(&api).await;
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn test_filtered_view_tracks_state() {
    let (api, _temp) = create_local_api();
    let mut view = TaskView::new();
    for (description, category) in [("Buy milk", "errands"), ("Write report", "work")] {
        view.form.description = description.to_string();
        view.form.category = category.to_string();
        view.submit(&api).await;
    }

    view.search = "milk".to_string();
    let found: Vec<_> = view.filtered().iter().map(|t| t.id).collect();
    assert_eq!(found, vec![1]);

    view.search.clear();
    view.set_filter("work");
    let found: Vec<_> = view.filtered().iter().map(|t| t.id).collect();
    assert_eq!(found, vec![2]);

    view.set_filter("");
    assert_eq!(view.filtered().len(), 2);
}
