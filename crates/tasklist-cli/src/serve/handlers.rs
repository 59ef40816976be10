//! HTTP route handlers for the task server.
//!
//! Handlers are kept thin: they parse the request, take the manager lock
//! and delegate to [`tasklist_core::TaskManager`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::Value;

use tasklist_core::{Task, TaskId, TaskPatch};

use super::models::ApiFailure;
use super::templates;
use super::AppState;

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - Browser client.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(templates::render_index(&state.data_file))
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/tasks` - The full collection, in file order.
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiFailure> {
    let manager = state.manager.lock().await;
    Ok(Json(manager.list_tasks()?))
}

/// POST `/tasks` - Create a task from a partial body; responds 201.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiFailure> {
    let patch = into_patch(body)?;
    let mut manager = state.manager.lock().await;
    let task = manager.create_task(patch)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT `/tasks/{id}` - Merge a partial body into an existing task.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Task>, ApiFailure> {
    let id = parse_id(&id)?;
    let patch = into_patch(body)?;
    let mut manager = state.manager.lock().await;
    Ok(Json(manager.update_task(id, patch)?))
}

/// DELETE `/tasks/{id}` - Remove a task and return it.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiFailure> {
    let id = parse_id(&id)?;
    let mut manager = state.manager.lock().await;
    Ok(Json(manager.delete_task(id)?))
}

/// Ids that are not numbers can never match a task.
fn parse_id(raw: &str) -> Result<TaskId, ApiFailure> {
    raw.parse().map_err(|_| ApiFailure::not_found())
}

/// Any JSON object is a valid patch; field values are not checked.
fn into_patch(body: Result<Json<Value>, JsonRejection>) -> Result<TaskPatch, ApiFailure> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(ApiFailure::bad_request("Request body must be a JSON object")),
        Err(rejection) => Err(ApiFailure::bad_request(rejection.body_text())),
    }
}
