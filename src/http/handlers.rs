//! CRUD request handlers.
//!
//! Stateless async functions over (state, params, body); every storage
//! access goes through the shared store handle, never the file directly.

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::server::AppState;
use crate::routing::PathParams;
use crate::storage::StoreError;
use crate::tasks::{search_filter, CreateTask, Task, UpdateTask, TASKS_TABLE};

/// `GET /tasks?search=<text>` — list tasks, optionally filtered by a
/// free-text term applied across all searchable fields.
pub async fn list_tasks(state: &AppState, uri: &Uri) -> Response {
    let query: HashMap<String, String> = match Query::try_from_uri(uri) {
        Ok(Query(query)) => query,
        Err(_) => HashMap::new(),
    };

    let filter = query
        .get("search")
        .filter(|term| !term.is_empty())
        .map(|term| search_filter(term));

    let store = state.store.lock().await;
    let tasks = store.select(TASKS_TABLE, filter.as_ref());

    (StatusCode::OK, Json(tasks)).into_response()
}

/// `POST /tasks` — create a task from `{title, description}`.
pub async fn create_task(state: &AppState, body: &[u8]) -> Response {
    let payload: CreateTask = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed create body");
            return error_response(StatusCode::BAD_REQUEST, "invalid JSON body");
        }
    };

    let (title, description) = match payload.into_fields() {
        Some(fields) => fields,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Title and description are required",
            );
        }
    };

    let task = Task::new(title, description);
    let task_id = task.id;

    let mut store = state.store.lock().await;
    match store.insert(TASKS_TABLE, task.into_record()) {
        Ok(()) => {
            tracing::info!(task_id = %task_id, "Task created");
            StatusCode::CREATED.into_response()
        }
        Err(e) => storage_failure(e),
    }
}

/// `PUT /tasks/:id` — patch title/description, always refresh `updated_at`.
pub async fn update_task(state: &AppState, params: &PathParams, body: &[u8]) -> Response {
    let id = params.get("id").map(String::as_str).unwrap_or_default();

    let payload: UpdateTask = if body.is_empty() {
        UpdateTask::default()
    } else {
        match serde_json::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected malformed update body");
                return error_response(StatusCode::BAD_REQUEST, "invalid JSON body");
            }
        }
    };

    let mut store = state.store.lock().await;
    match store.update(TASKS_TABLE, id, payload.into_patch()) {
        Ok(()) => {
            tracing::info!(task_id = %id, "Task updated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(StoreError::RecordNotFound) => error_response(StatusCode::NOT_FOUND, "Task not found"),
        Err(e) => storage_failure(e),
    }
}

/// `DELETE /tasks/:id` — remove a task outright; no tombstone.
pub async fn delete_task(state: &AppState, params: &PathParams) -> Response {
    let id = params.get("id").map(String::as_str).unwrap_or_default();

    let mut store = state.store.lock().await;
    match store.delete(TASKS_TABLE, id) {
        Ok(()) => {
            tracing::info!(task_id = %id, "Task deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(StoreError::RecordNotFound) => error_response(StatusCode::NOT_FOUND, "Task not found"),
        Err(e) => storage_failure(e),
    }
}

/// A JSON `{"error": ...}` body with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn storage_failure(error: StoreError) -> Response {
    tracing::error!(error = %error, "Store operation failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
}
