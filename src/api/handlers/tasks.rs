//! Task API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskdeckError;
use crate::model::{Task, TaskStatus};
use crate::storage::tasks::{NewTask, TaskFilter, TaskPatch};
use crate::storage::Store;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Task list query parameters
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Create task request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

/// Update task request (all fields optional; absent fields keep their value)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Helper functions
// ============================================================================

fn error_response(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse { error: msg.into() }),
    )
}

/// Translate a store error into an HTTP response
fn store_error(err: TaskdeckError) -> ApiError {
    match err {
        TaskdeckError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        TaskdeckError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Task not found"),
        other => {
            tracing::error!("store error: {}", other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Parse a status value from a request, rejecting anything outside the enum
fn parse_status(s: &str) -> Result<TaskStatus, ApiError> {
    s.parse::<TaskStatus>().map_err(store_error)
}

/// Parse a due date from a request (RFC 3339)
fn parse_due_date(s: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("invalid dueDate '{}': {}", s, e),
            )
        })
}

/// The browser form submits empty strings for untouched optional fields;
/// treat them the same as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/tasks
/// List tasks, optionally filtered by status and/or title search
pub async fn list_tasks(
    State(store): State<Arc<Store>>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let mut filter = TaskFilter::default();
    if let Some(status) = non_empty(query.status) {
        filter.status = Some(parse_status(&status)?);
    }
    filter.search = non_empty(query.search);

    let tasks = store.list_tasks(&filter).map_err(store_error)?;
    Ok(Json(tasks))
}

/// POST /api/tasks
/// Create a new task
pub async fn create_task(
    State(store): State<Arc<Store>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let status = match non_empty(req.status) {
        Some(s) => parse_status(&s)?,
        None => TaskStatus::default(),
    };
    let due_date = match non_empty(req.due_date) {
        Some(s) => Some(parse_due_date(&s)?),
        None => None,
    };

    let task = store
        .create_task(NewTask {
            title: req.title.unwrap_or_default(),
            description: req.description.unwrap_or_default(),
            due_date,
            status,
        })
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}
/// Get a single task
pub async fn get_task(
    State(store): State<Arc<Store>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = store.get_task(id).map_err(store_error)?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id}
/// Partially update a task; absent fields keep their stored value
pub async fn update_task(
    State(store): State<Arc<Store>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let status = match non_empty(req.status) {
        Some(s) => Some(parse_status(&s)?),
        None => None,
    };
    let due_date = match non_empty(req.due_date) {
        Some(s) => Some(parse_due_date(&s)?),
        None => None,
    };

    let patch = TaskPatch {
        title: req.title,
        description: req.description,
        due_date,
        status,
    };

    let task = store.update_task(id, &patch).map_err(store_error)?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
/// Permanently delete a task
pub async fn delete_task(
    State(store): State<Arc<Store>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    store.delete_task(id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}
