//! Task API Endpoints
//! Mission: Task listing, creation, status updates, and deletion

use crate::{
    app::AppState,
    employees::models::Employee,
    error::ApiError,
    tasks::models::{CreateTaskRequest, ExpandedTask, TaskResponse, UpdateStatusRequest},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

/// List all tasks, expanded - GET /api/tasks (admin only)
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpandedTask>>, ApiError> {
    let tasks = state.tasks.list_expanded()?;
    Ok(Json(tasks))
}

/// List the caller's tasks - GET /api/tasks/my-tasks
pub async fn my_tasks(
    State(state): State<AppState>,
    Extension(employee): Extension<Employee>,
) -> Result<Json<Vec<ExpandedTask>>, ApiError> {
    let tasks = state.tasks.list_by_assignee_expanded(&employee.id)?;
    Ok(Json(tasks))
}

/// Create a task - POST /api/tasks (admin only)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(employee): Extension<Employee>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let task = state.lifecycle.create_task(&employee, payload)?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from_task(&task))))
}

/// Update a task's status - PUT /api/tasks/:id/status
/// Ownership (assignee-or-admin) is checked by the lifecycle engine.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(employee): Extension<Employee>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = state
        .lifecycle
        .set_status(&employee, &id, payload.status.as_deref())?;
    Ok(Json(TaskResponse::from_task(&task)))
}

/// Delete a task - DELETE /api/tasks/:id (admin only)
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(&id)?;
    state.lifecycle.delete_task(&id)?;
    Ok(Json(json!({ "message": "Task removed" })))
}

fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Task not found"))
}
