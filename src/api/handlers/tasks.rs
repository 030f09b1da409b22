//! Task record endpoints.

use crate::api::{
    error::ApiError,
    extract::{Body, CurrentUser, Params, record_id},
    state::AppState,
};
use crate::task::{
    domain::{TaskId, TaskUpdate},
    services::ListTasksRequest,
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    record_id(raw, "Task").map(TaskId::from_uuid)
}

/// `GET /api/tasks` — the owner's tasks with optional filters and paging.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Params(request): Params<ListTasksRequest>,
) -> Result<Json<Value>, ApiError> {
    let tasks = state.tasks.list(identity.user_id(), request).await?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// `GET /api/tasks/{id}` — one task.
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = task_id(&raw_id)?;
    let task = state.tasks.get(id, identity.user_id()).await?;
    Ok(Json(json!({ "task": task })))
}

/// `PATCH /api/tasks/{id}` — partial update.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
    Body(payload): Body<TaskUpdate>,
) -> Result<Json<Value>, ApiError> {
    let id = task_id(&raw_id)?;
    let task = state.tasks.update(id, identity.user_id(), payload).await?;
    Ok(Json(json!({ "task": task })))
}

/// `DELETE /api/tasks/{id}` — delete; absent tasks succeed silently.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = task_id(&raw_id)?;
    state.tasks.delete(id, identity.user_id()).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /api/tasks/{id}/complete` — mark completed (idempotent).
pub async fn complete(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = task_id(&raw_id)?;
    let task = state.tasks.complete(id, identity.user_id()).await?;
    Ok(Json(json!({ "task": task })))
}
