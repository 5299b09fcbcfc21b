//! Handlers for the task collection.
//!
//! The same handlers serve `/{user_id}/tasks` and its `/{user_id}/books`
//! alias, see [`crate::routes::task`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskmaster_core::types::DbId;
use taskmaster_db::models::task::{CreateTask, PatchTask, Task, UpdateTask};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::services::TaskService;
use crate::state::AppState;

/// Response body for the list endpoint.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub count: usize,
}

/// GET /api/{user_id}/tasks
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(user_id): AppPath<String>,
) -> AppResult<Json<TaskListResponse>> {
    let owner = user.scope(&user_id)?;
    let tasks = TaskService::list(state.store.as_ref(), owner).await?;
    Ok(Json(TaskListResponse {
        count: tasks.len(),
        tasks,
    }))
}

/// POST /api/{user_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(user_id): AppPath<String>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let owner = user.scope(&user_id)?;
    let task = TaskService::create(state.store.as_ref(), owner, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/{user_id}/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((user_id, id)): AppPath<(String, DbId)>,
) -> AppResult<Json<Task>> {
    let owner = user.scope(&user_id)?;
    let task = TaskService::get(state.store.as_ref(), owner, id).await?;
    Ok(Json(task))
}

/// PUT /api/{user_id}/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((user_id, id)): AppPath<(String, DbId)>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let owner = user.scope(&user_id)?;
    let task = TaskService::update(state.store.as_ref(), owner, id, &input).await?;
    Ok(Json(task))
}

/// PATCH /api/{user_id}/tasks/{id}
pub async fn patch(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((user_id, id)): AppPath<(String, DbId)>,
    AppJson(input): AppJson<PatchTask>,
) -> AppResult<Json<Task>> {
    let owner = user.scope(&user_id)?;
    let task = TaskService::patch(state.store.as_ref(), owner, id, &input).await?;
    Ok(Json(task))
}

/// DELETE /api/{user_id}/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((user_id, id)): AppPath<(String, DbId)>,
) -> AppResult<StatusCode> {
    let owner = user.scope(&user_id)?;
    TaskService::delete(state.store.as_ref(), owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
