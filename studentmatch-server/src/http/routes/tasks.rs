//! Task endpoints
//!
//! Tasks are created under a group and every mutation answers with the
//! owning group's full view.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::groups::GroupResponse;
use crate::db::repos::{Task, TaskRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::{CreateTaskRequest, UpdateTaskRequest};

/// Task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub task_name: String,
    pub task_description: String,
    pub due_date: String,
    pub group_id: i64,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            task_name: t.task_name,
            task_description: t.description,
            due_date: t.due_date,
            group_id: t.group_id,
        }
    }
}

#[derive(Serialize)]
pub struct TaskList {
    pub tasks: Vec<TaskResponse>,
}

/// POST /groups/{id}/tasks/
async fn create_task(
    State(state): State<Arc<AppState>>,
    ResourceId(group_id): ResourceId,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), ApiError> {
    let task = req.validate()?;
    let group = TaskRepo::new(&state.pool).create(group_id, task).await?;
    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

/// PUT /tasks/{id}/
async fn update_task(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    let changes = req.validate()?;
    let group = TaskRepo::new(&state.pool).update(id, changes).await?;
    Ok(Json(GroupResponse::from(group)))
}

/// GET /tasks/
async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<TaskList>, ApiError> {
    let tasks = TaskRepo::new(&state.pool).list().await?;
    Ok(Json(TaskList {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

/// GET /tasks/{id}/
async fn get_task(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = TaskRepo::new(&state.pool).get(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// DELETE /tasks/{id}/
async fn delete_task(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = TaskRepo::new(&state.pool).delete(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Task routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/groups/{id}/tasks/", post(create_task))
        .route("/tasks/", get(list_tasks))
        .route(
            "/tasks/{id}/",
            get(get_task).put(update_task).delete(delete_task),
        )
}
