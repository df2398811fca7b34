//! Group endpoints
//!
//! Groups have no PUT; membership changes go through `PUT /users/{id}/`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::tasks::TaskResponse;
use super::users::UserResponse;
use crate::db::repos::{Group, GroupDetail, GroupRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::CreateGroupRequest;

/// Full group view with members and tasks
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub users: Vec<UserResponse>,
    pub tasks: Vec<TaskResponse>,
}

impl From<GroupDetail> for GroupResponse {
    fn from(d: GroupDetail) -> Self {
        Self {
            id: d.group.id,
            name: d.group.name,
            users: d.users.into_iter().map(UserResponse::from).collect(),
            tasks: d.tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

/// Scalar-only group view, used when embedding
#[derive(Debug, Serialize)]
pub struct GroupSimpleResponse {
    pub id: i64,
    pub name: String,
}

impl From<Group> for GroupSimpleResponse {
    fn from(g: Group) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

#[derive(Serialize)]
pub struct GroupList {
    pub groups: Vec<GroupResponse>,
}

/// POST /groups/
async fn create_group(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), ApiError> {
    let group = GroupRepo::new(&state.pool).create(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

/// GET /groups/
async fn list_groups(State(state): State<Arc<AppState>>) -> Result<Json<GroupList>, ApiError> {
    let groups = GroupRepo::new(&state.pool).list().await?;
    Ok(Json(GroupList {
        groups: groups.into_iter().map(GroupResponse::from).collect(),
    }))
}

/// GET /groups/{id}/
async fn get_group(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<GroupResponse>, ApiError> {
    let group = GroupRepo::new(&state.pool).get(id).await?;
    Ok(Json(GroupResponse::from(group)))
}

/// DELETE /groups/{id}/ - cascades to the group's tasks
async fn delete_group(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<GroupResponse>, ApiError> {
    let group = GroupRepo::new(&state.pool).delete(id).await?;
    Ok(Json(GroupResponse::from(group)))
}

/// Group routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/groups/", get(list_groups).post(create_group))
        .route("/groups/{id}/", get(get_group).delete(delete_group))
}
