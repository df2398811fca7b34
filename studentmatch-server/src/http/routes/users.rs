//! User endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::groups::GroupResponse;
use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::{AssignGroupRequest, CreateUserRequest};

/// Full user view
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub netid: String,
    pub group_id: Option<i64>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            netid: u.netid,
            group_id: u.group_id,
        }
    }
}

/// Scalar-only user view, used when embedding
#[derive(Debug, Serialize)]
pub struct UserSimpleResponse {
    pub id: i64,
    pub name: String,
    pub netid: String,
}

impl From<User> for UserSimpleResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            netid: u.netid,
        }
    }
}

#[derive(Serialize)]
pub struct UserList {
    pub users: Vec<UserResponse>,
}

/// POST /users/ - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserSimpleResponse>), ApiError> {
    let user = UserRepo::new(&state.pool).create(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(UserSimpleResponse::from(user))))
}

/// GET /users/ - list all users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UserList>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(UserList {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /users/{id}/
async fn get_user(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id}/ - assign the user to a group
async fn assign_group(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    JsonBody(req): JsonBody<AssignGroupRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    let group_id = req.validate()?;
    let group = UserRepo::new(&state.pool).assign_group(id, group_id).await?;
    Ok(Json(GroupResponse::from(group)))
}

/// DELETE /users/{id}/
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).delete(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{id}/",
            get(get_user).put(assign_group).delete(delete_user),
        )
}
