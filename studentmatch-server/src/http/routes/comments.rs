//! Comment endpoints
//!
//! Comments embedded in a post omit `post_id`; the comment-level routes
//! include it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::posts::PostResponse;
use crate::db::repos::{Comment, CommentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::{CreateCommentRequest, UpdateCommentRequest};

/// Comment as embedded in a post
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub comment_description: String,
    pub timestamp: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            comment_description: c.description,
            timestamp: c.timestamp,
        }
    }
}

/// Comment with its parent post id
#[derive(Debug, Serialize)]
pub struct CommentWithPostResponse {
    pub id: i64,
    pub comment_description: String,
    pub timestamp: String,
    pub post_id: i64,
}

impl From<Comment> for CommentWithPostResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            comment_description: c.description,
            timestamp: c.timestamp,
            post_id: c.post_id,
        }
    }
}

#[derive(Serialize)]
pub struct CommentList {
    pub comments: Vec<CommentWithPostResponse>,
}

/// POST /posts/{id}/comments/
async fn create_comment(
    State(state): State<Arc<AppState>>,
    ResourceId(post_id): ResourceId,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let comment = req.validate()?;
    let post = CommentRepo::new(&state.pool).create(post_id, comment).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// PUT /comments/{id}/
async fn update_comment(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    JsonBody(req): JsonBody<UpdateCommentRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let changes = req.validate()?;
    let post = CommentRepo::new(&state.pool).update(id, changes).await?;
    Ok(Json(PostResponse::from(post)))
}

/// GET /comments/
async fn list_comments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommentList>, ApiError> {
    let comments = CommentRepo::new(&state.pool).list().await?;
    Ok(Json(CommentList {
        comments: comments
            .into_iter()
            .map(CommentWithPostResponse::from)
            .collect(),
    }))
}

/// GET /comments/{id}/
async fn get_comment(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<CommentWithPostResponse>, ApiError> {
    let comment = CommentRepo::new(&state.pool).get(id).await?;
    Ok(Json(CommentWithPostResponse::from(comment)))
}

/// DELETE /comments/{id}/
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<CommentWithPostResponse>, ApiError> {
    let comment = CommentRepo::new(&state.pool).delete(id).await?;
    Ok(Json(CommentWithPostResponse::from(comment)))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts/{id}/comments/", post(create_comment))
        .route("/comments/", get(list_comments))
        .route(
            "/comments/{id}/",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}
