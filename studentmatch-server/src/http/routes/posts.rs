//! Post endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::comments::CommentResponse;
use crate::db::repos::{PostDetail, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::CreatePostRequest;

/// Post with its comments
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub post_name: String,
    pub post_description: String,
    pub timestamp: String,
    pub comments: Vec<CommentResponse>,
}

impl From<PostDetail> for PostResponse {
    fn from(d: PostDetail) -> Self {
        Self {
            id: d.post.id,
            post_name: d.post.post_name,
            post_description: d.post.description,
            timestamp: d.post.timestamp,
            comments: d.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct PostList {
    pub posts: Vec<PostResponse>,
}

/// POST /posts/
async fn create_post(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let post = PostRepo::new(&state.pool).create(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /posts/
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<PostList>, ApiError> {
    let posts = PostRepo::new(&state.pool).list().await?;
    Ok(Json(PostList {
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

/// GET /posts/{id}/
async fn get_post(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepo::new(&state.pool).get(id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// DELETE /posts/{id}/ - cascades to the post's comments
async fn delete_post(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepo::new(&state.pool).delete(id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts/", get(list_posts).post(create_post))
        .route("/posts/{id}/", get(get_post).delete(delete_post))
}
