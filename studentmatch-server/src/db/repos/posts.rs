//! Post repository
//!
//! Comments hang off posts through `comments.post_id`; deleting a post
//! deletes its comments.

use std::collections::HashMap;

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::comments::{self, Comment};
use super::{begin_write, DbError};
use crate::models::NewPost;

/// Post record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    pub id: i64,
    pub post_name: String,
    pub description: String,
    pub timestamp: String,
}

/// Post with its comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, post: NewPost) -> Result<PostDetail, DbError> {
        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO posts (post_name, description, timestamp)
            VALUES (?, ?, ?)
            RETURNING id, post_name, description, timestamp
            "#,
        )
        .bind(&post.post_name)
        .bind(&post.description)
        .bind(&post.timestamp)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(post_id = post.id, "post created");
        Ok(PostDetail {
            post,
            comments: Vec::new(),
        })
    }

    /// All posts with their comments, in two queries.
    pub async fn list(&self) -> Result<Vec<PostDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let posts: Vec<Post> = sqlx::query_as(
            "SELECT id, post_name, description, timestamp FROM posts ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let all_comments: Vec<Comment> = sqlx::query_as(
            "SELECT id, description, timestamp, post_id FROM comments ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in all_comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        Ok(posts
            .into_iter()
            .map(|post| PostDetail {
                comments: by_post.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<PostDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        let post = fetch(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::not_found("Post"))?;
        load_detail(&mut conn, post).await
    }

    /// Delete a post and its comments, returning the pre-delete view.
    pub async fn delete(&self, id: i64) -> Result<PostDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let post = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Post"))?;
        let detail = load_detail(&mut tx, post).await?;

        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(post_id = id, comments_removed = detail.comments.len(), "post deleted");
        Ok(detail)
    }
}

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<Post>, DbError> {
    let post = sqlx::query_as("SELECT id, post_name, description, timestamp FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(post)
}

pub(crate) async fn load_detail(
    conn: &mut SqliteConnection,
    post: Post,
) -> Result<PostDetail, DbError> {
    let comments = comments::list_for_post(&mut *conn, post.id).await?;
    Ok(PostDetail { post, comments })
}
