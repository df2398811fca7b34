//! Comment repository

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::posts::{self, PostDetail};
use super::{begin_write, DbError};
use crate::models::{CommentChanges, NewComment};

/// Comment record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Comment {
    pub id: i64,
    pub description: String,
    pub timestamp: String,
    pub post_id: i64,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a comment to a post, returning the post's full view.
    pub async fn create(&self, post_id: i64, comment: NewComment) -> Result<PostDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let post = posts::fetch(&mut tx, post_id)
            .await?
            .ok_or_else(|| DbError::not_found("Post"))?;

        let (comment_id,): (i64,) = sqlx::query_as(
            "INSERT INTO comments (description, timestamp, post_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&comment.description)
        .bind(&comment.timestamp)
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        let detail = posts::load_detail(&mut tx, post).await?;
        tx.commit().await?;

        tracing::debug!(comment_id, post_id, "comment created");
        Ok(detail)
    }

    /// Apply a partial update, returning the owning post's full view.
    pub async fn update(&self, id: i64, changes: CommentChanges) -> Result<PostDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let comment = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Comment"))?;

        sqlx::query(
            r#"
            UPDATE comments
            SET description = COALESCE(?, description),
                timestamp = COALESCE(?, timestamp)
            WHERE id = ?
            "#,
        )
        .bind(changes.description.as_deref())
        .bind(changes.timestamp.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let post = posts::fetch(&mut tx, comment.post_id)
            .await?
            .ok_or_else(|| DbError::not_found("Post"))?;
        let detail = posts::load_detail(&mut tx, post).await?;
        tx.commit().await?;

        tracing::debug!(comment_id = id, "comment updated");
        Ok(detail)
    }

    pub async fn list(&self) -> Result<Vec<Comment>, DbError> {
        let comments = sqlx::query_as(
            "SELECT id, description, timestamp, post_id FROM comments ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn get(&self, id: i64) -> Result<Comment, DbError> {
        let mut conn = self.pool.acquire().await?;
        fetch(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::not_found("Comment"))
    }

    pub async fn delete(&self, id: i64) -> Result<Comment, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let comment = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Comment"))?;

        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(comment_id = id, "comment deleted");
        Ok(comment)
    }
}

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<Comment>, DbError> {
    let comment = sqlx::query_as("SELECT id, description, timestamp, post_id FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(comment)
}

pub(crate) async fn list_for_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<Vec<Comment>, DbError> {
    let comments = sqlx::query_as(
        "SELECT id, description, timestamp, post_id FROM comments WHERE post_id = ? ORDER BY id",
    )
    .bind(post_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::db::repos::PostRepo;
    use crate::models::NewPost;

    #[tokio::test]
    async fn update_single_field() {
        let pool = open_in_memory().await.unwrap();
        let post = PostRepo::new(&pool)
            .create(NewPost {
                post_name: "p".into(),
                description: "d".into(),
                timestamp: "t".into(),
            })
            .await
            .unwrap();
        let repo = CommentRepo::new(&pool);
        repo.create(
            post.post.id,
            NewComment {
                description: "first".into(),
                timestamp: "10:00".into(),
            },
        )
        .await
        .unwrap();

        let detail = repo
            .update(
                1,
                CommentChanges {
                    timestamp: Some("11:00".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(detail.comments[0].description, "first");
        assert_eq!(detail.comments[0].timestamp, "11:00");
    }

    #[tokio::test]
    async fn create_under_missing_post_is_not_found() {
        let pool = open_in_memory().await.unwrap();
        let err = CommentRepo::new(&pool)
            .create(
                3,
                NewComment {
                    description: "x".into(),
                    timestamp: "y".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Post" }));
    }
}
