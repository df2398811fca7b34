//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Reads that need several queries share one pooled connection
//! - Mutations look up every referenced row inside the same transaction
//!   that writes, so a failed lookup leaves nothing behind
//! - Write transactions start with `BEGIN IMMEDIATE`, so concurrent writers
//!   queue on the busy timeout instead of failing mid-transaction
//! - Parent views (group with users and tasks, post with comments) are
//!   assembled from queries at read time

use sqlx::{Sqlite, SqlitePool, Transaction};

pub mod users;
pub mod groups;
pub mod tasks;
pub mod posts;
pub mod comments;
pub mod rates;

pub use users::{User, UserRepo};
pub use groups::{Group, GroupDetail, GroupRepo};
pub use tasks::{Task, TaskRepo};
pub use posts::{Post, PostDetail, PostRepo};
pub use comments::{Comment, CommentRepo};
pub use rates::{Rate, RateDetail, RateRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} not found")]
    NotFound { resource: &'static str },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

/// Open a transaction that holds the database write lock from its first
/// statement.
///
/// A deferred transaction that has already read cannot be upgraded while
/// another writer holds the lock; SQLite reports `SQLITE_BUSY` at once
/// without consulting the busy handler.
pub(crate) async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, DbError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
