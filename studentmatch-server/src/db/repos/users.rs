//! User repository
//!
//! Group membership is the nullable `users.group_id` foreign key. Deleting a
//! group sets it back to NULL; deleting a user drops its rating links.

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::groups::{self, GroupDetail};
use super::{begin_write, DbError};
use crate::models::NewUser;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub netid: String,
    pub group_id: Option<i64>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user with no group.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, netid)
            VALUES (?, ?)
            RETURNING id, name, netid, group_id
            "#,
        )
        .bind(&user.name)
        .bind(&user.netid)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(user_id = user.id, "user created");
        Ok(user)
    }

    /// All users in insertion order.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as("SELECT id, name, netid, group_id FROM users ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        let mut conn = self.pool.acquire().await?;
        fetch(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::not_found("User"))
    }

    /// Move a user into a group and return the group's full view.
    ///
    /// The group is resolved before the user, so a request naming two
    /// missing rows reports the group.
    pub async fn assign_group(&self, user_id: i64, group_id: i64) -> Result<GroupDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let group = groups::fetch(&mut tx, group_id)
            .await?
            .ok_or_else(|| DbError::not_found("Group"))?;
        fetch(&mut tx, user_id)
            .await?
            .ok_or_else(|| DbError::not_found("User"))?;

        sqlx::query("UPDATE users SET group_id = ? WHERE id = ?")
            .bind(group_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let detail = groups::load_detail(&mut tx, group).await?;
        tx.commit().await?;

        tracing::debug!(user_id, group_id, "user assigned to group");
        Ok(detail)
    }

    /// Delete a user, returning the row as it was before deletion.
    pub async fn delete(&self, id: i64) -> Result<User, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let user = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("User"))?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(user_id = id, "user deleted");
        Ok(user)
    }
}

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<User>, DbError> {
    let user = sqlx::query_as("SELECT id, name, netid, group_id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(user)
}

pub(crate) async fn list_for_group(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<User>, DbError> {
    let users = sqlx::query_as(
        "SELECT id, name, netid, group_id FROM users WHERE group_id = ? ORDER BY id",
    )
    .bind(group_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::db::repos::GroupRepo;
    use crate::models::NewGroup;

    fn alice() -> NewUser {
        NewUser {
            name: "Alice".into(),
            netid: "ab123".into(),
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increment() {
        let pool = open_in_memory().await.unwrap();
        let repo = UserRepo::new(&pool);

        let first = repo.create(alice()).await.unwrap();
        let second = repo.create(alice()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.group_id, None);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let pool = open_in_memory().await.unwrap();
        let repo = UserRepo::new(&pool);

        let first = repo.create(alice()).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let next = repo.create(alice()).await.unwrap();

        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn assign_reports_missing_group_first() {
        let pool = open_in_memory().await.unwrap();
        let err = UserRepo::new(&pool).assign_group(9, 9).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Group" }));
    }

    #[tokio::test]
    async fn assign_then_group_lists_user() {
        let pool = open_in_memory().await.unwrap();
        let users = UserRepo::new(&pool);
        let user = users.create(alice()).await.unwrap();
        let group = GroupRepo::new(&pool)
            .create(NewGroup { name: "study".into() })
            .await
            .unwrap();

        let detail = users.assign_group(user.id, group.group.id).await.unwrap();

        assert_eq!(detail.users.len(), 1);
        assert_eq!(detail.users[0].group_id, Some(group.group.id));
        assert_eq!(users.get(user.id).await.unwrap().group_id, Some(group.group.id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_assignments_all_commit() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::create_pool(&dir.path().join("StudentMatch.db"))
            .await
            .unwrap();
        let group_id = GroupRepo::new(&pool)
            .create(NewGroup { name: "study".into() })
            .await
            .unwrap()
            .group
            .id;
        let users = UserRepo::new(&pool);
        let mut user_ids = Vec::new();
        for _ in 0..10 {
            user_ids.push(users.create(alice()).await.unwrap().id);
        }

        let handles: Vec<_> = user_ids
            .iter()
            .map(|&user_id| {
                let pool = pool.clone();
                tokio::spawn(async move { UserRepo::new(&pool).assign_group(user_id, group_id).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let detail = GroupRepo::new(&pool).get(group_id).await.unwrap();
        assert_eq!(detail.users.len(), 10);
    }
}
