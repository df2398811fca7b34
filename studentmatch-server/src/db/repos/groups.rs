//! Group repository
//!
//! A group's users and tasks are never stored on the group row; they are
//! read back by `group_id` whenever a full view is built. Deleting a group
//! cascades to its tasks and clears `users.group_id`.

use std::collections::HashMap;

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::tasks::{self, Task};
use super::users::{self, User};
use super::{begin_write, DbError};
use crate::models::NewGroup;

/// Group record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// Group with its members and tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetail {
    pub group: Group,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
}

/// Group repository
pub struct GroupRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GroupRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, group: NewGroup) -> Result<GroupDetail, DbError> {
        let group: Group = sqlx::query_as("INSERT INTO groups (name) VALUES (?) RETURNING id, name")
            .bind(&group.name)
            .fetch_one(self.pool)
            .await?;

        tracing::debug!(group_id = group.id, "group created");
        Ok(GroupDetail {
            group,
            users: Vec::new(),
            tasks: Vec::new(),
        })
    }

    /// All groups with members and tasks.
    ///
    /// Three queries in total: groups, grouped users, tasks.
    pub async fn list(&self) -> Result<Vec<GroupDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let groups: Vec<Group> = sqlx::query_as("SELECT id, name FROM groups ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        let members: Vec<User> = sqlx::query_as(
            "SELECT id, name, netid, group_id FROM users WHERE group_id IS NOT NULL ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let all_tasks: Vec<Task> = sqlx::query_as(
            "SELECT id, task_name, description, due_date, group_id FROM tasks ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut users_by_group: HashMap<i64, Vec<User>> = HashMap::new();
        for user in members {
            if let Some(group_id) = user.group_id {
                users_by_group.entry(group_id).or_default().push(user);
            }
        }

        let mut tasks_by_group: HashMap<i64, Vec<Task>> = HashMap::new();
        for task in all_tasks {
            tasks_by_group.entry(task.group_id).or_default().push(task);
        }

        Ok(groups
            .into_iter()
            .map(|group| GroupDetail {
                users: users_by_group.remove(&group.id).unwrap_or_default(),
                tasks: tasks_by_group.remove(&group.id).unwrap_or_default(),
                group,
            })
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<GroupDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        let group = fetch(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::not_found("Group"))?;
        load_detail(&mut conn, group).await
    }

    /// Delete a group and its tasks, returning the pre-delete view.
    pub async fn delete(&self, id: i64) -> Result<GroupDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let group = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Group"))?;
        let detail = load_detail(&mut tx, group).await?;

        sqlx::query("DELETE FROM groups WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            group_id = id,
            tasks_removed = detail.tasks.len(),
            users_detached = detail.users.len(),
            "group deleted"
        );
        Ok(detail)
    }
}

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<Group>, DbError> {
    let group = sqlx::query_as("SELECT id, name FROM groups WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(group)
}

/// Attach current members and tasks to a group row.
pub(crate) async fn load_detail(
    conn: &mut SqliteConnection,
    group: Group,
) -> Result<GroupDetail, DbError> {
    let users = users::list_for_group(&mut *conn, group.id).await?;
    let tasks = tasks::list_for_group(&mut *conn, group.id).await?;
    Ok(GroupDetail {
        group,
        users,
        tasks,
    })
}
