//! Task repository
//!
//! Tasks always belong to a group through `tasks.group_id`.

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::groups::{self, GroupDetail};
use super::{begin_write, DbError};
use crate::models::{NewTask, TaskChanges};

/// Task record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub description: String,
    pub due_date: String,
    pub group_id: i64,
}

/// Task repository
pub struct TaskRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a task to a group, returning the group's full view.
    pub async fn create(&self, group_id: i64, task: NewTask) -> Result<GroupDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let group = groups::fetch(&mut tx, group_id)
            .await?
            .ok_or_else(|| DbError::not_found("Group"))?;

        let (task_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tasks (task_name, description, due_date, group_id)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&task.task_name)
        .bind(&task.description)
        .bind(&task.due_date)
        .bind(group_id)
        .fetch_one(&mut *tx)
        .await?;

        let detail = groups::load_detail(&mut tx, group).await?;
        tx.commit().await?;

        tracing::debug!(task_id, group_id, "task created");
        Ok(detail)
    }

    /// Apply a partial update, returning the owning group's full view.
    pub async fn update(&self, id: i64, changes: TaskChanges) -> Result<GroupDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let task = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Task"))?;

        sqlx::query(
            r#"
            UPDATE tasks
            SET task_name = COALESCE(?, task_name),
                description = COALESCE(?, description),
                due_date = COALESCE(?, due_date)
            WHERE id = ?
            "#,
        )
        .bind(changes.task_name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.due_date.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let group = groups::fetch(&mut tx, task.group_id)
            .await?
            .ok_or_else(|| DbError::not_found("Group"))?;
        let detail = groups::load_detail(&mut tx, group).await?;
        tx.commit().await?;

        tracing::debug!(task_id = id, "task updated");
        Ok(detail)
    }

    pub async fn list(&self) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as(
            "SELECT id, task_name, description, due_date, group_id FROM tasks ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn get(&self, id: i64) -> Result<Task, DbError> {
        let mut conn = self.pool.acquire().await?;
        fetch(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::not_found("Task"))
    }

    /// Delete a task, returning the row as it was before deletion.
    pub async fn delete(&self, id: i64) -> Result<Task, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let task = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Task"))?;

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(task_id = id, "task deleted");
        Ok(task)
    }
}

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<Task>, DbError> {
    let task = sqlx::query_as(
        "SELECT id, task_name, description, due_date, group_id FROM tasks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(task)
}

pub(crate) async fn list_for_group(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<Task>, DbError> {
    let tasks = sqlx::query_as(
        "SELECT id, task_name, description, due_date, group_id FROM tasks WHERE group_id = ? ORDER BY id",
    )
    .bind(group_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::db::repos::GroupRepo;
    use crate::models::NewGroup;

    async fn seeded() -> (SqlitePool, i64) {
        let pool = open_in_memory().await.unwrap();
        let group = GroupRepo::new(&pool)
            .create(NewGroup { name: "g".into() })
            .await
            .unwrap();
        (pool, group.group.id)
    }

    #[tokio::test]
    async fn create_under_missing_group_writes_nothing() {
        let (pool, _) = seeded().await;
        let repo = TaskRepo::new(&pool);

        let err = repo
            .create(
                42,
                NewTask {
                    task_name: "t".into(),
                    description: "d".into(),
                    due_date: "x".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "Group" }));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_unnamed_fields() {
        let (pool, group_id) = seeded().await;
        let repo = TaskRepo::new(&pool);
        repo.create(
            group_id,
            NewTask {
                task_name: "essay".into(),
                description: "draft".into(),
                due_date: "monday".into(),
            },
        )
        .await
        .unwrap();

        let detail = repo
            .update(
                1,
                TaskChanges {
                    description: Some("final".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(detail.group.id, group_id);
        let task = &detail.tasks[0];
        assert_eq!(task.task_name, "essay");
        assert_eq!(task.description, "final");
        assert_eq!(task.due_date, "monday");
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let (pool, _) = seeded().await;
        let err = TaskRepo::new(&pool)
            .update(7, TaskChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Task" }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_under_one_group_all_commit() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::create_pool(&dir.path().join("StudentMatch.db"))
            .await
            .unwrap();
        let group_id = GroupRepo::new(&pool)
            .create(NewGroup { name: "g".into() })
            .await
            .unwrap()
            .group
            .id;

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    TaskRepo::new(&pool)
                        .create(
                            group_id,
                            NewTask {
                                task_name: format!("task {i}"),
                                description: "d".into(),
                                due_date: "friday".into(),
                            },
                        )
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let detail = GroupRepo::new(&pool).get(group_id).await.unwrap();
        assert_eq!(detail.tasks.len(), 40);
    }
}
