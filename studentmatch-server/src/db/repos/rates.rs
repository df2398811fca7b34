//! Rating repository
//!
//! Ratings link to users and groups through the `rate_users` and
//! `rate_groups` join tables. Links cascade from either side, so deleting a
//! user, group or rating removes its links.

use std::collections::HashMap;

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::groups::{self, Group};
use super::users::{self, User};
use super::{begin_write, DbError};
use crate::models::NewRate;

/// Rate record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Rate {
    pub id: i64,
    pub stars: i64,
}

/// Rate with the users and groups it is linked to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateDetail {
    pub rate: Rate,
    pub users: Vec<User>,
    pub groups: Vec<Group>,
}

#[derive(FromRow)]
struct LinkedUser {
    rate_id: i64,
    #[sqlx(flatten)]
    user: User,
}

#[derive(FromRow)]
struct LinkedGroup {
    rate_id: i64,
    #[sqlx(flatten)]
    group: Group,
}

/// Rate repository
pub struct RateRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RateRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a rating and its links. Every linked id must exist.
    pub async fn create(&self, rate: NewRate) -> Result<RateDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        for &user_id in &rate.user_ids {
            users::fetch(&mut tx, user_id)
                .await?
                .ok_or_else(|| DbError::not_found("User"))?;
        }
        for &group_id in &rate.group_ids {
            groups::fetch(&mut tx, group_id)
                .await?
                .ok_or_else(|| DbError::not_found("Group"))?;
        }

        let created: Rate = sqlx::query_as("INSERT INTO rates (stars) VALUES (?) RETURNING id, stars")
            .bind(rate.stars)
            .fetch_one(&mut *tx)
            .await?;

        for &user_id in &rate.user_ids {
            sqlx::query("INSERT INTO rate_users (rate_id, user_id) VALUES (?, ?)")
                .bind(created.id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        for &group_id in &rate.group_ids {
            sqlx::query("INSERT INTO rate_groups (rate_id, group_id) VALUES (?, ?)")
                .bind(created.id)
                .bind(group_id)
                .execute(&mut *tx)
                .await?;
        }

        let detail = load_detail(&mut tx, created).await?;
        tx.commit().await?;

        tracing::debug!(
            rate_id = detail.rate.id,
            users = detail.users.len(),
            groups = detail.groups.len(),
            "rate created"
        );
        Ok(detail)
    }

    /// All ratings with their links, in three queries.
    pub async fn list(&self) -> Result<Vec<RateDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let rates: Vec<Rate> = sqlx::query_as("SELECT id, stars FROM rates ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        let linked_users: Vec<LinkedUser> = sqlx::query_as(
            r#"
            SELECT ru.rate_id, u.id, u.name, u.netid, u.group_id
            FROM rate_users ru
            JOIN users u ON u.id = ru.user_id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let linked_groups: Vec<LinkedGroup> = sqlx::query_as(
            r#"
            SELECT rg.rate_id, g.id, g.name
            FROM rate_groups rg
            JOIN groups g ON g.id = rg.group_id
            ORDER BY g.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut users_by_rate: HashMap<i64, Vec<User>> = HashMap::new();
        for link in linked_users {
            users_by_rate.entry(link.rate_id).or_default().push(link.user);
        }
        let mut groups_by_rate: HashMap<i64, Vec<Group>> = HashMap::new();
        for link in linked_groups {
            groups_by_rate.entry(link.rate_id).or_default().push(link.group);
        }

        Ok(rates
            .into_iter()
            .map(|rate| RateDetail {
                users: users_by_rate.remove(&rate.id).unwrap_or_default(),
                groups: groups_by_rate.remove(&rate.id).unwrap_or_default(),
                rate,
            })
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<RateDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        let rate = fetch(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::not_found("Rate"))?;
        load_detail(&mut conn, rate).await
    }

    pub async fn delete(&self, id: i64) -> Result<RateDetail, DbError> {
        let mut tx = begin_write(self.pool).await?;

        let rate = fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Rate"))?;
        let detail = load_detail(&mut tx, rate).await?;

        sqlx::query("DELETE FROM rates WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(rate_id = id, "rate deleted");
        Ok(detail)
    }
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<Rate>, DbError> {
    let rate = sqlx::query_as("SELECT id, stars FROM rates WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(rate)
}

async fn load_detail(conn: &mut SqliteConnection, rate: Rate) -> Result<RateDetail, DbError> {
    let users: Vec<User> = sqlx::query_as(
        r#"
        SELECT u.id, u.name, u.netid, u.group_id
        FROM rate_users ru
        JOIN users u ON u.id = ru.user_id
        WHERE ru.rate_id = ?
        ORDER BY u.id
        "#,
    )
    .bind(rate.id)
    .fetch_all(&mut *conn)
    .await?;

    let groups: Vec<Group> = sqlx::query_as(
        r#"
        SELECT g.id, g.name
        FROM rate_groups rg
        JOIN groups g ON g.id = rg.group_id
        WHERE rg.rate_id = ?
        ORDER BY g.id
        "#,
    )
    .bind(rate.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(RateDetail {
        rate,
        users,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::db::repos::{GroupRepo, UserRepo};
    use crate::models::{NewGroup, NewUser};

    async fn seeded() -> SqlitePool {
        let pool = open_in_memory().await.unwrap();
        let users = UserRepo::new(&pool);
        for netid in ["a1", "b2"] {
            users
                .create(NewUser {
                    name: netid.to_uppercase(),
                    netid: netid.into(),
                })
                .await
                .unwrap();
        }
        GroupRepo::new(&pool)
            .create(NewGroup { name: "g".into() })
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn create_links_users_and_groups() {
        let pool = seeded().await;
        let detail = RateRepo::new(&pool)
            .create(NewRate {
                stars: 5,
                user_ids: vec![2, 1],
                group_ids: vec![1],
            })
            .await
            .unwrap();

        assert_eq!(detail.rate.stars, 5);
        let ids: Vec<i64> = detail.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(detail.groups.len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_aborts_whole_create() {
        let pool = seeded().await;
        let repo = RateRepo::new(&pool);
        let err = repo
            .create(NewRate {
                stars: 3,
                user_ids: vec![1, 99],
                group_ids: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "User" }));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_user_drops_link() {
        let pool = seeded().await;
        let repo = RateRepo::new(&pool);
        repo.create(NewRate {
            stars: 4,
            user_ids: vec![1, 2],
            group_ids: vec![1],
        })
        .await
        .unwrap();

        UserRepo::new(&pool).delete(1).await.unwrap();
        GroupRepo::new(&pool).delete(1).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].users.len(), 1);
        assert_eq!(listed[0].users[0].id, 2);
        assert!(listed[0].groups.is_empty());
    }
}
