use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::store_error::StoreError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;
use crate::infrastructure::db::{PgPool, is_unique_violation};

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> anyhow::Result<User> {
    Ok(User {
        id: r.try_get("id")?,
        username: r.try_get("username")?,
        password: r.try_get("password")?,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, username: &str, password: &str) -> anyhow::Result<User> {
        let res = sqlx::query(
            r#"INSERT INTO users (username, password) VALUES ($1, $2)
               RETURNING id, username, password"#,
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await;
        let row = match res {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                return Err(
                    StoreError::Conflict(format!("username {username} already taken")).into(),
                );
            }
            Err(e) => return Err(e.into()),
        };
        map_user(&row)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(r#"SELECT id, username, password FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(r#"SELECT id, username, password FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn ensure_user(&self, id: i64, username: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO users (id, username, password) VALUES ($1, $2, '')
               ON CONFLICT DO NOTHING"#,
        )
        .bind(id)
        .bind(username)
        .execute(&self.pool)
        .await?;
        // ON CONFLICT also swallows a username held by a different id
        if self.find_by_id(id).await?.is_none() {
            let owner = self.find_by_username(username).await?.map(|u| u.id);
            anyhow::bail!(
                "cannot seed user {id}: username {username} already belongs to user {}",
                owner.map_or_else(|| "unknown".to_string(), |o| o.to_string())
            );
        }
        // explicit ids bypass the sequence; move it past them
        sqlx::query(
            r#"SELECT setval(pg_get_serial_sequence('users', 'id'),
                             GREATEST((SELECT MAX(id) FROM users), 1))"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
