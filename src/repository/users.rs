//! Users repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::UserStore;
use crate::{
    error::{AppError, AppResult},
    models::{NewUserCredential, UserCredential},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    /// Get user by login (case-insensitive)
    async fn get_by_login(&self, login: &str) -> AppResult<Option<UserCredential>> {
        let user = sqlx::query_as::<_, UserCredential>(
            r#"
            SELECT id, login, password_hash, store_spot, created_at
            FROM users WHERE LOWER(login) = LOWER($1)
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn login_exists(&self, login: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(login) = LOWER($1))")
                .bind(login)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create(&self, user: &NewUserCredential) -> AppResult<UserCredential> {
        if self.login_exists(&user.login).await? {
            return Err(AppError::Conflict(format!("Login '{}' already exists", user.login)));
        }

        sqlx::query_as::<_, UserCredential>(
            r#"
            INSERT INTO users (id, login, password_hash, store_spot, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, login, password_hash, store_spot, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(user.store_spot)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent insert of the same login
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Login '{}' already exists", user.login))
            }
            other => AppError::Database(other),
        })
    }
}
