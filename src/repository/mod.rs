//! Repository layer for database operations

pub mod books;
pub mod users;

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, NewBook, NewUserCredential, StoreSpot, UpsertOutcome, UserCredential},
};

/// Persistence for book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert unconditionally
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Update the active row sharing (store, title, author, publisher), or insert
    async fn upsert_by_natural_key(&self, book: &NewBook) -> AppResult<(Book, UpsertOutcome)>;

    /// Active record by id
    async fn get_by_id(&self, id: Uuid) -> AppResult<Book>;

    /// Case-insensitive substring match on the title, active records only
    async fn find_by_title(&self, fragment: &str, store_spot: Option<StoreSpot>) -> AppResult<Vec<Book>>;

    /// Active records of a location, most requested first
    async fn find_by_store(&self, store_spot: StoreSpot) -> AppResult<Vec<Book>>;

    /// Returns false when the record is absent or already deleted
    async fn soft_delete(&self, id: Uuid) -> AppResult<bool>;

    /// Hard delete the active records of a location; soft-deleted rows stay
    async fn delete_all_by_store(&self, store_spot: StoreSpot) -> AppResult<u64>;
}

/// Persistence for staff credentials
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_login(&self, login: &str) -> AppResult<Option<UserCredential>>;

    async fn login_exists(&self, login: &str) -> AppResult<bool>;

    async fn create(&self, user: &NewUserCredential) -> AppResult<UserCredential>;
}

/// Main repository struct holding the database pool and the stores built on it
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
