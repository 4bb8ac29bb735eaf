//! In-memory stores used by service tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{BookStore, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook, NewUserCredential, StoreSpot, UpsertOutcome, UserCredential},
};

#[derive(Default)]
pub struct MemoryBookStore {
    pub rows: Mutex<Vec<Book>>,
}

impl MemoryBookStore {
    /// Every stored row, soft-deleted ones included
    pub async fn all_rows(&self) -> Vec<Book> {
        self.rows.lock().await.clone()
    }
}

fn materialize(book: &NewBook) -> Book {
    Book {
        id: Uuid::new_v4(),
        store_spot: book.store_spot,
        subject_name: book.subject_name.clone(),
        book_title: book.book_title.clone(),
        author: book.author.clone(),
        publisher: book.publisher.clone(),
        request_count: book.request_count,
        received_count: book.received_count,
        price: book.price,
        fulfillment_rate: book.fulfillment_rate,
        major: book.major.clone(),
        professor_name: book.professor_name.clone(),
        location: book.location.clone(),
        order_date: book.order_date,
        created_at: Utc::now(),
        deleted_at: None,
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let row = materialize(book);
        self.rows.lock().await.push(row.clone());
        Ok(row)
    }

    async fn upsert_by_natural_key(&self, book: &NewBook) -> AppResult<(Book, UpsertOutcome)> {
        let mut rows = self.rows.lock().await;
        let existing = rows.iter_mut().find(|r| {
            r.deleted_at.is_none()
                && r.store_spot == book.store_spot
                && r.book_title == book.book_title
                && r.author == book.author
                && r.publisher == book.publisher
        });
        if let Some(row) = existing {
            let id = row.id;
            let created_at = row.created_at;
            *row = Book { id, created_at, ..materialize(book) };
            return Ok((row.clone(), UpsertOutcome::Updated));
        }
        let row = materialize(book);
        rows.push(row.clone());
        Ok((row, UpsertOutcome::Inserted))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.rows
            .lock()
            .await
            .iter()
            .find(|r| r.id == id && r.deleted_at.is_none())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id '{}' not found", id)))
    }

    async fn find_by_title(&self, fragment: &str, store_spot: Option<StoreSpot>) -> AppResult<Vec<Book>> {
        let needle = fragment.to_lowercase();
        let mut found: Vec<Book> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|r| r.deleted_at.is_none())
            .filter(|r| store_spot.map_or(true, |s| r.store_spot == s))
            .filter(|r| r.book_title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.book_title.cmp(&b.book_title));
        Ok(found)
    }

    async fn find_by_store(&self, store_spot: StoreSpot) -> AppResult<Vec<Book>> {
        let mut found: Vec<Book> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|r| r.deleted_at.is_none() && r.store_spot == store_spot)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.request_count.cmp(&a.request_count));
        Ok(found)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|r| r.id == id && r.deleted_at.is_none()) {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all_by_store(&self, store_spot: StoreSpot) -> AppResult<u64> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|r| r.deleted_at.is_some() || r.store_spot != store_spot);
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    pub users: Mutex<Vec<UserCredential>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_login(&self, login: &str) -> AppResult<Option<UserCredential>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.login.eq_ignore_ascii_case(login))
            .cloned())
    }

    async fn login_exists(&self, login: &str) -> AppResult<bool> {
        Ok(self.get_by_login(login).await?.is_some())
    }

    async fn create(&self, user: &NewUserCredential) -> AppResult<UserCredential> {
        if self.login_exists(&user.login).await? {
            return Err(AppError::Conflict(format!("Login '{}' already exists", user.login)));
        }
        let row = UserCredential {
            id: Uuid::new_v4(),
            login: user.login.clone(),
            password_hash: user.password_hash.clone(),
            store_spot: user.store_spot,
            created_at: Utc::now(),
        };
        self.users.lock().await.push(row.clone());
        Ok(row)
    }
}
