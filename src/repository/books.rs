//! Books repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook, StoreSpot, UpsertOutcome},
};

const BOOK_COLUMNS: &str = "id, store_spot, subject_name, book_title, author, publisher, \
     request_count, received_count, price, fulfillment_rate, major, professor_name, \
     location, order_date, created_at, deleted_at";

/// Build an ILIKE pattern matching `fragment` anywhere, with wildcards escaped
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (id, store_spot, subject_name, book_title, author, publisher,
                               request_count, received_count, price, fulfillment_rate,
                               major, professor_name, location, order_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        let row = sqlx::query_as::<_, Book>(&query)
            .bind(Uuid::new_v4())
            .bind(book.store_spot)
            .bind(&book.subject_name)
            .bind(&book.book_title)
            .bind(&book.author)
            .bind(&book.publisher)
            .bind(book.request_count)
            .bind(book.received_count)
            .bind(book.price)
            .bind(book.fulfillment_rate)
            .bind(&book.major)
            .bind(&book.professor_name)
            .bind(&book.location)
            .bind(book.order_date)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn upsert_by_natural_key(&self, book: &NewBook) -> AppResult<(Book, UpsertOutcome)> {
        let query = format!(
            r#"
            UPDATE books
            SET subject_name = $5, request_count = $6, received_count = $7, price = $8,
                fulfillment_rate = $9, major = $10, professor_name = $11, location = $12,
                order_date = $13
            WHERE store_spot = $1
              AND book_title = $2
              AND author IS NOT DISTINCT FROM $3
              AND publisher IS NOT DISTINCT FROM $4
              AND deleted_at IS NULL
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        let updated = sqlx::query_as::<_, Book>(&query)
            .bind(book.store_spot)
            .bind(&book.book_title)
            .bind(&book.author)
            .bind(&book.publisher)
            .bind(&book.subject_name)
            .bind(book.request_count)
            .bind(book.received_count)
            .bind(book.price)
            .bind(book.fulfillment_rate)
            .bind(&book.major)
            .bind(&book.professor_name)
            .bind(&book.location)
            .bind(book.order_date)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(row) => Ok((row, UpsertOutcome::Updated)),
            None => Ok((self.insert(book).await?, UpsertOutcome::Inserted)),
        }
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        let query = format!(
            "SELECT {} FROM books WHERE id = $1 AND deleted_at IS NULL",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id '{}' not found", id)))
    }

    async fn find_by_title(&self, fragment: &str, store_spot: Option<StoreSpot>) -> AppResult<Vec<Book>> {
        let query = format!(
            r#"
            SELECT {} FROM books
            WHERE deleted_at IS NULL
              AND book_title ILIKE $1 ESCAPE '\'
              AND ($2::text IS NULL OR store_spot = $2)
            ORDER BY book_title
            "#,
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(contains_pattern(fragment))
            .bind(store_spot)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_store(&self, store_spot: StoreSpot) -> AppResult<Vec<Book>> {
        let query = format!(
            r#"
            SELECT {} FROM books
            WHERE store_spot = $1 AND deleted_at IS NULL
            ORDER BY request_count DESC, book_title
            "#,
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(store_spot)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_by_store(&self, store_spot: StoreSpot) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE store_spot = $1 AND deleted_at IS NULL")
            .bind(store_spot)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
