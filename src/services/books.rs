//! Book record service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, NewBook, StoreSpot},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Insert one book unconditionally and return its id
    pub async fn add_book(&self, data: CreateBook) -> AppResult<Uuid> {
        data.validate()?;
        let book = self.books.insert(&NewBook::from(data)).await?;
        tracing::info!(id = %book.id, store_spot = %book.store_spot, "Book added");
        Ok(book.id)
    }

    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    /// Soft delete; already-deleted books count as missing
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        if !self.books.soft_delete(id).await? {
            return Err(AppError::NotFound(format!("Book with id '{}' not found", id)));
        }
        tracing::info!(%id, "Book deleted");
        Ok(())
    }

    /// Title search; an empty result is reported as not found
    pub async fn search_by_title(&self, title: &str, store_spot: Option<StoreSpot>) -> AppResult<Vec<Book>> {
        let books = self.books.find_by_title(title.trim(), store_spot).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(format!(
                "No book found with a title matching '{}'",
                title
            )));
        }
        Ok(books)
    }

    /// Active books of a location, most requested first
    pub async fn list_by_store(&self, store_spot: StoreSpot) -> AppResult<Vec<Book>> {
        self.books.find_by_store(store_spot).await
    }
}
