//! Spreadsheet import service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{ImportSummary, StoreSpot, UpsertOutcome},
    repository::BookStore,
    spreadsheet::{self, translator::row_to_book, ColumnMap, Sheet},
};

#[derive(Clone)]
pub struct ImportService {
    books: Arc<dyn BookStore>,
}

impl ImportService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Replace every record of `store_spot` with the rows of an uploaded workbook.
    ///
    /// The old records are removed before the new ones are written and are not
    /// restored if a later insert fails.
    pub async fn import_workbook(
        &self,
        store_spot: StoreSpot,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> AppResult<ImportSummary> {
        let declared = content_type.unwrap_or_default();
        if !spreadsheet::is_spreadsheet_content_type(declared) {
            return Err(AppError::UnsupportedMediaType(format!(
                "Expected an Excel spreadsheet, got '{}'",
                declared
            )));
        }

        let sheet = tokio::task::spawn_blocking(move || spreadsheet::read_first_sheet(&bytes))
            .await
            .map_err(|e| AppError::Internal(format!("Spreadsheet parser task failed: {}", e)))??;

        self.import_sheet(store_spot, &sheet).await
    }

    /// Replace every record of `store_spot` with the rows of a parsed sheet
    pub async fn import_sheet(&self, store_spot: StoreSpot, sheet: &Sheet) -> AppResult<ImportSummary> {
        let columns = ColumnMap::locate(&sheet.header)?;

        let deleted = self.books.delete_all_by_store(store_spot).await?;
        tracing::info!(%store_spot, deleted, "Cleared store location before import");

        let mut summary = ImportSummary {
            total_books_in_file: sheet.rows.len(),
            added_books_count: 0,
            deleted_books_count: deleted,
        };

        for row in &sheet.rows {
            let Some(book) = row_to_book(store_spot, &columns, row) else {
                summary.total_books_in_file -= 1;
                continue;
            };

            let (stored, outcome) = self.books.upsert_by_natural_key(&book).await?;
            match outcome {
                UpsertOutcome::Inserted => summary.added_books_count += 1,
                UpsertOutcome::Updated => {
                    tracing::debug!(id = %stored.id, title = %stored.book_title, "Merged duplicate row")
                }
            }
        }

        tracing::info!(
            %store_spot,
            total = summary.total_books_in_file,
            added = summary.added_books_count,
            deleted = summary.deleted_books_count,
            "Spreadsheet import finished"
        );

        Ok(summary)
    }
}
