//! Spreadsheet import result

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Counters produced by a spreadsheet import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    /// Data rows carrying a title
    pub total_books_in_file: usize,
    /// Rows that produced a new record
    pub added_books_count: usize,
    /// Records removed for the store location before importing
    pub deleted_books_count: u64,
}
