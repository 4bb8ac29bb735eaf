//! Spreadsheet reading and book-row translation

pub mod coerce;
pub mod parser;
pub mod translator;

use chrono::NaiveDate;

pub use parser::read_first_sheet;
pub use translator::{split_title_author, ColumnMap};

/// MIME types accepted for book uploads
pub const SPREADSHEET_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// Whether a declared content type names a spreadsheet (parameters ignored)
pub fn is_spreadsheet_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    SPREADSHEET_CONTENT_TYPES.contains(&essence.as_str())
}

/// A single cell, detached from the workbook library
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// First worksheet of an upload: the header row and the data rows below it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_detection() {
        assert!(is_spreadsheet_content_type(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        ));
        assert!(is_spreadsheet_content_type("application/vnd.ms-excel; charset=binary"));
        assert!(!is_spreadsheet_content_type("text/csv"));
        assert!(!is_spreadsheet_content_type(""));
    }
}
