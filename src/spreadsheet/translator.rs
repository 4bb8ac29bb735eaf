//! Translation of spreadsheet rows into book records

use once_cell::sync::Lazy;
use regex::Regex;

use super::{coerce, Cell};
use crate::{
    error::{AppError, AppResult},
    models::{NewBook, StoreSpot},
};

/// Trailing "(...)" group holding the author
static AUTHOR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?s)(.*?)\s*\(([^()]*)\)\s*$").expect("valid author regex"));

const TITLE_HEADERS: &[&str] = &["도서명", "book_title", "title"];

/// Column positions located from the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: usize,
    pub subject_name: Option<usize>,
    pub publisher: Option<usize>,
    pub request_count: Option<usize>,
    pub received_count: Option<usize>,
    pub price: Option<usize>,
    pub fulfillment_rate: Option<usize>,
    pub major: Option<usize>,
    pub professor_name: Option<usize>,
    pub location: Option<usize>,
    pub order_date: Option<usize>,
}

fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

impl ColumnMap {
    /// Locate columns by their Korean or English header names.
    /// Only the title column is required.
    pub fn locate(header: &[String]) -> AppResult<Self> {
        let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
        let find = |names: &[&str]| normalized.iter().position(|h| names.contains(&h.as_str()));

        let title = find(TITLE_HEADERS).ok_or_else(|| {
            AppError::SchemaMismatch(format!(
                "Title column not found (expected one of: {})",
                TITLE_HEADERS.join(", ")
            ))
        })?;

        Ok(Self {
            title,
            subject_name: find(&["과목명", "subject_name"]),
            publisher: find(&["출판사", "publisher"]),
            request_count: find(&["신청", "request_count"]),
            received_count: find(&["입고", "received_count"]),
            price: find(&["가격", "price"]),
            fulfillment_rate: find(&["입고율", "fulfillment_rate"]),
            major: find(&["전공", "major"]),
            professor_name: find(&["교수명", "professor_name"]),
            location: find(&["위치", "location"]),
            order_date: find(&["주문일", "주문일자", "order_date"]),
        })
    }
}

/// Split "Title (Author)" into its parts.
///
/// A trailing parenthetical is always stripped; an empty one yields no author.
pub fn split_title_author(raw: &str) -> (String, Option<String>) {
    let raw = raw.trim();
    match AUTHOR_SUFFIX.captures(raw) {
        Some(caps) => {
            let title = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let author = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|a| !a.is_empty())
                .map(str::to_string);
            (title, author)
        }
        None => (raw.to_string(), None),
    }
}

fn cell(row: &[Cell], idx: Option<usize>) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    idx.and_then(|i| row.get(i)).unwrap_or(EMPTY)
}

/// Build a record from one data row; `None` when the row has no usable title
pub fn row_to_book(store_spot: StoreSpot, columns: &ColumnMap, row: &[Cell]) -> Option<NewBook> {
    let raw_title = coerce::to_text(cell(row, Some(columns.title)))?;
    let (title, author) = split_title_author(&raw_title);
    if title.is_empty() {
        return None;
    }

    Some(NewBook {
        store_spot,
        subject_name: coerce::to_text(cell(row, columns.subject_name)),
        book_title: title,
        author,
        publisher: coerce::to_text(cell(row, columns.publisher)),
        request_count: coerce::to_int(cell(row, columns.request_count)),
        received_count: coerce::to_int(cell(row, columns.received_count)),
        price: coerce::to_int(cell(row, columns.price)),
        fulfillment_rate: coerce::to_float(cell(row, columns.fulfillment_rate)),
        major: coerce::to_text(cell(row, columns.major)),
        professor_name: coerce::to_text(cell(row, columns.professor_name)),
        location: coerce::to_text(cell(row, columns.location)),
        order_date: coerce::to_date(cell(row, columns.order_date)),
    })
}
