//! Workbook reader built on calamine

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};

use super::{Cell, Sheet};
use crate::error::{AppError, AppResult};

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            data.as_date().map(Cell::Date).unwrap_or(Cell::Empty)
        }
        _ => Cell::Empty,
    }
}

/// Read the first worksheet of an xlsx/xls payload.
///
/// The first non-empty row is the header; every row below it is data.
pub fn read_first_sheet(bytes: &[u8]) -> AppResult<Sheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::BadRequest(format!("Unreadable spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::BadRequest("Spreadsheet has no worksheet".to_string()))?
        .map_err(|e| AppError::BadRequest(format!("Unreadable worksheet: {}", e)))?;

    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let header = match rows.next() {
        Some(row) => row
            .iter()
            .map(|c| super::coerce::to_text(&to_cell(c)).unwrap_or_default())
            .collect(),
        None => return Ok(Sheet::default()),
    };

    Ok(Sheet {
        header,
        rows: rows.map(|row| row.iter().map(to_cell).collect()).collect(),
    })
}
