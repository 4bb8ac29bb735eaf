//! Coercion of loosely-typed spreadsheet cells.
//!
//! Cells typed by hand ("12권", "15,000원", "미정") never fail a row: numbers
//! fall back to zero and dates to absent.

use chrono::NaiveDate;

use super::Cell;

/// Keep only ASCII digits and parse; nothing left (or overflow) yields 0
pub fn digits_to_int(raw: &str) -> i32 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Keep ASCII digits and the first decimal point; unparseable yields 0.0
pub fn digits_to_float(raw: &str) -> f64 {
    let mut seen_point = false;
    let kept: String = raw
        .chars()
        .filter(|&c| {
            if c == '.' && !seen_point {
                seen_point = true;
                return true;
            }
            c.is_ascii_digit()
        })
        .collect();
    kept.parse().unwrap_or(0.0)
}

pub fn to_int(cell: &Cell) -> i32 {
    match cell {
        Cell::Int(i) => i32::try_from(*i).unwrap_or(0),
        Cell::Float(f) if f.is_finite() => f.trunc() as i32,
        Cell::Text(s) => digits_to_int(s),
        _ => 0,
    }
}

pub fn to_float(cell: &Cell) -> f64 {
    match cell {
        Cell::Int(i) => *i as f64,
        Cell::Float(f) if f.is_finite() => *f,
        Cell::Text(s) => digits_to_float(s),
        _ => 0.0,
    }
}

/// `YYYY-MM-DD`, optionally followed by a time part
pub fn to_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Text(s) => {
            let day = s.trim().split(|c: char| c == 'T' || c.is_whitespace()).next()?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

/// Trimmed text, absent when blank
pub fn to_text(cell: &Cell) -> Option<String> {
    let text = match cell {
        Cell::Empty => return None,
        Cell::Text(s) => s.trim().to_string(),
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Cell::Float(f) => f.to_string(),
        Cell::Bool(b) => b.to_string(),
        Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
