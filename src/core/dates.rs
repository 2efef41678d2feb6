//! Date normalization for bank exports
//!
//! Exports mix native spreadsheet dates, bare day serials and a handful of
//! text layouts. Everything funnels into [`normalize`], which never fails:
//! an unreadable value is simply `None`.

use chrono::{Duration, NaiveDate};

use crate::types::Cell;

/// Text layouts tried in order; the first full match wins
pub const DATE_FORMATS: [&str; 8] = [
    "%d.%m.%Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y.%m.%d", "%d %b %Y", "%d %B %Y", "%Y%m%d",
];

/// Day zero of the spreadsheet serial date system
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Earliest and latest dates a serial may resolve to.
fn serial_bounds() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(1677, 9, 21).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(2262, 4, 11).unwrap_or(NaiveDate::MAX),
    )
}

/// Normalize any cell to a calendar date
pub fn normalize(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        // Out-of-range numbers may still be YYYYMMDD integers
        Cell::Number(n) => from_serial(*n).or_else(|| normalize_text(&n.to_string())),
        Cell::DateTime(n) => from_serial(*n),
        Cell::Text(text) => normalize_text(text),
        Cell::Empty | Cell::Bool(_) | Cell::Error(_) => None,
    }
}

/// Interpret a day count relative to 1899-12-30.
///
/// Fractions carry a time of day and are floored to the date. Values that
/// land outside the supported range yield `None`.
pub fn from_serial(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    let (min, max) = serial_bounds();
    let whole = days.floor();
    if whole < (min - serial_epoch()).num_days() as f64
        || whole > (max - serial_epoch()).num_days() as f64
    {
        return None;
    }
    serial_epoch().checked_add_signed(Duration::days(whole as i64))
}

/// Parse a text date: a numeric serial first, then each of [`DATE_FORMATS`]
pub fn normalize_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(days) = text.parse::<f64>() {
        if let Some(date) = from_serial(days) {
            return Some(date);
        }
    }

    // ISO timestamps from .ods/.xlsb readers ("2024-03-01T00:00:00")
    let text = match text.split_once('T') {
        Some((date, _)) if date.len() == 10 => date,
        _ => text,
    };

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
