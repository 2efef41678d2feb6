//! Excel importer implementation - workbook bytes → sheets

use crate::error::{ReportError, ReportResult};
use crate::types::{Cell, Sheet};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

/// Read every worksheet of an in-memory workbook (.xlsx, .xlsm, .xls, .ods).
///
/// The first `banner_rows` rows of each sheet, counted from A1, are skipped;
/// the row after them is the header. Any sheet that cannot be read fails the
/// whole workbook.
pub fn read_workbook(bytes: &[u8], banner_rows: usize) -> ReportResult<Vec<Sheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ReportError::Read(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ReportError::Read(e.to_string()))?;
        sheets.push(range_to_sheet(&sheet_name, &range, banner_rows));
    }

    Ok(sheets)
}

/// Convert a worksheet range into a header + rows table
fn range_to_sheet(sheet_name: &str, range: &Range<Data>, banner_rows: usize) -> Sheet {
    let Some((end_row, end_col)) = range.end() else {
        return Sheet::new(sheet_name, Vec::new());
    };

    let header_row = banner_rows as u32;
    let width = end_col + 1;

    let header = (0..width)
        .map(|col| header_name(range.get_value((header_row, col)), col))
        .collect();
    let mut sheet = Sheet::new(sheet_name, header);

    // Positions are absolute, so a range starting below A1 still lines up
    for row in (header_row + 1)..=end_row {
        let cells = (0..width)
            .map(|col| range.get_value((row, col)).map_or(Cell::Empty, to_cell))
            .collect();
        sheet.add_row(cells);
    }

    sheet
}

/// Header text for a column; blank headers get a positional placeholder
fn header_name(cell: Option<&Data>, col: u32) -> String {
    match cell {
        Some(Data::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Data::Empty) | Some(Data::String(_)) | None => format!("Unnamed: {}", col),
        Some(other) => other.to_string(),
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
        Data::Empty => Cell::Empty,
    }
}
