use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{ReportError, ReportResult};

//==============================================================================
// Input Documents
//==============================================================================

/// A spreadsheet export supplied by the caller (file name + raw bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a document from disk, keeping only the file name
    pub fn from_path(path: &Path) -> ReportResult<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// File name up to its first `.` ("Горизонт.1.xlsx" → "Горизонт")
    pub fn base_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

//==============================================================================
// Sheets and Cells
//==============================================================================

/// A single cell value as read from a workbook
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// Native spreadsheet date, kept as its day serial
    DateTime(f64),
    Error(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::DateTime(serial) => write!(f, "{}", serial),
            Cell::Error(e) => write!(f, "{}", e),
        }
    }
}

/// A worksheet after the banner rows were skipped: one header row plus data rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: Vec<String>) -> Self {
        Self {
            name: name.into(),
            header,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// True when no row below the header holds a value
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Cell::is_empty))
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

//==============================================================================
// Period Filter
//==============================================================================

/// A calendar year-month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> ReportResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing today's local date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Fill a missing year or month from the current period
    pub fn resolve(year: Option<i32>, month: Option<u32>) -> ReportResult<Self> {
        let now = Self::current();
        Self::new(year.unwrap_or(now.year), month.unwrap_or(now.month))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

//==============================================================================
// Report Tables
//==============================================================================

/// One line of the result table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub object_name: String,
    pub formatted_amount: String,
}

/// One line of the error table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRow {
    pub object_label: String,
    pub reason: String,
}

/// Both output tables of an aggregation run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    pub results: Vec<ResultRow>,
    pub errors: Vec<ErrorRow>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, object_name: impl Into<String>, formatted_amount: String) {
        self.results.push(ResultRow {
            object_name: object_name.into(),
            formatted_amount,
        });
    }

    pub fn add_error(&mut self, object_label: impl Into<String>, reason: impl fmt::Display) {
        self.errors.push(ErrorRow {
            object_label: object_label.into(),
            reason: reason.to_string(),
        });
    }
}
