//! Escrow Report - escrow account inflows from bank spreadsheet exports
//!
//! This library reads bank exports of escrow-account transactions, normalizes
//! their column names and date encodings, and sums positive inflows per
//! construction object, optionally within a single calendar month.
//!
//! # Features
//!
//! - .xlsx/.xls/.ods input read from memory
//! - Alias column names and eight text date layouts plus day serials
//! - Construction permit → object name mapping
//! - Result and error tables exportable to .xlsx
//!
//! # Example
//!
//! ```no_run
//! use escrow_report::core::{Aggregator, PermitTable};
//! use escrow_report::types::{Document, Period};
//! use std::path::Path;
//!
//! let document = Document::from_path(Path::new("escrow_march.xlsx"))?;
//! let aggregator = Aggregator::new(PermitTable::default());
//! let report = aggregator.aggregate(&[document], Some(Period::new(2024, 3)?));
//!
//! for row in &report.results {
//!     println!("{}: {}", row.object_name, row.formatted_amount);
//! }
//! # Ok::<(), escrow_report::error::ReportError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{ReportError, ReportResult, SkipReason};
pub use types::{Document, ErrorRow, Period, Report, ResultRow};
