//! Excel import/export for escrow reports
//!
//! - Import: bank export workbooks (bytes) → sheets of cells
//! - Export: result/error tables → .xlsx

pub mod exporter;
pub mod importer;

pub use exporter::{ExcelExporter, ReportKind};
pub use importer::read_workbook;
