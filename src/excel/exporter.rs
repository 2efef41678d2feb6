//! Excel exporter implementation - report tables → .xlsx

use crate::error::{ReportError, ReportResult};
use crate::types::{ErrorRow, Period, ResultRow};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Object name column, shared by both tables
pub const OBJECT_HEADER: &str = "Название обьекта";
pub const AMOUNT_HEADER: &str = "Сумма";
pub const REASON_HEADER: &str = "Причина";

/// Which of the two report tables a workbook holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Results,
    Errors,
}

impl ReportKind {
    pub fn headers(&self) -> [&'static str; 2] {
        match self {
            ReportKind::Results => [OBJECT_HEADER, AMOUNT_HEADER],
            ReportKind::Errors => [OBJECT_HEADER, REASON_HEADER],
        }
    }

    /// Download name, e.g. `excel_results_2024_03_20240405_101500_123456.xlsx`
    pub fn file_name(&self, period: Option<Period>, generated_at: NaiveDateTime) -> String {
        let prefix = match self {
            ReportKind::Results => "excel_results",
            ReportKind::Errors => "errors",
        };
        let period = match period {
            Some(p) => format!("{}_{:02}", p.year(), p.month()),
            None => "all_period".to_string(),
        };
        format!(
            "{}_{}_{}.xlsx",
            prefix,
            period,
            generated_at.format("%Y%m%d_%H%M%S_%6f")
        )
    }
}

/// Two-column table writer for the result and error reports
pub struct ExcelExporter {
    kind: ReportKind,
    rows: Vec<[String; 2]>,
}

impl ExcelExporter {
    pub fn results(rows: &[ResultRow]) -> Self {
        Self {
            kind: ReportKind::Results,
            rows: rows
                .iter()
                .map(|r| [r.object_name.clone(), r.formatted_amount.clone()])
                .collect(),
        }
    }

    pub fn errors(rows: &[ErrorRow]) -> Self {
        Self {
            kind: ReportKind::Errors,
            rows: rows
                .iter()
                .map(|r| [r.object_label.clone(), r.reason.clone()])
                .collect(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the table to .xlsx bytes
    pub fn to_bytes(&self) -> ReportResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| ReportError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    /// Write the table to an .xlsx file
    pub fn save(&self, output_path: &Path) -> ReportResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(output_path)
            .map_err(|e| ReportError::Export(format!("Failed to save Excel file: {}", e)))
    }

    fn build(&self) -> ReportResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        for (col, header) in self.kind.headers().iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| ReportError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (idx, row) in self.rows.iter().enumerate() {
            let excel_row = (idx + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                worksheet
                    .write_string(excel_row, col as u16, value)
                    .map_err(|e| ReportError::Export(format!("Failed to write cell: {}", e)))?;
            }
        }

        worksheet.set_column_width(0, 60).ok();
        worksheet.set_column_width(1, 30).ok();

        Ok(workbook)
    }
}
