use thiserror::Error;

use crate::core::columns::{AMOUNT_COLUMN, DATE_COLUMN};

pub type ReportResult<T> = Result<T, ReportError>;

/// Hard failures. These abort the call and reach the caller.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Why a sheet or a whole document was left out of the report.
///
/// These never abort a run; the aggregator turns each one into an error row
/// whose reason is the `Display` text below.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A required column is absent after normalization.
    #[error("Отсутствует столбец \"{0}\"")]
    MissingColumn(&'static str),

    /// No row of the sheet has a date the normalizer understands.
    #[error("Не удалось распознать даты в столбце \"{}\"", DATE_COLUMN)]
    UnrecognizedDates,

    /// The document could not be opened as a workbook.
    #[error("Ошибка при обработке: {0}")]
    Unreadable(String),
}

impl SkipReason {
    pub fn missing_amount() -> Self {
        SkipReason::MissingColumn(AMOUNT_COLUMN)
    }

    pub fn missing_date() -> Self {
        SkipReason::MissingColumn(DATE_COLUMN)
    }
}
