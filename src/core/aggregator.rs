//! Escrow inflow aggregation
//!
//! Walks every sheet of every document in order, keeps positive in-period
//! transactions and sums them per escrow object. Problems with a single
//! sheet or document become rows of the error table; they never stop the run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

use super::amount::{self, format_rub};
use super::columns::ColumnMap;
use super::dates;
use super::permits::PermitTable;
use crate::error::{ReportError, ReportResult, SkipReason};
use crate::excel::importer;
use crate::types::{Document, Period, Report, Sheet};

/// Sheets whose name contains this word hold notes, not transactions
pub const SERVICE_SHEET_MARKER: &str = "лист";

/// Rows above the header in bank exports
pub const DEFAULT_BANNER_ROWS: usize = 6;

const DEFAULT_LABEL_PREFIX: &str = "Поступления на счет Эскроу";

/// A transaction that survived coercion and filtering
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub object_name: String,
}

/// Sum and count of one object's transactions within a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTotal {
    pub object_name: String,
    pub total: Decimal,
    pub count: usize,
}

/// Label used for a document's transactions that carry no known permit
pub fn default_label(document: &Document) -> String {
    format!("{} {}", DEFAULT_LABEL_PREFIX, document.base_name())
}

pub fn is_service_sheet(name: &str) -> bool {
    name.to_lowercase().contains(SERVICE_SHEET_MARKER)
}

/// Group transactions by object name, ordered by name
pub fn group_by_object(transactions: Vec<Transaction>) -> Vec<ObjectTotal> {
    let mut groups: BTreeMap<String, ObjectTotal> = BTreeMap::new();
    for tx in transactions {
        let entry = groups
            .entry(tx.object_name.clone())
            .or_insert_with(|| ObjectTotal {
                object_name: tx.object_name,
                total: Decimal::ZERO,
                count: 0,
            });
        entry.total += tx.amount;
        entry.count += 1;
    }
    groups.into_values().collect()
}

/// Turns bank exports into the result and error tables
#[derive(Debug, Clone)]
pub struct Aggregator {
    permits: PermitTable,
    banner_rows: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(PermitTable::default())
    }
}

impl Aggregator {
    pub fn new(permits: PermitTable) -> Self {
        Self {
            permits,
            banner_rows: DEFAULT_BANNER_ROWS,
        }
    }

    /// Override how many rows precede the header row
    pub fn with_banner_rows(mut self, banner_rows: usize) -> Self {
        self.banner_rows = banner_rows;
        self
    }

    /// Aggregate documents in order, optionally restricted to one month
    pub fn aggregate(&self, documents: &[Document], period: Option<Period>) -> Report {
        let mut report = Report::new();

        for document in documents {
            let label = default_label(document);
            match importer::read_workbook(&document.bytes, self.banner_rows) {
                Ok(sheets) => self.aggregate_document(&label, &sheets, period, &mut report),
                Err(err) => {
                    warn!(document = %document.name, error = %err, "Document skipped");
                    let message = match err {
                        ReportError::Read(msg) => msg,
                        other => other.to_string(),
                    };
                    report.add_error(label, SkipReason::Unreadable(message));
                }
            }
        }

        report
    }

    /// Aggregate the already-read sheets of one document into `report`.
    ///
    /// Adds a zero row under `label` when no sheet yields a qualifying
    /// transaction.
    pub fn aggregate_document(
        &self,
        label: &str,
        sheets: &[Sheet],
        period: Option<Period>,
        report: &mut Report,
    ) {
        let mut has_data = false;

        for sheet in sheets {
            if is_service_sheet(&sheet.name) {
                debug!(sheet = %sheet.name, "Service sheet skipped");
                continue;
            }
            if sheet.is_empty() {
                debug!(sheet = %sheet.name, "Empty sheet skipped");
                continue;
            }

            match self.sheet_transactions(label, sheet, period) {
                Ok(transactions) => {
                    for group in group_by_object(transactions) {
                        debug!(
                            sheet = %sheet.name,
                            object = %group.object_name,
                            count = group.count,
                            total = %group.total,
                            "Object total"
                        );
                        has_data = true;
                        report.add_result(group.object_name, format_rub(group.total));
                    }
                }
                Err(reason) => {
                    warn!(sheet = %sheet.name, %reason, "Sheet skipped");
                    report.add_error(format!("{} (лист {})", label, sheet.name), reason);
                }
            }
        }

        if !has_data {
            report.add_result(label, format_rub(Decimal::ZERO));
        }
    }

    /// Positive, in-period transactions of one sheet
    pub fn sheet_transactions(
        &self,
        label: &str,
        sheet: &Sheet,
        period: Option<Period>,
    ) -> Result<Vec<Transaction>, SkipReason> {
        let columns = ColumnMap::resolve(&sheet.header)?;

        let amounts: Vec<(usize, Decimal)> = (0..sheet.rows.len())
            .filter_map(|row| match amount::coerce(sheet.cell(row, columns.amount)) {
                Some(value) => Some((row, value)),
                None => {
                    trace!(sheet = %sheet.name, row, "Row without numeric amount dropped");
                    None
                }
            })
            .collect();
        if amounts.is_empty() {
            return Ok(Vec::new());
        }

        let dated: Vec<(usize, Decimal, NaiveDate)> = amounts
            .into_iter()
            .filter_map(|(row, value)| {
                dates::normalize(sheet.cell(row, columns.date)).map(|date| (row, value, date))
            })
            .collect();
        if dated.is_empty() {
            return Err(SkipReason::UnrecognizedDates);
        }

        let transactions = dated
            .into_iter()
            .map(|(row, amount, date)| Transaction {
                amount,
                date,
                object_name: self.object_name(label, sheet, columns.permit, row),
            })
            .filter(|tx| period.map_or(true, |p| p.contains(tx.date)))
            .filter(|tx| tx.amount > Decimal::ZERO)
            .collect();

        Ok(transactions)
    }

    fn object_name(
        &self,
        label: &str,
        sheet: &Sheet,
        permit_col: Option<usize>,
        row: usize,
    ) -> String {
        permit_col
            .and_then(|col| self.permits.lookup(&sheet.cell(row, col).to_string()))
            .unwrap_or(label)
            .to_string()
    }
}

/// Caller-facing entry point.
///
/// With `filter_by_period` set, a missing year or month defaults to the
/// current one; without it both are ignored.
pub fn analyze(
    documents: &[Document],
    year: Option<i32>,
    month: Option<u32>,
    filter_by_period: bool,
    permits: PermitTable,
) -> ReportResult<Report> {
    let period = if filter_by_period {
        Some(Period::resolve(year, month)?)
    } else {
        None
    };
    Ok(Aggregator::new(permits).aggregate(documents, period))
}
