//! Column names of bank escrow exports
//!
//! Banks label the same data differently. [`ColumnMap::resolve`] trims the
//! header, folds known aliases onto the canonical names and reports the
//! first required column that is missing.

use crate::error::SkipReason;

/// Inflow/outflow amount, RUB
pub const AMOUNT_COLUMN: &str = "Сумма поступления / списания, руб";
/// Inflow/outflow date
pub const DATE_COLUMN: &str = "Дата поступления / списания";
/// Construction permit number
pub const PERMIT_COLUMN: &str = "Разрешение на строительство";

/// Alias → canonical name
pub const COLUMN_ALIASES: [(&str, &str); 2] = [
    ("Сумма операции", AMOUNT_COLUMN),
    ("Дата операции", DATE_COLUMN),
];

/// Positions of the columns the aggregator reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub amount: usize,
    pub date: usize,
    pub permit: Option<usize>,
}

impl ColumnMap {
    /// Locate the canonical columns in a raw header row.
    ///
    /// A column already carrying the canonical name takes precedence over an
    /// alias. The amount column is checked before the date column.
    pub fn resolve(header: &[String]) -> Result<Self, SkipReason> {
        let names: Vec<&str> = header.iter().map(|name| name.trim()).collect();

        let amount = find(&names, AMOUNT_COLUMN).ok_or_else(SkipReason::missing_amount)?;
        let date = find(&names, DATE_COLUMN).ok_or_else(SkipReason::missing_date)?;
        let permit = find(&names, PERMIT_COLUMN);

        Ok(Self {
            amount,
            date,
            permit,
        })
    }
}

/// Position of `canonical`, or else of the first alias that renames to it
fn find(names: &[&str], canonical: &str) -> Option<usize> {
    names.iter().position(|name| *name == canonical).or_else(|| {
        COLUMN_ALIASES
            .iter()
            .filter(|(_, target)| *target == canonical)
            .find_map(|(alias, _)| names.iter().position(|name| name == alias))
    })
}
