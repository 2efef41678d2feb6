//! Amount coercion and ruble formatting

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::Cell;

/// Currency marker appended to every formatted amount
pub const CURRENCY_SUFFIX: &str = " руб.";

/// Coerce a cell to a numeric amount.
///
/// Numbers pass through; text must be a plain decimal or scientific literal
/// (`"1500.25"`, `"1.5e3"`). Anything else is not a transaction amount.
pub fn coerce(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) => Decimal::from_f64(*n),
        Cell::Text(text) => {
            let text = text.trim();
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
        }
        Cell::Empty | Cell::Bool(_) | Cell::DateTime(_) | Cell::Error(_) => None,
    }
}

/// Render as `1 234 567,50 руб.`: two decimals, space-grouped thousands,
/// decimal comma. Works on the decimal digits directly so no cents are lost.
pub fn format_rub(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (integer, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!(
        "{}{},{}{}",
        sign,
        group_thousands(integer),
        cents,
        CURRENCY_SUFFIX
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}
