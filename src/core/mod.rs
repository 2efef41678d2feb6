//! Aggregation engine: column and date normalization, amounts, permits

pub mod aggregator;
pub mod amount;
pub mod columns;
pub mod dates;
pub mod permits;

pub use aggregator::{analyze, Aggregator};
pub use permits::PermitTable;
