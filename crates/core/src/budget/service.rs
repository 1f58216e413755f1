//! Budget spend accrual.
//!
//! Accrual is always a full recomputation over the candidate transfers, never
//! an incremental add/subtract. Recomputation is idempotent and
//! self-correcting under edits, deletes, and out-of-order status toggles;
//! incremental updates would drift after a missed event.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::PeriodKey;

/// A transfer considered for budget accrual.
///
/// Callers pre-filter to the budget's destination branch, currency, and
/// confirmed status; the period window is applied here so the date logic has
/// a single home.
#[derive(Debug, Clone)]
pub struct AccrualRecord {
    /// Date the transfer was initiated.
    pub transaction_date: NaiveDate,
    /// Transfer amount.
    pub amount: Decimal,
}

/// Computes the spent amount for a budget bucket.
///
/// Sums `amount` over the records whose date falls inside the period window.
#[must_use]
pub fn accrue(key: &PeriodKey, records: &[AccrualRecord]) -> Decimal {
    records
        .iter()
        .filter(|r| key.contains(r.transaction_date))
        .map(|r| r.amount)
        .sum()
}
