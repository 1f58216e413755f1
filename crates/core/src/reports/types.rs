//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::layout;

/// A display-ready transfer row selected for a report.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Date the transfer was initiated.
    pub transaction_date: NaiveDate,
    /// Source branch display name.
    pub from_branch: String,
    /// Destination branch display name.
    pub to_branch: String,
    /// Sender display name.
    pub from_staff: String,
    /// Receiver display name.
    pub to_staff: String,
    /// External tracking token, if any.
    pub confirmation_code: Option<String>,
    /// Transfer amount.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Lowercase status label.
    pub status: String,
}

/// Per-currency totals over a report selection.
///
/// Currencies appear in first-appearance order of the date-ascending
/// selection; a mixed-currency period gets one total per currency rather
/// than a single mislabeled sum.
#[derive(Debug, Clone, Default)]
pub struct ReportTotals {
    totals: Vec<(String, Decimal)>,
}

impl ReportTotals {
    /// Computes totals from a selection.
    #[must_use]
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        for entry in entries {
            match totals.iter_mut().find(|(c, _)| *c == entry.currency) {
                Some((_, sum)) => *sum += entry.amount,
                None => totals.push((entry.currency.clone(), entry.amount)),
            }
        }
        Self { totals }
    }

    /// The first currency's total; this pair is recorded in the registry.
    #[must_use]
    pub fn primary(&self) -> Option<(&str, Decimal)> {
        self.totals.first().map(|(c, sum)| (c.as_str(), *sum))
    }

    /// Returns true if more than one currency appears in the selection.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.totals.len() > 1
    }

    /// Iterates (currency, total) pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(c, sum)| (c.as_str(), *sum))
    }

    /// Formatted summary lines for the report header.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(currency, total)| {
                format!("Total Amount: {} {currency}", layout::format_amount(total))
            })
            .collect()
    }
}
