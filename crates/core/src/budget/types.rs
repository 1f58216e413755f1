//! Budget period types.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularity of a branch budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// One calendar month.
    Monthly,
    /// One calendar year.
    Yearly,
}

/// A concrete budget period: a specific month or a specific year.
///
/// A transfer dated inside the window contributes to the budget bucket for
/// this key (destination branch and currency matching).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    /// A single calendar month.
    Monthly {
        /// Calendar year.
        year: i32,
        /// Month number, 1-12.
        month: u32,
    },
    /// A full calendar year.
    Yearly {
        /// Calendar year.
        year: i32,
    },
}

impl PeriodKey {
    /// Returns the budget granularity for this key.
    #[must_use]
    pub const fn period(&self) -> BudgetPeriod {
        match self {
            Self::Monthly { .. } => BudgetPeriod::Monthly,
            Self::Yearly { .. } => BudgetPeriod::Yearly,
        }
    }

    /// The inclusive date window covered by this key.
    ///
    /// Returns `None` for out-of-range month numbers.
    #[must_use]
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::Monthly { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                let end = last_day_of_month(year, month)?;
                Some((start, end))
            }
            Self::Yearly { year } => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
                Some((start, end))
            }
        }
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.window()
            .is_some_and(|(start, end)| date >= start && date <= end)
    }

    /// The monthly and yearly buckets a transfer date falls into.
    ///
    /// A status change on a transfer must recompute both, since a branch may
    /// carry budgets at either granularity.
    #[must_use]
    pub fn buckets_for(date: NaiveDate) -> [Self; 2] {
        [
            Self::Monthly {
                year: date.year(),
                month: date.month(),
            },
            Self::Yearly { year: date.year() },
        ]
    }
}

/// Returns the last day of the given month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}
