//! Report period resolution.
//!
//! Turns a user-chosen report mode into an inclusive date interval, a
//! canonical period label, and a human-readable description. Pure: callers
//! inject `today` where a default is needed.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::error::ReportError;
use crate::budget::types::last_day_of_month;

/// A user-chosen report time scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "reportType", rename_all = "lowercase")]
pub enum ReportPeriod {
    /// One calendar month.
    Single {
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
    /// An inclusive month range.
    Range {
        /// First month's year.
        #[serde(rename = "startYear")]
        start_year: i32,
        /// First month, 1-12.
        #[serde(rename = "startMonth")]
        start_month: u32,
        /// Last month's year.
        #[serde(rename = "endYear")]
        end_year: i32,
        /// Last month, 1-12.
        #[serde(rename = "endMonth")]
        end_month: u32,
    },
}

/// A resolved report period: inclusive date window plus labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Canonical label: `YYYY-MM`, `YYYY`, or `YYYY-MM_to_YYYY-MM`.
    pub label: String,
    /// Human-readable description, e.g. "March 2025".
    pub description: String,
    /// The mode this period was resolved from.
    pub mode: &'static str,
}

impl ResolvedPeriod {
    /// End of the period as a timestamp, 23:59:59 on the last day.
    #[must_use]
    pub fn end_datetime(&self) -> Option<NaiveDateTime> {
        self.end_date.and_hms_opt(23, 59, 59)
    }
}

impl ReportPeriod {
    /// The scheduler default: the calendar month preceding `today`.
    #[must_use]
    pub fn previous_month(today: NaiveDate) -> Self {
        if today.month() == 1 {
            Self::Single {
                year: today.year() - 1,
                month: 12,
            }
        } else {
            Self::Single {
                year: today.year(),
                month: today.month() - 1,
            }
        }
    }

    /// Resolves the period into a concrete date window and labels.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` for month numbers outside 1-12 and
    /// `ReportError::InvalidDateRange` when a range's start is after its end.
    pub fn resolve(&self) -> Result<ResolvedPeriod, ReportError> {
        match *self {
            Self::Single { year, month } => {
                let (start, end) = month_window(year, month)?;
                Ok(ResolvedPeriod {
                    start_date: start,
                    end_date: end,
                    label: format!("{year}-{month:02}"),
                    description: start.format("%B %Y").to_string(),
                    mode: "single",
                })
            }
            Self::Yearly { year } => {
                let start = date(year, 1, 1)?;
                let end = date(year, 12, 31)?;
                Ok(ResolvedPeriod {
                    start_date: start,
                    end_date: end,
                    label: format!("{year}"),
                    description: format!("Year {year}"),
                    mode: "yearly",
                })
            }
            Self::Range {
                start_year,
                start_month,
                end_year,
                end_month,
            } => {
                let (start, _) = month_window(start_year, start_month)?;
                let (range_end_start, end) = month_window(end_year, end_month)?;

                if start > end {
                    return Err(ReportError::InvalidDateRange { start, end });
                }

                Ok(ResolvedPeriod {
                    start_date: start,
                    end_date: end,
                    label: format!(
                        "{start_year}-{start_month:02}_to_{end_year}-{end_month:02}"
                    ),
                    description: format!(
                        "{} to {}",
                        start.format("%b %Y"),
                        range_end_start.format("%b %Y")
                    ),
                    mode: "range",
                })
            }
        }
    }
}

/// First and last day of a month.
fn month_window(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ReportError> {
    let start = date(year, month, 1)?;
    let end = last_day_of_month(year, month).ok_or(ReportError::InvalidMonth(month))?;
    Ok((start, end))
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ReportError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ReportError::InvalidMonth(month))
}
