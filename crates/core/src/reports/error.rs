//! Report generation errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors for report period resolution and rendering.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Month number outside 1-12.
    #[error("invalid month: {0}")]
    InvalidMonth(u32),

    /// Range mode received a start after its end.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Resolved range start.
        start: NaiveDate,
        /// Resolved range end.
        end: NaiveDate,
    },

    /// PDF rendering failed.
    #[error("failed to render report: {0}")]
    Render(String),
}
