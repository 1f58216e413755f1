//! Report generation: period resolution, layout, and PDF rendering.
//!
//! The pipeline is split so every decision that affects the artifact is a
//! pure function: `period` resolves the date window and canonical label,
//! `layout` plans pages of positioned elements, and `pdf` only walks the plan
//! with a PDF writer.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod period;
pub mod types;

pub use error::ReportError;
pub use period::{ReportPeriod, ResolvedPeriod};
pub use types::{ReportEntry, ReportTotals};
