//! Report artifact archive.
//!
//! Rendered PDFs are persisted as content-addressed objects keyed by period
//! and branch. Regenerating the same (branch, period) overwrites the prior
//! artifact; the registry row in the database is the source of truth for
//! whether a report exists.

pub mod config;
pub mod error;
pub mod service;

pub use config::{ArchiveConfig, ArchiveProvider};
pub use error::StorageError;
pub use service::ArchiveService;
