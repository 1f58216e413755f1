//! Branch budget periods and spend accrual.
//!
//! `spent_amount` on a budget row is never edited directly; it is derived by
//! full recomputation over confirmed transfers (see `service::accrue`).

pub mod service;
pub mod types;

pub use service::{AccrualRecord, accrue};
pub use types::{BudgetPeriod, PeriodKey};
