//! String-backed active enums shared by the entities.
//!
//! String backing keeps the schema portable between Postgres and the SQLite
//! test harness.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transfer lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Recorded but not yet confirmed received.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed; counts toward the destination budget.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Cancelled; never counts toward any budget.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<maktab_core::transfer::TransferStatus> for TransferStatus {
    fn from(status: maktab_core::transfer::TransferStatus) -> Self {
        match status {
            maktab_core::transfer::TransferStatus::Pending => Self::Pending,
            maktab_core::transfer::TransferStatus::Confirmed => Self::Confirmed,
            maktab_core::transfer::TransferStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TransferStatus> for maktab_core::transfer::TransferStatus {
    fn from(status: TransferStatus) -> Self {
        match status {
            TransferStatus::Pending => Self::Pending,
            TransferStatus::Confirmed => Self::Confirmed,
            TransferStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Budget granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// One calendar month.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// One calendar year.
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

impl From<maktab_core::budget::BudgetPeriod> for BudgetPeriod {
    fn from(period: maktab_core::budget::BudgetPeriod) -> Self {
        match period {
            maktab_core::budget::BudgetPeriod::Monthly => Self::Monthly,
            maktab_core::budget::BudgetPeriod::Yearly => Self::Yearly,
        }
    }
}

impl From<BudgetPeriod> for maktab_core::budget::BudgetPeriod {
    fn from(period: BudgetPeriod) -> Self {
        match period {
            BudgetPeriod::Monthly => Self::Monthly,
            BudgetPeriod::Yearly => Self::Yearly,
        }
    }
}

/// Outcome of a report generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Artifact uploaded and registered.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Generation failed.
    #[sea_orm(string_value = "failed")]
    Failed,
}
