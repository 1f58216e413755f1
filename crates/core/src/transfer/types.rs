//! Transfer domain types.

use chrono::NaiveDate;
use maktab_shared::types::{BranchId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a money transfer.
///
/// The operator-facing flow toggles between `Pending` and `Confirmed`.
/// `Cancelled` is modeled for completeness but no route produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Transfer recorded but not yet confirmed received.
    Pending,
    /// Transfer confirmed; counts toward the destination budget.
    Confirmed,
    /// Transfer cancelled; never counts toward any budget.
    Cancelled,
}

impl TransferStatus {
    /// Returns true if a transfer in this status contributes to budget spend.
    #[must_use]
    pub fn counts_toward_budget(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Lowercase label used in persistence and report rendering.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for recording a new transfer.
#[derive(Debug, Clone)]
pub struct NewTransfer {
    /// Branch the money leaves from.
    pub from_branch_id: BranchId,
    /// Branch the money is destined for.
    pub to_branch_id: BranchId,
    /// Staff member sending the transfer.
    pub from_staff_id: StaffId,
    /// Staff member receiving the transfer.
    pub to_staff_id: StaffId,
    /// Transfer amount (must be > 0).
    pub amount: Decimal,
    /// Currency code (e.g. "AFN", "USD").
    pub currency: String,
    /// Transfer method label (e.g. "MoneyGram").
    pub transfer_method: String,
    /// Date the transfer was initiated.
    pub transaction_date: NaiveDate,
    /// Date the transfer was received, if known.
    pub received_date: Option<NaiveDate>,
    /// Initial status chosen by the caller (defaults to pending).
    pub status: TransferStatus,
    /// External tracking token (e.g. MTCN).
    pub confirmation_code: Option<String>,
    /// What the money is for. Required.
    pub purpose: String,
    /// Free-form notes.
    pub notes: Option<String>,
}
