//! Transfer domain errors.

use thiserror::Error;

use super::types::TransferStatus;

/// Errors for transfer validation and state transitions.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Amount must be strictly positive.
    #[error("transfer amount must be greater than zero")]
    NonPositiveAmount,

    /// Purpose is required at creation.
    #[error("transfer purpose must not be empty")]
    PurposeRequired,

    /// Currency code is required.
    #[error("transfer currency must not be empty")]
    CurrencyRequired,

    /// Source and destination branch must differ.
    #[error("source and destination branch must differ")]
    SameBranch,

    /// Requested status transition is not allowed.
    #[error("invalid status transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// Current status.
        from: TransferStatus,
        /// Requested status.
        to: TransferStatus,
    },
}
