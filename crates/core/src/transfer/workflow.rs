//! Status state machine for money transfers.
//!
//! The only operator-reachable transitions are the pending/confirmed toggle.
//! Re-applying the current status is a no-op so repeated clicks never
//! double-count budget spend.

use super::error::TransferError;
use super::types::TransferStatus;

/// Outcome of applying a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Requested status equals the current one; nothing to do.
    Unchanged,
    /// Status changed.
    Changed {
        /// Previous status.
        from: TransferStatus,
        /// New status.
        to: TransferStatus,
        /// Whether the change crosses the confirmed boundary, i.e. the
        /// transfer's budget effect flipped and a recompute is required.
        crosses_confirmed: bool,
    },
}

impl StatusChange {
    /// Returns true if the destination budget must be recomputed.
    #[must_use]
    pub const fn requires_recompute(&self) -> bool {
        matches!(
            self,
            Self::Changed {
                crosses_confirmed: true,
                ..
            }
        )
    }
}

/// Stateless service validating transfer status transitions.
pub struct TransferWorkflow;

impl TransferWorkflow {
    /// Applies a requested status to the current one.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::InvalidTransition` for any transition other
    /// than the pending/confirmed toggle.
    pub fn apply(
        current: TransferStatus,
        requested: TransferStatus,
    ) -> Result<StatusChange, TransferError> {
        if current == requested {
            return Ok(StatusChange::Unchanged);
        }

        if !Self::is_valid_transition(current, requested) {
            return Err(TransferError::InvalidTransition {
                from: current,
                to: requested,
            });
        }

        Ok(StatusChange::Changed {
            from: current,
            to: requested,
            crosses_confirmed: current.counts_toward_budget()
                != requested.counts_toward_budget(),
        })
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Confirmed (confirm)
    /// - Confirmed → Pending (revert)
    ///
    /// Cancellation is modeled on the status enum but has no reachable
    /// transition in the operator flow.
    #[must_use]
    pub fn is_valid_transition(from: TransferStatus, to: TransferStatus) -> bool {
        matches!(
            (from, to),
            (TransferStatus::Pending, TransferStatus::Confirmed)
                | (TransferStatus::Confirmed, TransferStatus::Pending)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_from_pending() {
        let change =
            TransferWorkflow::apply(TransferStatus::Pending, TransferStatus::Confirmed).unwrap();
        assert_eq!(
            change,
            StatusChange::Changed {
                from: TransferStatus::Pending,
                to: TransferStatus::Confirmed,
                crosses_confirmed: true,
            }
        );
        assert!(change.requires_recompute());
    }

    #[test]
    fn test_revert_from_confirmed() {
        let change =
            TransferWorkflow::apply(TransferStatus::Confirmed, TransferStatus::Pending).unwrap();
        assert!(change.requires_recompute());
    }

    #[test]
    fn test_same_status_is_noop() {
        let change =
            TransferWorkflow::apply(TransferStatus::Pending, TransferStatus::Pending).unwrap();
        assert_eq!(change, StatusChange::Unchanged);
        assert!(!change.requires_recompute());

        let change =
            TransferWorkflow::apply(TransferStatus::Confirmed, TransferStatus::Confirmed).unwrap();
        assert_eq!(change, StatusChange::Unchanged);
    }

    #[test]
    fn test_cancellation_unreachable_via_toggle() {
        let result = TransferWorkflow::apply(TransferStatus::Pending, TransferStatus::Cancelled);
        assert!(matches!(
            result,
            Err(TransferError::InvalidTransition { .. })
        ));

        let result = TransferWorkflow::apply(TransferStatus::Cancelled, TransferStatus::Pending);
        assert!(matches!(
            result,
            Err(TransferError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(TransferWorkflow::is_valid_transition(
            TransferStatus::Pending,
            TransferStatus::Confirmed
        ));
        assert!(TransferWorkflow::is_valid_transition(
            TransferStatus::Confirmed,
            TransferStatus::Pending
        ));
        assert!(!TransferWorkflow::is_valid_transition(
            TransferStatus::Pending,
            TransferStatus::Cancelled
        ));
        assert!(!TransferWorkflow::is_valid_transition(
            TransferStatus::Confirmed,
            TransferStatus::Cancelled
        ));
        assert!(!TransferWorkflow::is_valid_transition(
            TransferStatus::Cancelled,
            TransferStatus::Confirmed
        ));
    }
}
