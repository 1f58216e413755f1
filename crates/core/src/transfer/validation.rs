//! Server-side validation for new transfers.
//!
//! The UI enforces these through form controls; the service validates again
//! so direct API callers cannot record malformed transfers.

use rust_decimal::Decimal;

use super::error::TransferError;
use super::types::NewTransfer;

/// Validates a new transfer before it is recorded.
///
/// # Errors
///
/// Returns `TransferError::NonPositiveAmount` if the amount is zero or
/// negative, `TransferError::PurposeRequired` if the purpose is blank,
/// `TransferError::CurrencyRequired` if the currency code is blank, and
/// `TransferError::SameBranch` if source and destination match.
pub fn validate_new_transfer(input: &NewTransfer) -> Result<(), TransferError> {
    if input.amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount);
    }

    if input.purpose.trim().is_empty() {
        return Err(TransferError::PurposeRequired);
    }

    if input.currency.trim().is_empty() {
        return Err(TransferError::CurrencyRequired);
    }

    if input.from_branch_id == input.to_branch_id {
        return Err(TransferError::SameBranch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::types::TransferStatus;
    use chrono::NaiveDate;
    use maktab_shared::types::{BranchId, StaffId};
    use rust_decimal_macros::dec;

    fn valid_input() -> NewTransfer {
        NewTransfer {
            from_branch_id: BranchId::new(),
            to_branch_id: BranchId::new(),
            from_staff_id: StaffId::new(),
            to_staff_id: StaffId::new(),
            amount: dec!(300),
            currency: "AFN".to_string(),
            transfer_method: "MoneyGram".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            received_date: None,
            status: TransferStatus::Pending,
            confirmation_code: None,
            purpose: "Teacher salaries".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_valid_transfer_passes() {
        assert!(validate_new_transfer(&valid_input()).is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut input = valid_input();
        input.amount = Decimal::ZERO;
        assert!(matches!(
            validate_new_transfer(&input),
            Err(TransferError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut input = valid_input();
        input.amount = dec!(-5);
        assert!(matches!(
            validate_new_transfer(&input),
            Err(TransferError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_blank_purpose_rejected() {
        let mut input = valid_input();
        input.purpose = "   ".to_string();
        assert!(matches!(
            validate_new_transfer(&input),
            Err(TransferError::PurposeRequired)
        ));
    }

    #[test]
    fn test_same_branch_rejected() {
        let mut input = valid_input();
        input.to_branch_id = input.from_branch_id;
        assert!(matches!(
            validate_new_transfer(&input),
            Err(TransferError::SameBranch)
        ));
    }
}
