//! Budget accrual integration tests.
//!
//! Exercises the full create / confirm / unconfirm / delete flow against the
//! repositories and verifies `spent_amount` is recomputed, never drifted.

mod common;

use common::{date, setup_fixture};
use maktab_core::budget::PeriodKey;
use maktab_core::transfer::TransferStatus;
use maktab_db::repositories::{BudgetRepository, CreateBudgetInput, TransferRepository};
use maktab_db::repositories::transfer::TransferRepositoryError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

const MARCH_2025: PeriodKey = PeriodKey::Monthly {
    year: 2025,
    month: 3,
};

async fn spent(budgets: &BudgetRepository, budget_id: Uuid) -> Decimal {
    budgets
        .get_budget(budget_id)
        .await
        .expect("budget exists")
        .spent_amount
}

#[tokio::test]
async fn test_end_to_end_accrual_scenario() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    let budget = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: MARCH_2025,
            allocated_amount: dec!(1000),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("create budget");
    assert_eq!(budget.spent_amount, Decimal::ZERO);

    // Pending transfer does not touch the budget.
    let first = transfers
        .create(
            fixture.transfer_to_herat(dec!(300), date(2025, 3, 15), TransferStatus::Pending),
            None,
        )
        .await
        .expect("create transfer");
    assert_eq!(spent(&budgets, budget.id).await, Decimal::ZERO);

    // Confirming it accrues 300.
    transfers
        .set_status(first.id, TransferStatus::Confirmed)
        .await
        .expect("confirm");
    assert_eq!(spent(&budgets, budget.id).await, dec!(300));

    // A transfer born confirmed accrues immediately.
    let second = transfers
        .create(
            fixture.transfer_to_herat(dec!(200), date(2025, 3, 20), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("create confirmed transfer");
    assert_eq!(spent(&budgets, budget.id).await, dec!(500));

    // Deleting the first reverses its effect.
    transfers.delete(first.id).await.expect("delete");
    assert_eq!(spent(&budgets, budget.id).await, dec!(200));

    // And deleting the second drains the bucket.
    transfers.delete(second.id).await.expect("delete");
    assert_eq!(spent(&budgets, budget.id).await, Decimal::ZERO);
}

#[tokio::test]
async fn test_toggle_round_trip_leaves_spend_unchanged() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    let budget = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: MARCH_2025,
            allocated_amount: dec!(1000),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("create budget");

    transfers
        .create(
            fixture.transfer_to_herat(dec!(150), date(2025, 3, 2), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("baseline transfer");
    let baseline = spent(&budgets, budget.id).await;

    let toggled = transfers
        .create(
            fixture.transfer_to_herat(dec!(400), date(2025, 3, 10), TransferStatus::Pending),
            None,
        )
        .await
        .expect("toggled transfer");

    transfers
        .set_status(toggled.id, TransferStatus::Confirmed)
        .await
        .expect("confirm");
    assert_eq!(spent(&budgets, budget.id).await, baseline + dec!(400));

    transfers
        .set_status(toggled.id, TransferStatus::Pending)
        .await
        .expect("revert");
    assert_eq!(spent(&budgets, budget.id).await, baseline);
}

#[tokio::test]
async fn test_same_status_is_idempotent() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    let budget = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: MARCH_2025,
            allocated_amount: dec!(1000),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("create budget");

    let transfer = transfers
        .create(
            fixture.transfer_to_herat(dec!(300), date(2025, 3, 15), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("create transfer");

    // Re-confirming an already confirmed transfer changes nothing.
    transfers
        .set_status(transfer.id, TransferStatus::Confirmed)
        .await
        .expect("re-confirm is a no-op");
    assert_eq!(spent(&budgets, budget.id).await, dec!(300));
}

#[tokio::test]
async fn test_cancellation_not_reachable_via_toggle() {
    let fixture = setup_fixture().await;
    let transfers = TransferRepository::new(fixture.db.clone());

    let transfer = transfers
        .create(
            fixture.transfer_to_herat(dec!(300), date(2025, 3, 15), TransferStatus::Pending),
            None,
        )
        .await
        .expect("create transfer");

    let result = transfers
        .set_status(transfer.id, TransferStatus::Cancelled)
        .await;
    assert!(matches!(
        result,
        Err(TransferRepositoryError::Invalid(_))
    ));
}

#[tokio::test]
async fn test_budget_created_after_transfers_backfills_spend() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    // Confirmed transfers exist before any budget row; their amounts are
    // invisible until a budget is created for the bucket.
    transfers
        .create(
            fixture.transfer_to_herat(dec!(250), date(2025, 3, 5), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("create transfer without budget");

    let budget = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: MARCH_2025,
            allocated_amount: dec!(500),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("create budget");

    // Creation runs the first recompute, so pre-existing spend appears.
    assert_eq!(budget.spent_amount, dec!(250));
}

#[tokio::test]
async fn test_yearly_bucket_accrues_alongside_monthly() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    let monthly = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: MARCH_2025,
            allocated_amount: dec!(1000),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("monthly budget");
    let yearly = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: PeriodKey::Yearly { year: 2025 },
            allocated_amount: dec!(12000),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("yearly budget");

    transfers
        .create(
            fixture.transfer_to_herat(dec!(300), date(2025, 3, 15), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("march transfer");
    transfers
        .create(
            fixture.transfer_to_herat(dec!(100), date(2025, 7, 1), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("july transfer");

    // The monthly bucket only sees March; the yearly bucket sees both.
    assert_eq!(spent(&budgets, monthly.id).await, dec!(300));
    assert_eq!(spent(&budgets, yearly.id).await, dec!(400));
}

#[tokio::test]
async fn test_currency_mismatch_does_not_accrue() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    let budget = budgets
        .create_budget(CreateBudgetInput {
            branch_id: fixture.herat,
            period: MARCH_2025,
            allocated_amount: dec!(1000),
            currency: "AFN".to_string(),
            notes: None,
        })
        .await
        .expect("create budget");

    let mut usd = fixture.transfer_to_herat(dec!(75), date(2025, 3, 10), TransferStatus::Confirmed);
    usd.currency = "USD".to_string();
    transfers.create(usd, None).await.expect("usd transfer");

    assert_eq!(spent(&budgets, budget.id).await, Decimal::ZERO);
}

#[tokio::test]
async fn test_recompute_without_budget_row_is_noop() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());
    let transfers = TransferRepository::new(fixture.db.clone());

    // No budget exists for Herat; confirming must not fail.
    let transfer = transfers
        .create(
            fixture.transfer_to_herat(dec!(300), date(2025, 3, 15), TransferStatus::Pending),
            None,
        )
        .await
        .expect("create transfer");
    transfers
        .set_status(transfer.id, TransferStatus::Confirmed)
        .await
        .expect("confirm without budget");

    let result = budgets
        .recompute_spent(fixture.herat, &MARCH_2025, "AFN")
        .await
        .expect("recompute");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_budget_rejected() {
    let fixture = setup_fixture().await;
    let budgets = BudgetRepository::new(fixture.db.clone());

    let input = CreateBudgetInput {
        branch_id: fixture.herat,
        period: MARCH_2025,
        allocated_amount: dec!(1000),
        currency: "AFN".to_string(),
        notes: None,
    };

    budgets
        .create_budget(input.clone())
        .await
        .expect("first budget");
    let result = budgets.create_budget(input).await;
    assert!(matches!(
        result,
        Err(maktab_db::repositories::BudgetError::Duplicate)
    ));
}
