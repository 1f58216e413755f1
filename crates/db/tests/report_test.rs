//! Report selection and registry integration tests.

mod common;

use common::{date, seed_branch, setup_fixture};
use maktab_core::transfer::TransferStatus;
use maktab_db::repositories::{NewReportEntry, ReportRepository, TransferRepository};
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_selection_includes_boundary_dates_only() {
    let fixture = setup_fixture().await;
    let transfers = TransferRepository::new(fixture.db.clone());

    // Last day of March is in; first day of April is out.
    transfers
        .create(
            fixture.transfer_to_herat(dec!(100), date(2025, 3, 1), TransferStatus::Pending),
            None,
        )
        .await
        .expect("first of month");
    transfers
        .create(
            fixture.transfer_to_herat(dec!(200), date(2025, 3, 31), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("last of month");
    transfers
        .create(
            fixture.transfer_to_herat(dec!(300), date(2025, 4, 1), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("next month");

    let selection = transfers
        .list_for_report(date(2025, 3, 1), date(2025, 3, 31), None)
        .await
        .expect("selection");

    assert_eq!(selection.len(), 2);
    // Date-ascending order.
    assert_eq!(selection[0].transfer.transaction_date, date(2025, 3, 1));
    assert_eq!(selection[1].transfer.transaction_date, date(2025, 3, 31));
}

#[tokio::test]
async fn test_selection_scoped_to_branch_matches_either_side() {
    let fixture = setup_fixture().await;
    let transfers = TransferRepository::new(fixture.db.clone());
    let mazar = seed_branch(&fixture.db, "Mazar-i-Sharif").await;

    // Kabul -> Herat: matches Herat scope as destination.
    transfers
        .create(
            fixture.transfer_to_herat(dec!(100), date(2025, 3, 5), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("to herat");

    // Herat -> Mazar: matches Herat scope as source.
    let mut outbound =
        fixture.transfer_to_herat(dec!(200), date(2025, 3, 10), TransferStatus::Confirmed);
    outbound.from_branch_id = maktab_shared::types::BranchId::from_uuid(fixture.herat);
    outbound.to_branch_id = maktab_shared::types::BranchId::from_uuid(mazar);
    transfers.create(outbound, None).await.expect("from herat");

    // Kabul -> Mazar: does not involve Herat.
    let mut unrelated =
        fixture.transfer_to_herat(dec!(300), date(2025, 3, 15), TransferStatus::Confirmed);
    unrelated.to_branch_id = maktab_shared::types::BranchId::from_uuid(mazar);
    transfers.create(unrelated, None).await.expect("unrelated");

    let selection = transfers
        .list_for_report(date(2025, 3, 1), date(2025, 3, 31), Some(fixture.herat))
        .await
        .expect("scoped selection");

    assert_eq!(selection.len(), 2);

    let all = transfers
        .list_for_report(date(2025, 3, 1), date(2025, 3, 31), None)
        .await
        .expect("unscoped selection");
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_selection_resolves_display_names() {
    let fixture = setup_fixture().await;
    let transfers = TransferRepository::new(fixture.db.clone());

    transfers
        .create(
            fixture.transfer_to_herat(dec!(100), date(2025, 3, 5), TransferStatus::Confirmed),
            None,
        )
        .await
        .expect("create");

    let selection = transfers
        .list_for_report(date(2025, 3, 1), date(2025, 3, 31), None)
        .await
        .expect("selection");

    let row = &selection[0];
    assert_eq!(row.from_branch, "Kabul Central");
    assert_eq!(row.to_branch, "Herat");
    assert_eq!(row.from_staff, "Ahmad Rahimi");
    assert_eq!(row.to_staff, "Sara Ahmadi");
}

fn entry_for(branch_id: Option<uuid::Uuid>, period: &str) -> NewReportEntry {
    NewReportEntry {
        branch_id,
        report_type: "single".to_string(),
        report_period: period.to_string(),
        file_name: format!("Herat_{period}.pdf"),
        file_path: format!("{period}/Herat_{period}.pdf"),
        file_size: 1024,
        transaction_count: 2,
        total_amount: dec!(500),
        currency: "AFN".to_string(),
        generated_by: None,
    }
}

#[tokio::test]
async fn test_registry_upsert_is_idempotent_per_scope_and_period() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());

    let first = reports
        .upsert(entry_for(Some(fixture.herat), "2025-03"))
        .await
        .expect("first upsert");

    let mut second = entry_for(Some(fixture.herat), "2025-03");
    second.file_size = 2048;
    second.transaction_count = 3;
    let updated = reports.upsert(second).await.expect("second upsert");

    // Same row, refreshed metadata.
    assert_eq!(first.id, updated.id);
    assert_eq!(updated.file_size, 2048);
    assert_eq!(updated.transaction_count, 3);

    let rows = maktab_db::entities::generated_reports::Entity::find()
        .all(&fixture.db)
        .await
        .expect("count rows");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_registry_all_branches_scope_is_distinct() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());

    reports
        .upsert(entry_for(Some(fixture.herat), "2025-03"))
        .await
        .expect("branch scope");
    reports
        .upsert(entry_for(None, "2025-03"))
        .await
        .expect("all-branches scope");
    reports
        .upsert(entry_for(None, "2025-03"))
        .await
        .expect("all-branches regeneration");

    let rows = reports.list().await.expect("list");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_registry_get_and_delete() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());

    let report = reports
        .upsert(entry_for(Some(fixture.herat), "2025-03"))
        .await
        .expect("upsert");

    let fetched = reports.get(report.id).await.expect("get");
    assert_eq!(fetched.report_period, "2025-03");
    assert_eq!(fetched.report_type, "single");

    reports.delete(report.id).await.expect("delete");
    assert!(reports.get(report.id).await.is_err());
    assert!(reports.list().await.expect("list").is_empty());
}
