//! Initial schema: branches, staff, transactions, branch budgets, and the
//! generated-report registry.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branches::Table)
                    .col(pk_uuid(Branches::Id))
                    .col(string(Branches::Name))
                    .col(string_null(Branches::Location))
                    .col(timestamp_with_time_zone(Branches::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .col(pk_uuid(Staff::Id))
                    .col(string(Staff::FullName))
                    .col(string(Staff::Email))
                    .col(string(Staff::Role))
                    .col(timestamp_with_time_zone(Staff::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .col(pk_uuid(Transactions::Id))
                    .col(string(Transactions::TransactionNumber))
                    .col(uuid(Transactions::FromBranchId))
                    .col(uuid(Transactions::ToBranchId))
                    .col(uuid(Transactions::FromStaffId))
                    .col(uuid(Transactions::ToStaffId))
                    .col(decimal_len(Transactions::Amount, 14, 2))
                    .col(string(Transactions::Currency))
                    .col(string(Transactions::TransferMethod))
                    .col(date(Transactions::TransactionDate))
                    .col(date_null(Transactions::ReceivedDate))
                    .col(string(Transactions::Status))
                    .col(string_null(Transactions::ConfirmationCode))
                    .col(string(Transactions::Purpose))
                    .col(string_null(Transactions::Notes))
                    .col(uuid_null(Transactions::CreatedBy))
                    .col(timestamp_with_time_zone(Transactions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_from_branch")
                            .from(Transactions::Table, Transactions::FromBranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_to_branch")
                            .from(Transactions::Table, Transactions::ToBranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_from_staff")
                            .from(Transactions::Table, Transactions::FromStaffId)
                            .to(Staff::Table, Staff::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_to_staff")
                            .from(Transactions::Table, Transactions::ToStaffId)
                            .to(Staff::Table, Staff::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BranchBudgets::Table)
                    .col(pk_uuid(BranchBudgets::Id))
                    .col(uuid(BranchBudgets::BranchId))
                    .col(string(BranchBudgets::BudgetPeriod))
                    .col(integer(BranchBudgets::Year))
                    .col(integer_null(BranchBudgets::Month))
                    .col(decimal_len(BranchBudgets::AllocatedAmount, 14, 2))
                    .col(decimal_len(BranchBudgets::SpentAmount, 14, 2))
                    .col(string(BranchBudgets::Currency))
                    .col(string_null(BranchBudgets::Notes))
                    .col(timestamp_with_time_zone(BranchBudgets::CreatedAt))
                    .col(timestamp_with_time_zone(BranchBudgets::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branch_budgets_branch")
                            .from(BranchBudgets::Table, BranchBudgets::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GeneratedReports::Table)
                    .col(pk_uuid(GeneratedReports::Id))
                    .col(uuid_null(GeneratedReports::BranchId))
                    .col(string(GeneratedReports::ReportType))
                    .col(string(GeneratedReports::ReportPeriod))
                    .col(string(GeneratedReports::FileName))
                    .col(string(GeneratedReports::FilePath))
                    .col(big_integer(GeneratedReports::FileSize))
                    .col(integer(GeneratedReports::TransactionCount))
                    .col(decimal_len(GeneratedReports::TotalAmount, 14, 2))
                    .col(string(GeneratedReports::Currency))
                    .col(uuid_null(GeneratedReports::GeneratedBy))
                    .col(timestamp_with_time_zone(GeneratedReports::GeneratedAt))
                    .col(string(GeneratedReports::Status))
                    .col(string_null(GeneratedReports::ErrorMessage))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_generated_reports_branch")
                            .from(GeneratedReports::Table, GeneratedReports::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_date")
                    .table(Transactions::Table)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_to_branch_status")
                    .table(Transactions::Table)
                    .col(Transactions::ToBranchId)
                    .col(Transactions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_branch_budgets_branch_currency")
                    .table(BranchBudgets::Table)
                    .col(BranchBudgets::BranchId)
                    .col(BranchBudgets::Currency)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generated_reports_period")
                    .table(GeneratedReports::Table)
                    .col(GeneratedReports::ReportPeriod)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeneratedReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BranchBudgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
    Name,
    Location,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    FullName,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    TransactionNumber,
    FromBranchId,
    ToBranchId,
    FromStaffId,
    ToStaffId,
    Amount,
    Currency,
    TransferMethod,
    TransactionDate,
    ReceivedDate,
    Status,
    ConfirmationCode,
    Purpose,
    Notes,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BranchBudgets {
    Table,
    Id,
    BranchId,
    BudgetPeriod,
    Year,
    Month,
    AllocatedAmount,
    SpentAmount,
    Currency,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GeneratedReports {
    Table,
    Id,
    BranchId,
    ReportType,
    ReportPeriod,
    FileName,
    FilePath,
    FileSize,
    TransactionCount,
    TotalAmount,
    Currency,
    GeneratedBy,
    GeneratedAt,
    Status,
    ErrorMessage,
}
