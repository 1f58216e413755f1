//! Transfer repository for transaction ledger operations.
//!
//! Owns the create / status-toggle / delete flow and invokes the budget
//! recompute whenever an operation changes whether a transfer counts as
//! confirmed. The status change and the recompute are two separate writes;
//! a concurrent reader can briefly observe a confirmed transfer whose budget
//! has not caught up yet (accepted eventual consistency of `spent_amount`).

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use maktab_core::transfer::{NewTransfer, TransferWorkflow, validate_new_transfer};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{branches, sea_orm_active_enums::TransferStatus, staff, transfers};
use crate::repositories::budget::{BudgetError, BudgetRepository};

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferRepositoryError {
    /// Transfer not found.
    #[error("Transfer not found: {0}")]
    NotFound(Uuid),

    /// Domain validation or transition failure.
    #[error(transparent)]
    Invalid(#[from] maktab_core::transfer::TransferError),

    /// Budget recompute failure.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing transfers.
#[derive(Debug, Clone, Default)]
pub struct TransferFilter {
    /// Filter by status.
    pub status: Option<TransferStatus>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Filter by branch on either side of the transfer.
    pub branch_id: Option<Uuid>,
}

/// A transfer with branch and staff display names resolved.
#[derive(Debug, Clone)]
pub struct TransferWithNames {
    /// The transfer record.
    pub transfer: transfers::Model,
    /// Source branch name.
    pub from_branch: String,
    /// Destination branch name.
    pub to_branch: String,
    /// Sender name.
    pub from_staff: String,
    /// Receiver name.
    pub to_staff: String,
}

/// Transfer repository.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new transfer.
    ///
    /// The caller may choose the initial status; a transfer born confirmed
    /// immediately affects the destination budget, so the recompute runs
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database operation fails.
    pub async fn create(
        &self,
        input: NewTransfer,
        created_by: Option<Uuid>,
    ) -> Result<transfers::Model, TransferRepositoryError> {
        validate_new_transfer(&input)?;

        let transfer = transfers::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_number: Set(generate_transaction_number()),
            from_branch_id: Set(input.from_branch_id.into_inner()),
            to_branch_id: Set(input.to_branch_id.into_inner()),
            from_staff_id: Set(input.from_staff_id.into_inner()),
            to_staff_id: Set(input.to_staff_id.into_inner()),
            amount: Set(input.amount),
            currency: Set(input.currency.clone()),
            transfer_method: Set(input.transfer_method),
            transaction_date: Set(input.transaction_date),
            received_date: Set(input.received_date),
            status: Set(TransferStatus::from(input.status)),
            confirmation_code: Set(input.confirmation_code),
            purpose: Set(input.purpose),
            notes: Set(input.notes),
            created_by: Set(created_by),
            created_at: Set(Utc::now().into()),
        };

        let inserted = transfer.insert(&self.db).await?;

        if input.status.counts_toward_budget() {
            self.budgets()
                .recompute_for_date(
                    inserted.to_branch_id,
                    &inserted.currency,
                    inserted.transaction_date,
                )
                .await?;
        }

        Ok(inserted)
    }

    /// Finds a transfer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer is not found or the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<transfers::Model, TransferRepositoryError> {
        transfers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransferRepositoryError::NotFound(id))
    }

    /// Applies a status change through the transfer workflow.
    ///
    /// Re-applying the current status is a no-op: the row is returned
    /// unchanged and no recompute runs. A transition crossing the confirmed
    /// boundary recomputes the destination budget buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer is not found, the transition is
    /// invalid, or the database operation fails.
    pub async fn set_status(
        &self,
        id: Uuid,
        requested: maktab_core::transfer::TransferStatus,
    ) -> Result<transfers::Model, TransferRepositoryError> {
        let transfer = self.find_by_id(id).await?;
        let change = TransferWorkflow::apply(transfer.status.into(), requested)?;

        if !matches!(change, maktab_core::transfer::StatusChange::Changed { .. }) {
            return Ok(transfer);
        }

        let to_branch_id = transfer.to_branch_id;
        let currency = transfer.currency.clone();
        let transaction_date = transfer.transaction_date;

        let mut active: transfers::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::from(requested));
        let updated = active.update(&self.db).await?;

        if change.requires_recompute() {
            self.budgets()
                .recompute_for_date(to_branch_id, &currency, transaction_date)
                .await?;
        }

        Ok(updated)
    }

    /// Deletes a transfer.
    ///
    /// Deleting a confirmed transfer reverses its budget effect via
    /// recompute; skipping this would leave stale `spent_amount` behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer is not found or the database
    /// operation fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), TransferRepositoryError> {
        let transfer = self.find_by_id(id).await?;

        let was_confirmed = transfer.status == TransferStatus::Confirmed;
        let to_branch_id = transfer.to_branch_id;
        let currency = transfer.currency.clone();
        let transaction_date = transfer.transaction_date;

        transfer.delete(&self.db).await?;

        if was_confirmed {
            self.budgets()
                .recompute_for_date(to_branch_id, &currency, transaction_date)
                .await?;
        }

        Ok(())
    }

    /// Lists transfers, newest first, with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &TransferFilter,
    ) -> Result<Vec<transfers::Model>, TransferRepositoryError> {
        let mut query = transfers::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(transfers::Column::Status.eq(status));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transfers::Column::TransactionDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(transfers::Column::TransactionDate.lte(to));
        }
        if let Some(branch_id) = filter.branch_id {
            query = query.filter(
                Condition::any()
                    .add(transfers::Column::FromBranchId.eq(branch_id))
                    .add(transfers::Column::ToBranchId.eq(branch_id)),
            );
        }

        let transfers = query
            .order_by_desc(transfers::Column::TransactionDate)
            .all(&self.db)
            .await?;
        Ok(transfers)
    }

    /// Selects transfers for a report, date-ascending, with names resolved.
    ///
    /// The selection is exactly the set with `transaction_date` in
    /// `[start, end]` inclusive and, when scoped, the branch on either side
    /// of the transfer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        scope: Option<Uuid>,
    ) -> Result<Vec<TransferWithNames>, TransferRepositoryError> {
        let mut query = transfers::Entity::find()
            .filter(transfers::Column::TransactionDate.gte(start))
            .filter(transfers::Column::TransactionDate.lte(end));

        if let Some(branch_id) = scope {
            query = query.filter(
                Condition::any()
                    .add(transfers::Column::FromBranchId.eq(branch_id))
                    .add(transfers::Column::ToBranchId.eq(branch_id)),
            );
        }

        let rows = query
            .order_by_asc(transfers::Column::TransactionDate)
            .all(&self.db)
            .await?;

        let branch_names = self.branch_name_map(&rows).await?;
        let staff_names = self.staff_name_map(&rows).await?;

        let resolve = |map: &HashMap<Uuid, String>, id: Uuid| {
            map.get(&id).cloned().unwrap_or_else(|| "N/A".to_string())
        };

        Ok(rows
            .into_iter()
            .map(|transfer| TransferWithNames {
                from_branch: resolve(&branch_names, transfer.from_branch_id),
                to_branch: resolve(&branch_names, transfer.to_branch_id),
                from_staff: resolve(&staff_names, transfer.from_staff_id),
                to_staff: resolve(&staff_names, transfer.to_staff_id),
                transfer,
            })
            .collect())
    }

    async fn branch_name_map(
        &self,
        rows: &[transfers::Model],
    ) -> Result<HashMap<Uuid, String>, DbErr> {
        let ids: Vec<Uuid> = rows
            .iter()
            .flat_map(|t| [t.from_branch_id, t.to_branch_id])
            .collect();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(branches::Entity::find()
            .filter(branches::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect())
    }

    async fn staff_name_map(
        &self,
        rows: &[transfers::Model],
    ) -> Result<HashMap<Uuid, String>, DbErr> {
        let ids: Vec<Uuid> = rows
            .iter()
            .flat_map(|t| [t.from_staff_id, t.to_staff_id])
            .collect();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(staff::Entity::find()
            .filter(staff::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.full_name))
            .collect())
    }

    fn budgets(&self) -> BudgetRepository {
        BudgetRepository::new(self.db.clone())
    }
}

/// Generates a human-readable transfer tracking label.
fn generate_transaction_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("TXN-{}", id[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_number_format() {
        let number = generate_transaction_number();
        assert!(number.starts_with("TXN-"));
        assert_eq!(number.len(), 12);
        assert!(
            number[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }
}
