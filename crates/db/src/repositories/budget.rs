//! Budget repository for branch budget operations.
//!
//! `spent_amount` is derived state: every mutation path that can change a
//! transfer's budget effect funnels through `recompute_spent`, a full
//! aggregation over confirmed transfers. Incremental add/subtract updates
//! would drift after a missed event; full recomputation is idempotent and
//! self-correcting.

use chrono::{NaiveDate, Utc};
use maktab_core::budget::{AccrualRecord, PeriodKey, accrue};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{
    branch_budgets,
    sea_orm_active_enums::{BudgetPeriod, TransferStatus},
    transfers,
};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// A budget already exists for this branch, period, and currency.
    #[error("Budget already exists for this branch, period, and currency")]
    Duplicate,

    /// Allocated amount cannot be negative.
    #[error("Allocated amount cannot be negative")]
    NegativeAllocation,

    /// Currency code is required.
    #[error("Budget currency must not be empty")]
    CurrencyRequired,

    /// Month number outside 1-12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Branch the budget belongs to.
    pub branch_id: Uuid,
    /// Concrete period (month or year).
    pub period: PeriodKey,
    /// Operator-entered allocation.
    pub allocated_amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Input for updating a budget.
///
/// `spent_amount` is intentionally absent: it is derived only.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    /// New allocation.
    pub allocated_amount: Option<Decimal>,
    /// New notes.
    pub notes: Option<Option<String>>,
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget row and populates its spend from existing transfers.
    ///
    /// The immediate recompute covers transfers confirmed before the budget
    /// row existed; without it the bucket would stay at zero until the next
    /// status change.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, a duplicate row exists, or the
    /// database operation fails.
    pub async fn create_budget(
        &self,
        input: CreateBudgetInput,
    ) -> Result<branch_budgets::Model, BudgetError> {
        if input.allocated_amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAllocation);
        }
        if input.currency.trim().is_empty() {
            return Err(BudgetError::CurrencyRequired);
        }
        if let PeriodKey::Monthly { month, .. } = input.period {
            if !(1..=12).contains(&month) {
                return Err(BudgetError::InvalidMonth(month));
            }
        }

        let existing = self
            .find_for_key(input.branch_id, &input.period, &input.currency)
            .await?;
        if existing.is_some() {
            return Err(BudgetError::Duplicate);
        }

        let now = Utc::now().into();
        let (year, month) = match input.period {
            PeriodKey::Monthly { year, month } => (year, Some(month_to_db(month))),
            PeriodKey::Yearly { year } => (year, None),
        };

        let budget = branch_budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            branch_id: Set(input.branch_id),
            budget_period: Set(BudgetPeriod::from(input.period.period())),
            year: Set(year),
            month: Set(month),
            allocated_amount: Set(input.allocated_amount),
            spent_amount: Set(Decimal::ZERO),
            currency: Set(input.currency.clone()),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = budget.insert(&self.db).await?;

        let recomputed = self
            .recompute_spent(input.branch_id, &input.period, &input.currency)
            .await?;
        Ok(recomputed.unwrap_or(inserted))
    }

    /// Updates a budget's allocation or notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found, the allocation is
    /// negative, or the database operation fails.
    pub async fn update_budget(
        &self,
        budget_id: Uuid,
        input: UpdateBudgetInput,
    ) -> Result<branch_budgets::Model, BudgetError> {
        let budget = branch_budgets::Entity::find_by_id(budget_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetError::NotFound(budget_id))?;

        let mut active: branch_budgets::ActiveModel = budget.into();

        if let Some(allocated) = input.allocated_amount {
            if allocated < Decimal::ZERO {
                return Err(BudgetError::NegativeAllocation);
            }
            active.allocated_amount = Set(allocated);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Lists all budgets, newest period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_budgets(&self) -> Result<Vec<branch_budgets::Model>, BudgetError> {
        let budgets = branch_budgets::Entity::find()
            .order_by_desc(branch_budgets::Column::Year)
            .order_by_desc(branch_budgets::Column::Month)
            .all(&self.db)
            .await?;
        Ok(budgets)
    }

    /// Gets a budget by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found or the query fails.
    pub async fn get_budget(&self, budget_id: Uuid) -> Result<branch_budgets::Model, BudgetError> {
        branch_budgets::Entity::find_by_id(budget_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetError::NotFound(budget_id))
    }

    /// Finds the budget row for a (branch, period, currency) bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_key(
        &self,
        branch_id: Uuid,
        key: &PeriodKey,
        currency: &str,
    ) -> Result<Option<branch_budgets::Model>, BudgetError> {
        let mut query = branch_budgets::Entity::find()
            .filter(branch_budgets::Column::BranchId.eq(branch_id))
            .filter(branch_budgets::Column::Currency.eq(currency));

        query = match *key {
            PeriodKey::Monthly { year, month } => query
                .filter(branch_budgets::Column::BudgetPeriod.eq(BudgetPeriod::Monthly))
                .filter(branch_budgets::Column::Year.eq(year))
                .filter(branch_budgets::Column::Month.eq(month_to_db(month))),
            PeriodKey::Yearly { year } => query
                .filter(branch_budgets::Column::BudgetPeriod.eq(BudgetPeriod::Yearly))
                .filter(branch_budgets::Column::Year.eq(year)),
        };

        let budget = query.one(&self.db).await?;
        Ok(budget)
    }

    /// Recomputes the spend for one budget bucket by full aggregation.
    ///
    /// Reads every confirmed transfer destined for the branch in the budget's
    /// currency and sums the ones inside the period window. A missing budget
    /// row is a no-op: recomputation never creates budgets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn recompute_spent(
        &self,
        branch_id: Uuid,
        key: &PeriodKey,
        currency: &str,
    ) -> Result<Option<branch_budgets::Model>, BudgetError> {
        let Some(budget) = self.find_for_key(branch_id, key, currency).await? else {
            return Ok(None);
        };

        let rows: Vec<(NaiveDate, Decimal)> = transfers::Entity::find()
            .filter(transfers::Column::ToBranchId.eq(branch_id))
            .filter(transfers::Column::Status.eq(TransferStatus::Confirmed))
            .filter(transfers::Column::Currency.eq(currency))
            .select_only()
            .column(transfers::Column::TransactionDate)
            .column(transfers::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;

        let records: Vec<AccrualRecord> = rows
            .into_iter()
            .map(|(transaction_date, amount)| AccrualRecord {
                transaction_date,
                amount,
            })
            .collect();

        let spent = accrue(key, &records);

        tracing::debug!(
            branch_id = %branch_id,
            currency = %currency,
            spent = %spent,
            "Recomputed budget spend"
        );

        let mut active: branch_budgets::ActiveModel = budget.into();
        active.spent_amount = Set(spent);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Recomputes the monthly and yearly buckets containing a transfer date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn recompute_for_date(
        &self,
        branch_id: Uuid,
        currency: &str,
        date: NaiveDate,
    ) -> Result<(), BudgetError> {
        for key in PeriodKey::buckets_for(date) {
            self.recompute_spent(branch_id, &key, currency).await?;
        }
        Ok(())
    }
}

fn month_to_db(month: u32) -> i32 {
    i32::try_from(month).unwrap_or_default()
}
