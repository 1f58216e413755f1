//! Report registry repository.
//!
//! One registry row exists per (branch, period): regeneration updates the
//! existing row in place rather than accumulating duplicates, mirroring the
//! overwrite semantics of the artifact in the object store.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{generated_reports, sea_orm_active_enums::ReportStatus};

/// Error types for report registry operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportRegistryError {
    /// Report not found.
    #[error("Report not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Metadata describing a freshly generated report artifact.
#[derive(Debug, Clone)]
pub struct NewReportEntry {
    /// Scoped branch; `None` means all branches combined.
    pub branch_id: Option<Uuid>,
    /// Resolved period mode: "single", "yearly", or "range".
    pub report_type: String,
    /// Canonical period label.
    pub report_period: String,
    /// Artifact file name.
    pub file_name: String,
    /// Object store key.
    pub file_path: String,
    /// Artifact size in bytes.
    pub file_size: i64,
    /// Number of transfers included.
    pub transaction_count: i32,
    /// Total amount in the primary currency.
    pub total_amount: Decimal,
    /// Primary currency code.
    pub currency: String,
    /// Identity that triggered generation; `None` for scheduled runs.
    pub generated_by: Option<Uuid>,
}

/// Report registry repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts the registry row for a (branch, period) pair.
    ///
    /// Lookup-then-update: an existing row for the same scope and period is
    /// rewritten with the fresh metadata, so regenerating a report twice
    /// leaves exactly one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert(
        &self,
        entry: NewReportEntry,
    ) -> Result<generated_reports::Model, ReportRegistryError> {
        let existing = self
            .find_for_scope(entry.branch_id, &entry.report_period)
            .await?;

        let now = Utc::now().into();

        let model = if let Some(existing) = existing {
            let mut active: generated_reports::ActiveModel = existing.into();
            active.report_type = Set(entry.report_type);
            active.file_name = Set(entry.file_name);
            active.file_path = Set(entry.file_path);
            active.file_size = Set(entry.file_size);
            active.transaction_count = Set(entry.transaction_count);
            active.total_amount = Set(entry.total_amount);
            active.currency = Set(entry.currency);
            active.generated_by = Set(entry.generated_by);
            active.generated_at = Set(now);
            active.status = Set(ReportStatus::Completed);
            active.error_message = Set(None);
            active.update(&self.db).await?
        } else {
            let report = generated_reports::ActiveModel {
                id: Set(Uuid::new_v4()),
                branch_id: Set(entry.branch_id),
                report_type: Set(entry.report_type),
                report_period: Set(entry.report_period),
                file_name: Set(entry.file_name),
                file_path: Set(entry.file_path),
                file_size: Set(entry.file_size),
                transaction_count: Set(entry.transaction_count),
                total_amount: Set(entry.total_amount),
                currency: Set(entry.currency),
                generated_by: Set(entry.generated_by),
                generated_at: Set(now),
                status: Set(ReportStatus::Completed),
                error_message: Set(None),
            };
            report.insert(&self.db).await?
        };

        Ok(model)
    }

    /// Finds the registry row for a (branch, period) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_scope(
        &self,
        branch_id: Option<Uuid>,
        report_period: &str,
    ) -> Result<Option<generated_reports::Model>, ReportRegistryError> {
        let mut query = generated_reports::Entity::find()
            .filter(generated_reports::Column::ReportPeriod.eq(report_period));

        query = match branch_id {
            Some(branch_id) => query.filter(generated_reports::Column::BranchId.eq(branch_id)),
            None => query.filter(generated_reports::Column::BranchId.is_null()),
        };

        let report = query.one(&self.db).await?;
        Ok(report)
    }

    /// Lists all registry rows, newest generation first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<generated_reports::Model>, ReportRegistryError> {
        let reports = generated_reports::Entity::find()
            .order_by_desc(generated_reports::Column::GeneratedAt)
            .all(&self.db)
            .await?;
        Ok(reports)
    }

    /// Gets a registry row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the report is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<generated_reports::Model, ReportRegistryError> {
        generated_reports::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ReportRegistryError::NotFound(id))
    }

    /// Deletes a registry row.
    ///
    /// # Errors
    ///
    /// Returns an error if the report is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), ReportRegistryError> {
        let report = self.get(id).await?;
        report.delete(&self.db).await?;
        Ok(())
    }
}
