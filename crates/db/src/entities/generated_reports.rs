//! `SeaORM` Entity for the generated_reports table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReportStatus;

/// Registry entry describing a generated report artifact.
///
/// The registry row is the source of truth for whether a report exists; the
/// artifact bytes live in the object store at `file_path`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "generated_reports")]
pub struct Model {
    /// Report identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Scoped branch; `None` means all branches combined.
    pub branch_id: Option<Uuid>,
    /// Resolved period mode: "single", "yearly", or "range".
    pub report_type: String,
    /// Canonical period label, e.g. "2025-03".
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
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub total_amount: Decimal,
    /// Primary currency code.
    pub currency: String,
    /// Identity that triggered generation; `None` for scheduled runs.
    pub generated_by: Option<Uuid>,
    /// Generation timestamp.
    pub generated_at: DateTimeWithTimeZone,
    /// Generation outcome.
    pub status: ReportStatus,
    /// Error message for failed runs.
    pub error_message: Option<String>,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Scoped branch.
    #[sea_orm(
        belongs_to = "super::branches::Entity",
        from = "Column::BranchId",
        to = "super::branches::Column::Id"
    )]
    Branch,
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
