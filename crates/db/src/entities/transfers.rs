//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransferStatus;

/// An inter-branch money transfer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Transfer identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable tracking label.
    pub transaction_number: String,
    /// Branch the money leaves from.
    pub from_branch_id: Uuid,
    /// Branch the money is destined for.
    pub to_branch_id: Uuid,
    /// Staff member sending the transfer.
    pub from_staff_id: Uuid,
    /// Staff member receiving the transfer.
    pub to_staff_id: Uuid,
    /// Transfer amount.
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub amount: Decimal,
    /// Currency code (e.g. "AFN", "USD").
    pub currency: String,
    /// Transfer method label.
    pub transfer_method: String,
    /// Date the transfer was initiated.
    pub transaction_date: Date,
    /// Date the transfer was received, if known.
    pub received_date: Option<Date>,
    /// Lifecycle status.
    pub status: TransferStatus,
    /// External tracking token (e.g. MTCN).
    pub confirmation_code: Option<String>,
    /// What the money is for.
    pub purpose: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Staff member who recorded the transfer.
    pub created_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Source branch.
    #[sea_orm(
        belongs_to = "super::branches::Entity",
        from = "Column::FromBranchId",
        to = "super::branches::Column::Id"
    )]
    FromBranch,
    /// Destination branch.
    #[sea_orm(
        belongs_to = "super::branches::Entity",
        from = "Column::ToBranchId",
        to = "super::branches::Column::Id"
    )]
    ToBranch,
    /// Sending staff member.
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::FromStaffId",
        to = "super::staff::Column::Id"
    )]
    FromStaff,
    /// Receiving staff member.
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::ToStaffId",
        to = "super::staff::Column::Id"
    )]
    ToStaff,
}

impl ActiveModelBehavior for ActiveModel {}
