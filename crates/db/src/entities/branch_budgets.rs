//! `SeaORM` Entity for the branch_budgets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::BudgetPeriod;

/// A branch budget for one period and currency.
///
/// `allocated_amount` is operator-entered; `spent_amount` is derived only,
/// by full recomputation over confirmed transfers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "branch_budgets")]
pub struct Model {
    /// Budget identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Branch this budget belongs to.
    pub branch_id: Uuid,
    /// Budget granularity.
    pub budget_period: BudgetPeriod,
    /// Calendar year.
    pub year: i32,
    /// Month number, set iff the period is monthly.
    pub month: Option<i32>,
    /// Operator-entered allocation.
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub allocated_amount: Decimal,
    /// Derived spend over confirmed transfers.
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub spent_amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning branch.
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
