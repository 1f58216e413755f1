//! `SeaORM` entity definitions.

pub mod branch_budgets;
pub mod branches;
pub mod generated_reports;
pub mod sea_orm_active_enums;
pub mod staff;
pub mod transfers;
