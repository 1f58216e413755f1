//! `SeaORM` Entity for the staff table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A staff member who can send or receive transfers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    /// Staff identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Role label (admin, teacher, librarian).
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
