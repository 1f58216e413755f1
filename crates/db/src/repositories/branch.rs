//! Branch repository for branch lookups.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::branches;

/// Branch repository.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    db: DatabaseConnection,
}

impl BranchRepository {
    /// Creates a new branch repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all branches ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<branches::Model>, DbErr> {
        branches::Entity::find()
            .order_by_asc(branches::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a branch by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<branches::Model>, DbErr> {
        branches::Entity::find_by_id(id).one(&self.db).await
    }

    /// Resolves a branch display name, falling back to "N/A".
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn display_name(&self, id: Uuid) -> Result<String, DbErr> {
        Ok(branches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map_or_else(|| "N/A".to_string(), |b| b.name))
    }

    /// Inserts a branch. Used by fixtures and provisioning.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, name: &str, location: Option<String>) -> Result<branches::Model, DbErr> {
        use sea_orm::{ActiveModelTrait, Set};

        let branch = branches::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            location: Set(location),
            created_at: Set(chrono::Utc::now().into()),
        };
        branch.insert(&self.db).await
    }

    /// Finds a branch by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<branches::Model>, DbErr> {
        branches::Entity::find()
            .filter(branches::Column::Name.eq(name))
            .one(&self.db)
            .await
    }
}
