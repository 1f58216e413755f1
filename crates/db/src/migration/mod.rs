//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The schema builder is
//! used instead of raw SQL so the same migrations run against Postgres and
//! the SQLite test harness.

pub use sea_orm_migration::prelude::*;

mod m20260110_000001_initial;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260110_000001_initial::Migration)]
    }
}
