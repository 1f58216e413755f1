//! Shared fixtures for repository integration tests.
//!
//! Tests run against in-memory SQLite with a single pooled connection (each
//! pooled connection would otherwise get its own empty database).
#![allow(dead_code)]

use chrono::NaiveDate;
use maktab_core::transfer::{NewTransfer, TransferStatus};
use maktab_db::migration::Migrator;
use maktab_shared::types::{BranchId, StaffId};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn seed_branch(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    let branch = maktab_db::entities::branches::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        location: Set(None),
        created_at: Set(chrono::Utc::now().into()),
    };
    branch.insert(db).await.expect("insert branch");
    id
}

pub async fn seed_staff(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    let staff = maktab_db::entities::staff::ActiveModel {
        id: Set(id),
        full_name: Set(name.to_string()),
        email: Set(format!("{}@maktab.example", name.to_lowercase().replace(' ', "."))),
        role: Set("teacher".to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };
    staff.insert(db).await.expect("insert staff");
    id
}

pub struct Fixture {
    pub db: DatabaseConnection,
    pub kabul: Uuid,
    pub herat: Uuid,
    pub sender: Uuid,
    pub receiver: Uuid,
}

pub async fn setup_fixture() -> Fixture {
    let db = setup_db().await;
    let kabul = seed_branch(&db, "Kabul Central").await;
    let herat = seed_branch(&db, "Herat").await;
    let sender = seed_staff(&db, "Ahmad Rahimi").await;
    let receiver = seed_staff(&db, "Sara Ahmadi").await;
    Fixture {
        db,
        kabul,
        herat,
        sender,
        receiver,
    }
}

impl Fixture {
    pub fn transfer_to_herat(
        &self,
        amount: Decimal,
        date: NaiveDate,
        status: TransferStatus,
    ) -> NewTransfer {
        NewTransfer {
            from_branch_id: BranchId::from_uuid(self.kabul),
            to_branch_id: BranchId::from_uuid(self.herat),
            from_staff_id: StaffId::from_uuid(self.sender),
            to_staff_id: StaffId::from_uuid(self.receiver),
            amount,
            currency: "AFN".to_string(),
            transfer_method: "MoneyGram".to_string(),
            transaction_date: date,
            received_date: None,
            status,
            confirmation_code: Some("MG123456789".to_string()),
            purpose: "Teacher salaries".to_string(),
            notes: None,
        }
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
