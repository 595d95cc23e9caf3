//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate owns the transaction boundaries the ledger's correctness
//! depends on: voucher numbering inside the insert's transaction, status
//! transitions validated against re-read state, consistent report
//! snapshots, and the integration adapter's at-most-once flag update.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, FiscalPeriodRepository, IntegrationRepository, ReportRepository,
    VoucherRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
