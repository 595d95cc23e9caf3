//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Domain rules stay in `partida-core`; repositories call them inside the
//! right transaction boundaries.

pub mod account;
pub mod fiscal;
pub mod integration;
pub mod report;
pub mod voucher;

pub use account::{
    AccountFilter, AccountRepoError, AccountRepository, CreateAccountInput, UpdateAccountInput,
};
pub use fiscal::{FiscalPeriodRepository, PeriodRepoError};
pub use integration::{IntegrationRepoError, IntegrationRepository, RequestVoucherOutcome};
pub use report::{ReportRepoError, ReportRepository};
pub use voucher::{UpdateVoucherInput, VoucherFilter, VoucherRepoError, VoucherRepository};
