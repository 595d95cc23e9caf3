//! Chart of accounts error types.

use thiserror::Error;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account code already exists for the tenant.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// System accounts cannot be modified or deleted.
    #[error("Account {0} is a system account")]
    SystemAccount(String),

    /// Account still has ledger entries referencing it.
    #[error("Account {0} has postings and cannot be deleted")]
    AccountInUse(String),

    /// Account level must be between 1 and 4.
    #[error("Invalid account level: {0}")]
    InvalidLevel(i16),
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::SystemAccount(_) => "SYSTEM_ACCOUNT",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::InvalidLevel(_) => "INVALID_LEVEL",
        }
    }
}
