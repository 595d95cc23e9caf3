//! Voucher error types for validation and state errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use partida_shared::types::VoucherId;

use super::types::VoucherStatus;

/// Errors that can occur during voucher operations.
#[derive(Debug, Error)]
pub enum VoucherError {
    // ========== Entry Validation Errors ==========
    /// Entry must have exactly one of debit or credit non-zero.
    #[error("Entry {line} must have exactly one of debit or credit")]
    EntryNotExclusive {
        /// 1-based line number of the offending entry.
        line: usize,
    },

    /// Entry amounts cannot be negative.
    #[error("Entry {line} has a negative amount")]
    NegativeAmount {
        /// 1-based line number of the offending entry.
        line: usize,
    },

    /// Account not found in the chart of accounts.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is inactive.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    /// Account is not a level-4 (postable) account.
    #[error("Account {0} does not accept direct postings")]
    AccountNotPostable(String),

    // ========== Balance Errors ==========
    /// Voucher is not balanced (debits != credits).
    #[error("Voucher is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    // ========== State Errors ==========
    /// The operation is not allowed in the voucher's current status.
    #[error("Operation not allowed while voucher is {actual:?}")]
    InvalidState {
        /// The status the voucher was found in.
        actual: VoucherStatus,
    },

    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    VoucherNotFound(VoucherId),

    // ========== Fiscal Period Errors ==========
    /// The fiscal period for the voucher date does not allow posting.
    #[error("Fiscal period {year}-{month:02} is not open for posting (voucher date {date})")]
    PeriodNotOpen {
        /// Period year.
        year: i32,
        /// Period month (1-12).
        month: u32,
        /// The voucher date that falls inside the period.
        date: NaiveDate,
    },
}

impl VoucherError {
    /// Returns the stable error code for API responses.
    ///
    /// Callers branch on these codes, never on message text.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EntryNotExclusive { .. } => "INVALID_ENTRY",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountNotPostable(_) => "ACCOUNT_NOT_POSTABLE",
            Self::Unbalanced { .. } => "UNBALANCED_VOUCHER",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::PeriodNotOpen { .. } => "PERIOD_CLOSED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EntryNotExclusive { .. }
            | Self::NegativeAmount { .. }
            | Self::AccountInactive(_)
            | Self::AccountNotPostable(_)
            | Self::Unbalanced { .. }
            | Self::PeriodNotOpen { .. } => 400,

            Self::InvalidState { .. } => 409,

            Self::AccountNotFound(_) | Self::VoucherNotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            VoucherError::EntryNotExclusive { line: 1 }.error_code(),
            "INVALID_ENTRY"
        );
        assert_eq!(
            VoucherError::Unbalanced { debit: dec!(100), credit: dec!(50) }.error_code(),
            "UNBALANCED_VOUCHER"
        );
        assert_eq!(
            VoucherError::InvalidState { actual: VoucherStatus::Posted }.error_code(),
            "INVALID_STATE"
        );
        assert_eq!(
            VoucherError::AccountNotFound("999999".into()).error_code(),
            "ACCOUNT_NOT_FOUND"
        );
        assert_eq!(
            VoucherError::PeriodNotOpen {
                year: 2026,
                month: 1,
                date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            }
            .error_code(),
            "PERIOD_CLOSED"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            VoucherError::Unbalanced { debit: dec!(1), credit: dec!(0) }.http_status_code(),
            400
        );
        assert_eq!(
            VoucherError::InvalidState { actual: VoucherStatus::Void }.http_status_code(),
            409
        );
        assert_eq!(
            VoucherError::VoucherNotFound(VoucherId::new()).http_status_code(),
            404
        );
    }

    #[test]
    fn test_error_display() {
        let err = VoucherError::Unbalanced { debit: dec!(119000), credit: dec!(100000) };
        assert_eq!(
            err.to_string(),
            "Voucher is not balanced. Debit: 119000, Credit: 100000"
        );
    }
}
