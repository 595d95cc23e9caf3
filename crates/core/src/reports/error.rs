//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_display() {
        assert_eq!(
            ReportError::AccountNotFound("413501".into()).error_code(),
            "ACCOUNT_NOT_FOUND"
        );
        let err = ReportError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2026-02-01 is after end 2026-01-01"
        );
    }
}
