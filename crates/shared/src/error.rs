//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::BusinessRule(String::new()).status_code(), 422);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::BusinessRule(String::new()).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("voucher".into()).to_string(),
            "Not found: voucher"
        );
        assert_eq!(
            AppError::Conflict("duplicate code".into()).to_string(),
            "Conflict: duplicate code"
        );
    }
}
