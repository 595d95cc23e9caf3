//! API error envelope.
//!
//! Every rejection is `{"error": CODE, "message": text}` with a stable
//! machine-readable code; callers branch on the code, never the message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use partida_core::chart::ChartError;
use partida_core::integration::IntegrationError;
use partida_core::reports::ReportError;
use partida_core::voucher::VoucherError;
use partida_db::repositories::account::AccountRepoError;
use partida_db::repositories::fiscal::PeriodRepoError;
use partida_db::repositories::integration::IntegrationRepoError;
use partida_db::repositories::report::ReportRepoError;
use partida_db::repositories::voucher::VoucherRepoError;

/// An API-level error carrying the HTTP status and the stable code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Builds an error from its parts.
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 with a custom code.
    #[must_use]
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

impl From<VoucherError> for ApiError {
    fn from(err: VoucherError) -> Self {
        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.error_code(), err.to_string())
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        let status = match &err {
            ChartError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            ChartError::DuplicateCode(_) | ChartError::AccountInUse(_) => StatusCode::CONFLICT,
            ChartError::SystemAccount(_) | ChartError::InvalidLevel(_) => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.error_code(), err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        let status = match &err {
            ReportError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            ReportError::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.error_code(), err.to_string())
    }
}

impl From<IntegrationError> for ApiError {
    fn from(err: IntegrationError) -> Self {
        let status = match &err {
            IntegrationError::MissingRule(_) | IntegrationError::TotalsMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
            IntegrationError::AlreadyGenerated(_) => StatusCode::CONFLICT,
        };
        Self::new(status, err.error_code(), err.to_string())
    }
}

impl From<VoucherRepoError> for ApiError {
    fn from(err: VoucherRepoError) -> Self {
        match err {
            VoucherRepoError::Voucher(inner) => inner.into(),
            VoucherRepoError::Database(db) => {
                error!(error = %db, "Database error");
                Self::internal("An error occurred")
            }
        }
    }
}

impl From<AccountRepoError> for ApiError {
    fn from(err: AccountRepoError) -> Self {
        match err {
            AccountRepoError::Chart(inner) => inner.into(),
            AccountRepoError::Database(db) => {
                error!(error = %db, "Database error");
                Self::internal("An error occurred")
            }
        }
    }
}

impl From<PeriodRepoError> for ApiError {
    fn from(err: PeriodRepoError) -> Self {
        let code = err.error_code();
        match err {
            PeriodRepoError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, code, err.to_string())
            }
            PeriodRepoError::Locked { .. } => {
                Self::new(StatusCode::CONFLICT, code, err.to_string())
            }
            PeriodRepoError::Database(db) => {
                error!(error = %db, "Database error");
                Self::internal("An error occurred")
            }
        }
    }
}

impl From<ReportRepoError> for ApiError {
    fn from(err: ReportRepoError) -> Self {
        match err {
            ReportRepoError::Report(inner) => inner.into(),
            ReportRepoError::Database(db) => {
                error!(error = %db, "Database error");
                Self::internal("An error occurred")
            }
        }
    }
}

impl From<IntegrationRepoError> for ApiError {
    fn from(err: IntegrationRepoError) -> Self {
        match err {
            IntegrationRepoError::Integration(inner) => inner.into(),
            IntegrationRepoError::Voucher(inner) => inner.into(),
            IntegrationRepoError::Database(db) => {
                error!(error = %db, "Database error");
                Self::internal("An error occurred")
            }
        }
    }
}
