//! Fiscal period routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use partida_core::fiscal::{FiscalPeriod, PeriodStatus};
use partida_db::FiscalPeriodRepository;
use partida_shared::types::TenantId;

/// Creates the fiscal period routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/fiscal-periods", get(list_periods))
        .route("/tenants/{tenant_id}/fiscal-periods", post(open_period))
        .route(
            "/tenants/{tenant_id}/fiscal-periods/{year}/{month}/close",
            post(close_period),
        )
        .route(
            "/tenants/{tenant_id}/fiscal-periods/{year}/{month}/reopen",
            post(reopen_period),
        )
        .route(
            "/tenants/{tenant_id}/fiscal-periods/{year}/{month}/lock",
            post(lock_period),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for opening a period.
#[derive(Debug, Deserialize)]
pub struct OpenPeriodRequest {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

/// Response for a fiscal period.
#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    /// Period id.
    pub id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Status.
    pub status: PeriodStatus,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<FiscalPeriod> for PeriodResponse {
    fn from(period: FiscalPeriod) -> Self {
        Self {
            id: period.id.into_inner(),
            year: period.year,
            month: period.month,
            status: period.status,
            closed_at: period.closed_at,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/tenants/{tenant_id}/fiscal-periods` - list periods, newest first.
async fn list_periods(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<Vec<PeriodResponse>>, ApiError> {
    let repo = FiscalPeriodRepository::new((*state.db).clone());
    let periods = repo.list(TenantId::from_uuid(tenant_id)).await?;
    Ok(Json(periods.into_iter().map(PeriodResponse::from).collect()))
}

/// POST `/tenants/{tenant_id}/fiscal-periods` - open (or fetch) a period.
async fn open_period(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<OpenPeriodRequest>,
) -> Result<Json<PeriodResponse>, ApiError> {
    if !(1..=12).contains(&payload.month) {
        return Err(ApiError::bad_request("INVALID_MONTH", "Month must be 1-12"));
    }
    let repo = FiscalPeriodRepository::new((*state.db).clone());
    let period = repo
        .ensure(TenantId::from_uuid(tenant_id), payload.year, payload.month)
        .await?;
    Ok(Json(period.into()))
}

/// POST `.../fiscal-periods/{year}/{month}/close` - close a period.
async fn close_period(
    State(state): State<AppState>,
    Path((tenant_id, year, month)): Path<(Uuid, i32, u32)>,
) -> Result<Json<PeriodResponse>, ApiError> {
    let repo = FiscalPeriodRepository::new((*state.db).clone());
    let period = repo.close(TenantId::from_uuid(tenant_id), year, month).await?;
    Ok(Json(period.into()))
}

/// POST `.../fiscal-periods/{year}/{month}/reopen` - reopen a closed
/// period. Locked periods stay closed.
async fn reopen_period(
    State(state): State<AppState>,
    Path((tenant_id, year, month)): Path<(Uuid, i32, u32)>,
) -> Result<Json<PeriodResponse>, ApiError> {
    let repo = FiscalPeriodRepository::new((*state.db).clone());
    let period = repo.reopen(TenantId::from_uuid(tenant_id), year, month).await?;
    Ok(Json(period.into()))
}

/// POST `.../fiscal-periods/{year}/{month}/lock` - lock a period for good.
async fn lock_period(
    State(state): State<AppState>,
    Path((tenant_id, year, month)): Path<(Uuid, i32, u32)>,
) -> Result<Json<PeriodResponse>, ApiError> {
    let repo = FiscalPeriodRepository::new((*state.db).clone());
    let period = repo.lock(TenantId::from_uuid(tenant_id), year, month).await?;
    Ok(Json(period.into()))
}
