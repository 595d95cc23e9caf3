//! Financial report routes.
//!
//! All five reports are read-only views over POSTED entries; handlers just
//! parse the query window and delegate to the report repository.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use partida_core::reports::{
    BalanceSheetReport, GeneralLedgerReport, IncomeStatementReport, JournalReport,
    TrialBalanceReport,
};
use partida_core::voucher::VoucherType;
use partida_db::ReportRepository;
use partida_shared::types::TenantId;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/reports/journal", get(journal))
        .route("/tenants/{tenant_id}/reports/general-ledger", get(general_ledger))
        .route("/tenants/{tenant_id}/reports/trial-balance", get(trial_balance))
        .route("/tenants/{tenant_id}/reports/balance-sheet", get(balance_sheet))
        .route("/tenants/{tenant_id}/reports/income-statement", get(income_statement))
}

// ============================================================================
// Query Types
// ============================================================================

/// Query parameters for period reports.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Period start (YYYY-MM-DD).
    pub from: NaiveDate,
    /// Period end (YYYY-MM-DD).
    pub to: NaiveDate,
    /// Optional voucher type filter (journal only).
    #[serde(rename = "type")]
    pub voucher_type: Option<VoucherType>,
}

/// Query parameters for the general ledger.
#[derive(Debug, Deserialize)]
pub struct GeneralLedgerQuery {
    /// Account code.
    pub account: String,
    /// Period start (YYYY-MM-DD).
    pub from: NaiveDate,
    /// Period end (YYYY-MM-DD).
    pub to: NaiveDate,
}

/// Query parameters for as-of reports.
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// Report date, inclusive (YYYY-MM-DD).
    pub as_of: NaiveDate,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `.../reports/journal?from&to[&type]` - chronological entry listing.
async fn journal(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<JournalReport>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let report = repo
        .journal(
            TenantId::from_uuid(tenant_id),
            query.from,
            query.to,
            query.voucher_type,
        )
        .await?;
    Ok(Json(report))
}

/// GET `.../reports/general-ledger?account&from&to` - single-account
/// statement with running balance.
async fn general_ledger(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<GeneralLedgerQuery>,
) -> Result<Json<GeneralLedgerReport>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let report = repo
        .general_ledger(
            TenantId::from_uuid(tenant_id),
            &query.account,
            query.from,
            query.to,
        )
        .await?;
    Ok(Json(report))
}

/// GET `.../reports/trial-balance?as_of` - per-account net balances.
async fn trial_balance(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<TrialBalanceReport>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let report = repo
        .trial_balance(TenantId::from_uuid(tenant_id), query.as_of)
        .await?;
    Ok(Json(report))
}

/// GET `.../reports/balance-sheet?as_of` - statement of financial position.
async fn balance_sheet(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<BalanceSheetReport>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let report = repo
        .balance_sheet(TenantId::from_uuid(tenant_id), query.as_of)
        .await?;
    Ok(Json(report))
}

/// GET `.../reports/income-statement?from&to` - profit and loss.
async fn income_statement(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<IncomeStatementReport>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let report = repo
        .income_statement(TenantId::from_uuid(tenant_id), query.from, query.to)
        .await?;
    Ok(Json(report))
}
