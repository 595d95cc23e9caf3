//! Voucher lifecycle routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use partida_core::voucher::{
    CreateVoucherInput, Entry, EntryInput, Voucher, VoucherStatus, VoucherType,
};
use partida_db::VoucherRepository;
use partida_db::repositories::voucher::{UpdateVoucherInput, VoucherFilter};
use partida_shared::types::{CostCenterId, PageRequest, PageResponse, TenantId, ThirdPartyId, VoucherId};

/// Creates the voucher routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/vouchers", get(list_vouchers))
        .route("/tenants/{tenant_id}/vouchers", post(create_voucher))
        .route("/tenants/{tenant_id}/vouchers/{voucher_id}", get(get_voucher))
        .route("/tenants/{tenant_id}/vouchers/{voucher_id}", put(update_voucher))
        .route("/tenants/{tenant_id}/vouchers/{voucher_id}", delete(delete_voucher))
        .route("/tenants/{tenant_id}/vouchers/{voucher_id}/post", post(post_voucher))
        .route("/tenants/{tenant_id}/vouchers/{voucher_id}/void", post(void_voucher))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing vouchers.
#[derive(Debug, Deserialize)]
pub struct ListVouchersQuery {
    /// Filter by status.
    pub status: Option<VoucherStatus>,
    /// Filter by voucher type.
    #[serde(rename = "type")]
    pub voucher_type: Option<VoucherType>,
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for a single entry line.
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    /// Account code (level-4).
    pub account_code: String,
    /// Optional third party.
    pub third_party_id: Option<Uuid>,
    /// Optional cost center.
    pub cost_center_id: Option<Uuid>,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount (decimal string).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (decimal string).
    #[serde(default)]
    pub credit: Decimal,
    /// Withholding base.
    pub base_value: Option<Decimal>,
    /// Tax amount.
    pub tax_value: Option<Decimal>,
}

impl From<EntryRequest> for EntryInput {
    fn from(request: EntryRequest) -> Self {
        Self {
            account_code: request.account_code,
            third_party_id: request.third_party_id.map(ThirdPartyId::from_uuid),
            cost_center_id: request.cost_center_id.map(CostCenterId::from_uuid),
            description: request.description,
            debit: request.debit,
            credit: request.credit,
            base_value: request.base_value,
            tax_value: request.tax_value,
        }
    }
}

/// Request body for creating a voucher.
#[derive(Debug, Deserialize)]
pub struct CreateVoucherRequest {
    /// Voucher type.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Voucher date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// External reference.
    pub reference: Option<String>,
    /// Entry lines; balance is not required until post.
    #[serde(default)]
    pub entries: Vec<EntryRequest>,
}

/// Request body for replacing a draft voucher's content.
#[derive(Debug, Deserialize)]
pub struct UpdateVoucherRequest {
    /// New voucher date.
    pub date: NaiveDate,
    /// New description.
    pub description: String,
    /// New reference.
    pub reference: Option<String>,
    /// The replacement entry set.
    pub entries: Vec<EntryRequest>,
}

/// Response for an entry line.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry id.
    pub id: Uuid,
    /// Line number.
    pub line_number: i32,
    /// Account code.
    pub account_code: String,
    /// Third party.
    pub third_party_id: Option<Uuid>,
    /// Cost center.
    pub cost_center_id: Option<Uuid>,
    /// Description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Withholding base.
    pub base_value: Option<Decimal>,
    /// Tax amount.
    pub tax_value: Option<Decimal>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id.into_inner(),
            line_number: entry.line_number,
            account_code: entry.account_code,
            third_party_id: entry.third_party_id.map(ThirdPartyId::into_inner),
            cost_center_id: entry.cost_center_id.map(CostCenterId::into_inner),
            description: entry.description,
            debit: entry.debit,
            credit: entry.credit,
            base_value: entry.base_value,
            tax_value: entry.tax_value,
        }
    }
}

/// Response for a voucher.
#[derive(Debug, Serialize)]
pub struct VoucherResponse {
    /// Voucher id.
    pub id: Uuid,
    /// Voucher type.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Sequential number.
    pub voucher_number: String,
    /// Voucher date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// External reference.
    pub reference: Option<String>,
    /// Status.
    pub status: VoucherStatus,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Fiscal period (month).
    pub fiscal_period: u32,
    /// Debit total.
    pub total_debit: Decimal,
    /// Credit total.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Posting timestamp.
    pub posted_at: Option<DateTime<Utc>>,
    /// Entry lines in order.
    pub entries: Vec<EntryResponse>,
}

impl From<Voucher> for VoucherResponse {
    fn from(voucher: Voucher) -> Self {
        let is_balanced = voucher.is_balanced();
        Self {
            id: voucher.id.into_inner(),
            voucher_type: voucher.voucher_type,
            voucher_number: voucher.voucher_number,
            date: voucher.date,
            description: voucher.description,
            reference: voucher.reference,
            status: voucher.status,
            fiscal_year: voucher.fiscal_year,
            fiscal_period: voucher.fiscal_period,
            total_debit: voucher.total_debit,
            total_credit: voucher.total_credit,
            is_balanced,
            created_at: voucher.created_at,
            posted_at: voucher.posted_at,
            entries: voucher.entries.into_iter().map(EntryResponse::from).collect(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/tenants/{tenant_id}/vouchers` - list vouchers.
async fn list_vouchers(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<ListVouchersQuery>,
) -> Result<Json<PageResponse<VoucherResponse>>, ApiError> {
    let defaults = PageRequest::default();
    let page_request = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let repo = VoucherRepository::new((*state.db).clone());
    let page = repo
        .list(
            TenantId::from_uuid(tenant_id),
            VoucherFilter {
                status: query.status,
                voucher_type: query.voucher_type,
                date_from: query.from,
                date_to: query.to,
            },
            &page_request,
        )
        .await?;
    let items = page.items.into_iter().map(VoucherResponse::from).collect();
    Ok(Json(PageResponse {
        items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
    }))
}

/// POST `/tenants/{tenant_id}/vouchers` - create a draft voucher.
async fn create_voucher(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<CreateVoucherRequest>,
) -> Result<(StatusCode, Json<VoucherResponse>), ApiError> {
    let repo = VoucherRepository::new((*state.db).clone());
    let voucher = repo
        .create(CreateVoucherInput {
            tenant_id: TenantId::from_uuid(tenant_id),
            voucher_type: payload.voucher_type,
            date: payload.date,
            description: payload.description,
            reference: payload.reference,
            entries: payload.entries.into_iter().map(EntryInput::from).collect(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(voucher.into())))
}

/// GET `/tenants/{tenant_id}/vouchers/{voucher_id}` - fetch one voucher.
async fn get_voucher(
    State(state): State<AppState>,
    Path((_tenant_id, voucher_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let repo = VoucherRepository::new((*state.db).clone());
    let voucher = repo.find_by_id(VoucherId::from_uuid(voucher_id)).await?;
    Ok(Json(voucher.into()))
}

/// PUT `/tenants/{tenant_id}/vouchers/{voucher_id}` - replace a draft's
/// content.
async fn update_voucher(
    State(state): State<AppState>,
    Path((_tenant_id, voucher_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateVoucherRequest>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let repo = VoucherRepository::new((*state.db).clone());
    let voucher = repo
        .update(
            VoucherId::from_uuid(voucher_id),
            UpdateVoucherInput {
                date: payload.date,
                description: payload.description,
                reference: payload.reference,
                entries: payload.entries.into_iter().map(EntryInput::from).collect(),
            },
        )
        .await?;
    Ok(Json(voucher.into()))
}

/// DELETE `/tenants/{tenant_id}/vouchers/{voucher_id}` - delete a draft.
async fn delete_voucher(
    State(state): State<AppState>,
    Path((_tenant_id, voucher_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let repo = VoucherRepository::new((*state.db).clone());
    repo.delete(VoucherId::from_uuid(voucher_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/tenants/{tenant_id}/vouchers/{voucher_id}/post` - post a draft.
async fn post_voucher(
    State(state): State<AppState>,
    Path((_tenant_id, voucher_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let repo = VoucherRepository::new((*state.db).clone());
    let voucher = repo.post(VoucherId::from_uuid(voucher_id)).await?;
    Ok(Json(voucher.into()))
}

/// POST `/tenants/{tenant_id}/vouchers/{voucher_id}/void` - void a posted
/// voucher.
async fn void_voucher(
    State(state): State<AppState>,
    Path((_tenant_id, voucher_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let repo = VoucherRepository::new((*state.db).clone());
    let voucher = repo.void(VoucherId::from_uuid(voucher_id)).await?;
    Ok(Json(voucher.into()))
}
