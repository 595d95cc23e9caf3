//! Integration adapter routes.
//!
//! External document modules (invoicing, purchasing, payroll, notes) call
//! this endpoint to generate accounting for a source document, at most once
//! per (kind, reference).

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use partida_core::integration::{
    DocumentKind, DocumentTotals, PostingEvent, PostingRules, SourceDocument,
};
use partida_db::IntegrationRepository;
use partida_shared::types::TenantId;

/// Creates the integration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/tenants/{tenant_id}/integration/vouchers",
        post(request_voucher),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for generating accounting for a source document.
#[derive(Debug, Deserialize)]
pub struct RequestVoucherRequest {
    /// Document kind.
    pub kind: DocumentKind,
    /// The document's own number; the idempotency key with tenant and kind.
    pub reference: String,
    /// Document date.
    pub date: NaiveDate,
    /// Description for the generated voucher.
    pub description: String,
    /// Monetary totals, commercial- or payroll-shaped.
    pub totals: DocumentTotals,
    /// Optional per-request overrides of the tenant's posting rules.
    #[serde(default)]
    pub posting_rules: HashMap<PostingEvent, String>,
}

/// Response for a voucher request.
#[derive(Debug, Serialize)]
pub struct RequestVoucherResponse {
    /// The voucher linked to the source document.
    pub voucher_id: Uuid,
    /// False when the call was an idempotent replay.
    pub created: bool,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/tenants/{tenant_id}/integration/vouchers` - create-then-post a
/// voucher for a source document.
async fn request_voucher(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<RequestVoucherRequest>,
) -> Result<(StatusCode, Json<RequestVoucherResponse>), ApiError> {
    let mut rules = PostingRules::colombian_demo();
    for (event, code) in payload.posting_rules {
        rules.set(event, code);
    }

    let document = SourceDocument {
        tenant_id: TenantId::from_uuid(tenant_id),
        kind: payload.kind,
        reference: payload.reference,
        date: payload.date,
        description: payload.description,
        totals: payload.totals,
    };

    let repo = IntegrationRepository::new((*state.db).clone());
    let outcome = repo.request_voucher(&document, &rules).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(RequestVoucherResponse {
            voucher_id: outcome.voucher_id.into_inner(),
            created: outcome.created,
        }),
    ))
}
