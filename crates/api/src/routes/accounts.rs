//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use partida_core::chart::{Account, AccountNature, AccountType};
use partida_db::AccountRepository;
use partida_db::repositories::account::{AccountFilter, CreateAccountInput, UpdateAccountInput};
use partida_shared::types::TenantId;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/accounts", get(list_accounts))
        .route("/tenants/{tenant_id}/accounts", post(create_account))
        .route("/tenants/{tenant_id}/accounts/{code}", get(get_account))
        .route("/tenants/{tenant_id}/accounts/{code}", put(update_account))
        .route("/tenants/{tenant_id}/accounts/{code}", delete(delete_account))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by classification.
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// Filter by hierarchy level.
    pub level: Option<i16>,
    /// Only active accounts.
    #[serde(default)]
    pub only_active: bool,
    /// Shortcut: only active postable (level-4) accounts.
    #[serde(default)]
    pub leaf: bool,
    /// Inclusive code range start; requires `type` and `code_end`.
    pub code_start: Option<String>,
    /// Inclusive code range end.
    pub code_end: Option<String>,
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Nature; defaults from the type when omitted.
    pub nature: Option<AccountNature>,
    /// Hierarchy level (1-4).
    pub level: i16,
    /// Parent account code.
    pub parent_code: Option<String>,
    /// Postings must carry a third party.
    #[serde(default)]
    pub requires_third_party: bool,
    /// Postings must carry a cost center.
    #[serde(default)]
    pub requires_cost_center: bool,
}

/// Request body for updating an account.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New name.
    pub name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New third-party requirement.
    pub requires_third_party: Option<bool>,
    /// New cost-center requirement.
    pub requires_cost_center: Option<bool>,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account id.
    pub id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Nature.
    pub nature: AccountNature,
    /// Hierarchy level.
    pub level: i16,
    /// Parent account code.
    pub parent_code: Option<String>,
    /// Third-party requirement.
    pub requires_third_party: bool,
    /// Cost-center requirement.
    pub requires_cost_center: bool,
    /// Active flag.
    pub is_active: bool,
    /// System flag.
    pub is_system: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.into_inner(),
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            nature: account.nature,
            level: account.level,
            parent_code: account.parent_code,
            requires_third_party: account.requires_third_party,
            requires_cost_center: account.requires_cost_center,
            is_active: account.is_active,
            is_system: account.is_system,
            created_at: account.created_at,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/tenants/{tenant_id}/accounts` - list accounts.
///
/// `?leaf=true` lists active postable accounts;
/// `?type=..&code_start=..&code_end=..` lists a classification code range.
async fn list_accounts(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let tenant_id = TenantId::from_uuid(tenant_id);

    let accounts = if query.leaf {
        repo.list_active_leaf_accounts(tenant_id).await?
    } else if let (Some(start), Some(end)) = (&query.code_start, &query.code_end) {
        let Some(account_type) = query.account_type else {
            return Err(ApiError::bad_request(
                "MISSING_TYPE",
                "Code range listing requires the type parameter",
            ));
        };
        repo.list_by_code_range(tenant_id, account_type, start, end).await?
    } else {
        repo.list(
            tenant_id,
            AccountFilter {
                account_type: query.account_type,
                level: query.level,
                only_active: query.only_active,
            },
        )
        .await?
    };
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// POST `/tenants/{tenant_id}/accounts` - create an account.
async fn create_account(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let account = repo
        .create(CreateAccountInput {
            tenant_id: TenantId::from_uuid(tenant_id),
            code: payload.code,
            name: payload.name,
            account_type: payload.account_type,
            nature: payload.nature,
            level: payload.level,
            parent_code: payload.parent_code,
            requires_third_party: payload.requires_third_party,
            requires_cost_center: payload.requires_cost_center,
            is_system: false,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET `/tenants/{tenant_id}/accounts/{code}` - fetch one account.
async fn get_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(Uuid, String)>,
) -> Result<Json<AccountResponse>, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let account = repo.find_by_code(TenantId::from_uuid(tenant_id), &code).await?;
    Ok(Json(account.into()))
}

/// PUT `/tenants/{tenant_id}/accounts/{code}` - update mutable fields.
async fn update_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(Uuid, String)>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let account = repo
        .update(
            TenantId::from_uuid(tenant_id),
            &code,
            UpdateAccountInput {
                name: payload.name,
                is_active: payload.is_active,
                requires_third_party: payload.requires_third_party,
                requires_cost_center: payload.requires_cost_center,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

/// DELETE `/tenants/{tenant_id}/accounts/{code}` - delete an account.
async fn delete_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(Uuid, String)>,
) -> Result<StatusCode, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    repo.delete(TenantId::from_uuid(tenant_id), &code).await?;
    Ok(StatusCode::NO_CONTENT)
}
