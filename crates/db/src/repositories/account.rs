//! Chart of accounts repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;
use partida_core::chart::{Account, AccountNature, AccountType, ChartError, POSTABLE_LEVEL};
use partida_shared::types::{AccountId, TenantId};

use crate::entities::{chart_of_accounts, sea_orm_active_enums, voucher_entries, vouchers};

/// Error type for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountRepoError {
    /// A chart rule was violated.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Account code, unique per tenant.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
    /// Nature; defaults from the account type when omitted.
    pub nature: Option<AccountNature>,
    /// Hierarchy level (1-4).
    pub level: i16,
    /// Parent account code.
    pub parent_code: Option<String>,
    /// Postings must carry a third party.
    pub requires_third_party: bool,
    /// Postings must carry a cost center.
    pub requires_cost_center: bool,
    /// System accounts cannot be modified or deleted later.
    pub is_system: bool,
}

/// Input for updating an account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New name.
    pub name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New third-party requirement.
    pub requires_third_party: Option<bool>,
    /// New cost-center requirement.
    pub requires_cost_center: Option<bool>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by classification.
    pub account_type: Option<AccountType>,
    /// Filter by hierarchy level.
    pub level: Option<i16>,
    /// Only active accounts.
    pub only_active: bool,
}

/// Chart of accounts repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` when the tenant already has the code, and
    /// `InvalidLevel` for levels outside 1-4.
    pub async fn create(&self, input: CreateAccountInput) -> Result<Account, AccountRepoError> {
        if !(1..=POSTABLE_LEVEL).contains(&input.level) {
            return Err(ChartError::InvalidLevel(input.level).into());
        }

        let exists = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(input.tenant_id.into_inner()))
            .filter(chart_of_accounts::Column::Code.eq(input.code.clone()))
            .count(&self.db)
            .await?;
        if exists > 0 {
            return Err(ChartError::DuplicateCode(input.code).into());
        }

        let nature = input
            .nature
            .unwrap_or_else(|| input.account_type.default_nature());
        let now = Utc::now();

        let model = chart_of_accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            tenant_id: Set(input.tenant_id.into_inner()),
            code: Set(input.code.clone()),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            nature: Set(nature.into()),
            level: Set(input.level),
            parent_code: Set(input.parent_code),
            requires_third_party: Set(input.requires_third_party),
            requires_cost_center: Set(input.requires_cost_center),
            is_active: Set(true),
            is_system: Set(input.is_system),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = model.insert(&self.db).await?;

        info!(code = %model.code, tenant = %model.tenant_id, "Account created");
        Ok(to_domain(model))
    }

    /// Finds an account by its code.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` when the tenant has no such code.
    pub async fn find_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Account, AccountRepoError> {
        let model = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::AccountNotFound(code.to_string()))?;
        Ok(to_domain(model))
    }

    /// Lists accounts ordered by code.
    pub async fn list(
        &self,
        tenant_id: TenantId,
        filter: AccountFilter,
    ) -> Result<Vec<Account>, AccountRepoError> {
        let mut query = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()));

        if let Some(account_type) = filter.account_type {
            query = query.filter(
                chart_of_accounts::Column::AccountType
                    .eq(sea_orm_active_enums::AccountType::from(account_type)),
            );
        }
        if let Some(level) = filter.level {
            query = query.filter(chart_of_accounts::Column::Level.eq(level));
        }
        if filter.only_active {
            query = query.filter(chart_of_accounts::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    /// Lists active postable (level-4) accounts ordered by code.
    pub async fn list_active_leaf_accounts(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<Account>, AccountRepoError> {
        self.list(
            tenant_id,
            AccountFilter {
                level: Some(POSTABLE_LEVEL),
                only_active: true,
                ..AccountFilter::default()
            },
        )
        .await
    }

    /// Lists accounts of a type within an inclusive code range.
    pub async fn list_by_code_range(
        &self,
        tenant_id: TenantId,
        account_type: AccountType,
        start: &str,
        end: &str,
    ) -> Result<Vec<Account>, AccountRepoError> {
        let models = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(
                chart_of_accounts::Column::AccountType
                    .eq(sea_orm_active_enums::AccountType::from(account_type)),
            )
            .filter(chart_of_accounts::Column::Code.gte(start))
            .filter(chart_of_accounts::Column::Code.lte(end))
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    /// Updates an account's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `SystemAccount` for system accounts and `AccountNotFound`
    /// for unknown codes. Type, nature and level never change here.
    pub async fn update(
        &self,
        tenant_id: TenantId,
        code: &str,
        input: UpdateAccountInput,
    ) -> Result<Account, AccountRepoError> {
        let model = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::AccountNotFound(code.to_string()))?;

        if model.is_system {
            return Err(ChartError::SystemAccount(code.to_string()).into());
        }

        let mut active: chart_of_accounts::ActiveModel = model.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(requires_third_party) = input.requires_third_party {
            active.requires_third_party = Set(requires_third_party);
        }
        if let Some(requires_cost_center) = input.requires_cost_center {
            active.requires_cost_center = Set(requires_cost_center);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `SystemAccount` for system accounts and `AccountInUse` when
    /// postings reference the code.
    pub async fn delete(&self, tenant_id: TenantId, code: &str) -> Result<(), AccountRepoError> {
        let model = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::AccountNotFound(code.to_string()))?;

        if model.is_system {
            return Err(ChartError::SystemAccount(code.to_string()).into());
        }

        let postings = voucher_entries::Entity::find()
            .inner_join(vouchers::Entity)
            .filter(voucher_entries::Column::AccountCode.eq(code))
            .filter(vouchers::Column::TenantId.eq(tenant_id.into_inner()))
            .count(&self.db)
            .await?;
        if postings > 0 {
            return Err(ChartError::AccountInUse(code.to_string()).into());
        }

        chart_of_accounts::Entity::delete_by_id(model.id)
            .exec(&self.db)
            .await?;
        info!(code = %code, tenant = %tenant_id, "Account deleted");
        Ok(())
    }
}

/// Converts an entity model into the domain account.
fn to_domain(model: chart_of_accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        code: model.code,
        name: model.name,
        account_type: model.account_type.into(),
        nature: model.nature.into(),
        level: model.level,
        parent_code: model.parent_code,
        requires_third_party: model.requires_third_party,
        requires_cost_center: model.requires_cost_center,
        is_active: model.is_active,
        is_system: model.is_system,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
