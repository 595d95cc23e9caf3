//! Report repository: consistent snapshots for the report generators.
//!
//! Entries are fetched with a single joined statement filtered on
//! `status == posted`, so a report never sees a partially visible voucher;
//! the generators themselves are pure functions in `partida-core`.

use chrono::{NaiveDate, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use partida_core::chart::Account;
use partida_core::ledger::PostedEntry;
use partida_core::reports::{
    BalanceSheetReport, GeneralLedgerReport, IncomeStatementReport, JournalReport, ReportError,
    ReportService, TrialBalanceReport,
};
use partida_core::voucher::VoucherType;
use partida_shared::types::{AccountId, TenantId, ThirdPartyId, VoucherId};

use crate::entities::{chart_of_accounts, sea_orm_active_enums, voucher_entries, vouchers};

/// Error type for report generation.
#[derive(Debug, thiserror::Error)]
pub enum ReportRepoError {
    /// The report inputs were invalid.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates the journal for `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or a database error.
    pub async fn journal(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
        voucher_type: Option<VoucherType>,
    ) -> Result<JournalReport, ReportRepoError> {
        let accounts = self.load_accounts(tenant_id).await?;
        let entries = self.load_posted_entries(tenant_id, Some(to)).await?;
        Ok(ReportService::journal(from, to, voucher_type, &accounts, &entries)?)
    }

    /// Generates the general ledger for one account over `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for unknown codes.
    pub async fn general_ledger(
        &self,
        tenant_id: TenantId,
        account_code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<GeneralLedgerReport, ReportRepoError> {
        let account = self
            .find_account(tenant_id, account_code)
            .await?
            .ok_or_else(|| ReportError::AccountNotFound(account_code.to_string()))?;
        let entries = self.load_posted_entries(tenant_id, Some(to)).await?;
        Ok(ReportService::general_ledger(&account, from, to, &entries)?)
    }

    /// Generates the trial balance as of a date.
    pub async fn trial_balance(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, ReportRepoError> {
        let accounts = self.load_accounts(tenant_id).await?;
        let entries = self.load_posted_entries(tenant_id, Some(as_of)).await?;
        Ok(ReportService::trial_balance(as_of, &accounts, &entries))
    }

    /// Generates the balance sheet as of a date.
    pub async fn balance_sheet(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<BalanceSheetReport, ReportRepoError> {
        let accounts = self.load_accounts(tenant_id).await?;
        let entries = self.load_posted_entries(tenant_id, Some(as_of)).await?;
        Ok(ReportService::balance_sheet(as_of, &accounts, &entries))
    }

    /// Generates the income statement over `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or a database error.
    pub async fn income_statement(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<IncomeStatementReport, ReportRepoError> {
        let accounts = self.load_accounts(tenant_id).await?;
        let entries = self.load_posted_entries(tenant_id, Some(to)).await?;
        Ok(ReportService::income_statement(from, to, &accounts, &entries)?)
    }

    /// Loads the tenant's chart of accounts.
    async fn load_accounts(&self, tenant_id: TenantId) -> Result<Vec<Account>, ReportRepoError> {
        let models = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(account_to_domain).collect())
    }

    async fn find_account(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Account>, ReportRepoError> {
        let model = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(account_to_domain))
    }

    /// Loads the tenant's POSTED entries, optionally cut off at a date.
    ///
    /// One joined statement: either all of a voucher's entries are visible
    /// or none are.
    async fn load_posted_entries(
        &self,
        tenant_id: TenantId,
        up_to: Option<NaiveDate>,
    ) -> Result<Vec<PostedEntry>, ReportRepoError> {
        let mut query = voucher_entries::Entity::find()
            .find_also_related(vouchers::Entity)
            .filter(vouchers::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(vouchers::Column::Status.eq(sea_orm_active_enums::VoucherStatus::Posted));

        if let Some(cutoff) = up_to {
            query = query.filter(vouchers::Column::Date.lte(cutoff));
        }

        let rows = query.all(&self.db).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, voucher)| voucher.map(|v| posted_entry(entry, &v)))
            .collect())
    }
}

fn posted_entry(entry: voucher_entries::Model, voucher: &vouchers::Model) -> PostedEntry {
    PostedEntry {
        voucher_id: VoucherId::from_uuid(voucher.id),
        voucher_number: voucher.voucher_number.clone(),
        voucher_type: voucher.voucher_type.into(),
        date: voucher.date,
        line_number: entry.line_number,
        account_code: entry.account_code,
        description: entry.description,
        third_party_id: entry.third_party_id.map(ThirdPartyId::from_uuid),
        debit: entry.debit_amount,
        credit: entry.credit_amount,
    }
}

fn account_to_domain(model: chart_of_accounts::Model) -> Account {
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
