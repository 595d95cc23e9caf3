//! Voucher repository.
//!
//! All lifecycle writes happen inside database transactions:
//! - `create` consumes the per-(tenant, type) numbering sequence with an
//!   atomic upsert in the same transaction as the insert, so concurrent
//!   creates cannot issue duplicate numbers.
//! - `post`, `void`, `update` and `delete` re-read the voucher with a row
//!   lock before validating, so two racing transitions cannot both succeed
//!   and `post` never observes a torn entry set.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait,
};
use tracing::{info, warn};
use partida_core::chart::AccountNature;
use partida_core::voucher::{
    AccountRef, CreateVoucherInput, Entry, EntryInput, Voucher, VoucherError, VoucherService,
    VoucherStatus, VoucherType, format_number,
};
use partida_shared::types::{
    CostCenterId, EntryId, PageRequest, PageResponse, TenantId, ThirdPartyId, VoucherId,
};

use crate::entities::{
    chart_of_accounts, fiscal_periods, sea_orm_active_enums, voucher_entries, vouchers,
};
use crate::repositories::fiscal;

/// Error type for voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum VoucherRepoError {
    /// A lifecycle rule was violated.
    #[error(transparent)]
    Voucher(#[from] VoucherError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for replacing a draft voucher's content.
///
/// The entry set is replaced wholesale (delete-then-reinsert); totals and
/// the fiscal period are recomputed from the new content.
#[derive(Debug, Clone)]
pub struct UpdateVoucherInput {
    /// New voucher date.
    pub date: NaiveDate,
    /// New description.
    pub description: String,
    /// New reference.
    pub reference: Option<String>,
    /// The replacement entry set.
    pub entries: Vec<EntryInput>,
}

/// Filter options for listing vouchers.
#[derive(Debug, Clone, Default)]
pub struct VoucherFilter {
    /// Filter by status.
    pub status: Option<VoucherStatus>,
    /// Filter by voucher type.
    pub voucher_type: Option<VoucherType>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
}

/// Voucher repository.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    db: DatabaseConnection,
}

impl VoucherRepository {
    /// Creates a new voucher repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a voucher as a draft.
    ///
    /// Entries are validated against the chart (XOR, non-negative, leaf
    /// account), but balance is not required: an unbalanced draft is a
    /// legitimate work in progress.
    ///
    /// # Errors
    ///
    /// Returns validation failures from the voucher service or database
    /// errors.
    pub async fn create(&self, input: CreateVoucherInput) -> Result<Voucher, VoucherRepoError> {
        let txn = self.db.begin().await?;
        let model = Self::insert_draft_tx(&txn, &input).await?;
        txn.commit().await?;

        info!(
            voucher = %model.voucher_number,
            tenant = %input.tenant_id,
            "Voucher created"
        );
        self.find_by_id(VoucherId::from_uuid(model.id)).await
    }

    /// Replaces a draft voucher's content.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the voucher is a draft.
    pub async fn update(
        &self,
        id: VoucherId,
        input: UpdateVoucherInput,
    ) -> Result<Voucher, VoucherRepoError> {
        let txn = self.db.begin().await?;

        let model = Self::find_locked(&txn, id).await?;
        VoucherService::validate_can_modify(model.status.into())?;

        let tenant_id = TenantId::from_uuid(model.tenant_id);
        let refs = Self::load_account_refs(&txn, tenant_id, &input.entries).await?;
        VoucherService::validate_entries(&input.entries, |code| refs.get(code).cloned())?;
        let totals = VoucherService::calculate_totals(&input.entries);

        voucher_entries::Entity::delete_many()
            .filter(voucher_entries::Column::VoucherId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        Self::insert_entries(&txn, id, &input.entries).await?;

        let (fiscal_year, fiscal_period) = Voucher::fiscal_period_of(input.date);
        let mut active: vouchers::ActiveModel = model.into();
        active.date = Set(input.date);
        active.description = Set(input.description);
        active.reference = Set(input.reference);
        active.fiscal_year = Set(fiscal_year);
        active.fiscal_period = Set(i32::try_from(fiscal_period).unwrap_or(1));
        active.total_debit = Set(totals.total_debit);
        active.total_credit = Set(totals.total_credit);
        active.update(&txn).await?;

        txn.commit().await?;
        info!(voucher = %id, "Voucher updated");
        self.find_by_id(id).await
    }

    /// Posts a draft voucher, making its entries authoritative.
    ///
    /// Totals are recomputed from the entries inside the transaction - the
    /// cached header totals are never trusted for the balance check - and
    /// the fiscal period of the voucher date must allow posting.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState`, `Unbalanced` or `PeriodNotOpen`.
    pub async fn post(&self, id: VoucherId) -> Result<Voucher, VoucherRepoError> {
        let txn = self.db.begin().await?;

        let model = Self::find_locked(&txn, id).await?;
        let entry_models = voucher_entries::Entity::find()
            .filter(voucher_entries::Column::VoucherId.eq(id.into_inner()))
            .all(&txn)
            .await?;

        let entries: Vec<Entry> = entry_models.iter().map(entry_to_domain).collect();
        let totals = VoucherService::calculate_totals_from_entries(&entries);

        let period = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(model.tenant_id))
            .filter(fiscal_periods::Column::Year.eq(model.fiscal_year))
            .filter(fiscal_periods::Column::Month.eq(model.fiscal_period))
            .one(&txn)
            .await?
            .map(fiscal::to_domain);

        VoucherService::validate_can_post(model.status.into(), totals, model.date, period.as_ref())?;

        let mut active: vouchers::ActiveModel = model.into();
        active.status = Set(sea_orm_active_enums::VoucherStatus::Posted);
        active.posted_at = Set(Some(Utc::now().into()));
        active.total_debit = Set(totals.total_debit);
        active.total_credit = Set(totals.total_credit);
        active.update(&txn).await?;

        txn.commit().await?;
        info!(voucher = %id, "Voucher posted");
        self.find_by_id(id).await
    }

    /// Voids a posted voucher.
    ///
    /// Entries are preserved for the audit trail; the voucher drops out of
    /// every balance because aggregation filters on `status == posted`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the voucher is posted.
    pub async fn void(&self, id: VoucherId) -> Result<Voucher, VoucherRepoError> {
        let txn = self.db.begin().await?;

        let model = Self::find_locked(&txn, id).await?;
        VoucherService::validate_can_void(model.status.into())?;

        let mut active: vouchers::ActiveModel = model.into();
        active.status = Set(sea_orm_active_enums::VoucherStatus::Void);
        active.update(&txn).await?;

        txn.commit().await?;
        warn!(voucher = %id, "Posted voucher voided; it no longer contributes to balances");
        self.find_by_id(id).await
    }

    /// Deletes a draft voucher and its entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the voucher is a draft.
    pub async fn delete(&self, id: VoucherId) -> Result<(), VoucherRepoError> {
        let txn = self.db.begin().await?;

        let model = Self::find_locked(&txn, id).await?;
        VoucherService::validate_can_delete(model.status.into())?;

        voucher_entries::Entity::delete_many()
            .filter(voucher_entries::Column::VoucherId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        vouchers::Entity::delete_by_id(model.id).exec(&txn).await?;

        txn.commit().await?;
        info!(voucher = %id, "Voucher deleted");
        Ok(())
    }

    /// Finds a voucher with its entries in line order.
    ///
    /// # Errors
    ///
    /// Returns `VoucherNotFound` for unknown ids.
    pub async fn find_by_id(&self, id: VoucherId) -> Result<Voucher, VoucherRepoError> {
        let model = vouchers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(VoucherError::VoucherNotFound(id))?;

        let entry_models = voucher_entries::Entity::find()
            .filter(voucher_entries::Column::VoucherId.eq(id.into_inner()))
            .order_by_asc(voucher_entries::Column::LineNumber)
            .all(&self.db)
            .await?;

        Ok(to_domain(model, entry_models.iter().map(entry_to_domain).collect()))
    }

    /// Lists a tenant's vouchers, newest first, without entries.
    pub async fn list(
        &self,
        tenant_id: TenantId,
        filter: VoucherFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Voucher>, VoucherRepoError> {
        let mut query = vouchers::Entity::find()
            .filter(vouchers::Column::TenantId.eq(tenant_id.into_inner()));

        if let Some(status) = filter.status {
            query = query.filter(
                vouchers::Column::Status.eq(sea_orm_active_enums::VoucherStatus::from(status)),
            );
        }
        if let Some(voucher_type) = filter.voucher_type {
            query = query.filter(
                vouchers::Column::VoucherType
                    .eq(sea_orm_active_enums::VoucherType::from(voucher_type)),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(vouchers::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(vouchers::Column::Date.lte(to));
        }

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(vouchers::Column::Date)
            .order_by_desc(vouchers::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(|m| to_domain(m, Vec::new())).collect();
        Ok(PageResponse::new(items, page, total))
    }

    // ========================================================================
    // Transaction-scoped building blocks, shared with the integration
    // adapter so create+post can run inside one caller-owned transaction.
    // ========================================================================

    /// Validates and inserts a draft voucher inside `txn`.
    pub(crate) async fn insert_draft_tx<C: ConnectionTrait>(
        txn: &C,
        input: &CreateVoucherInput,
    ) -> Result<vouchers::Model, VoucherRepoError> {
        let refs = Self::load_account_refs(txn, input.tenant_id, &input.entries).await?;
        VoucherService::validate_entries(&input.entries, |code| refs.get(code).cloned())?;
        let totals = VoucherService::calculate_totals(&input.entries);

        let sequence = Self::next_sequence(txn, input.tenant_id, input.voucher_type).await?;
        let voucher_number = format_number(input.voucher_type, sequence);

        let id = VoucherId::new();
        let (fiscal_year, fiscal_period) = Voucher::fiscal_period_of(input.date);

        let model = vouchers::ActiveModel {
            id: Set(id.into_inner()),
            tenant_id: Set(input.tenant_id.into_inner()),
            voucher_type: Set(input.voucher_type.into()),
            voucher_number: Set(voucher_number),
            date: Set(input.date),
            description: Set(input.description.clone()),
            reference: Set(input.reference.clone()),
            status: Set(sea_orm_active_enums::VoucherStatus::Draft),
            fiscal_year: Set(fiscal_year),
            fiscal_period: Set(i32::try_from(fiscal_period).unwrap_or(1)),
            total_debit: Set(totals.total_debit),
            total_credit: Set(totals.total_credit),
            created_at: Set(Utc::now().into()),
            posted_at: Set(None),
        };
        let model = model.insert(txn).await?;

        Self::insert_entries(txn, id, &input.entries).await?;
        Ok(model)
    }

    /// Posts a voucher inside `txn`; same checks as [`Self::post`].
    pub(crate) async fn post_tx<C: ConnectionTrait>(
        txn: &C,
        id: VoucherId,
    ) -> Result<vouchers::Model, VoucherRepoError> {
        let model = Self::find_locked(txn, id).await?;
        let entry_models = voucher_entries::Entity::find()
            .filter(voucher_entries::Column::VoucherId.eq(id.into_inner()))
            .all(txn)
            .await?;
        let entries: Vec<Entry> = entry_models.iter().map(entry_to_domain).collect();
        let totals = VoucherService::calculate_totals_from_entries(&entries);

        let period = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(model.tenant_id))
            .filter(fiscal_periods::Column::Year.eq(model.fiscal_year))
            .filter(fiscal_periods::Column::Month.eq(model.fiscal_period))
            .one(txn)
            .await?
            .map(fiscal::to_domain);

        VoucherService::validate_can_post(model.status.into(), totals, model.date, period.as_ref())?;

        let mut active: vouchers::ActiveModel = model.into();
        active.status = Set(sea_orm_active_enums::VoucherStatus::Posted);
        active.posted_at = Set(Some(Utc::now().into()));
        active.total_debit = Set(totals.total_debit);
        active.total_credit = Set(totals.total_credit);
        Ok(active.update(txn).await?)
    }

    /// Loads the voucher row with an exclusive lock.
    async fn find_locked<C: ConnectionTrait>(
        txn: &C,
        id: VoucherId,
    ) -> Result<vouchers::Model, VoucherRepoError> {
        vouchers::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| VoucherError::VoucherNotFound(id).into())
    }

    /// Issues the next number from the per-(tenant, type) sequence.
    ///
    /// The upsert takes a row lock, so concurrent creates serialize here and
    /// each observes a distinct value; the first voucher of a sequence gets 1.
    async fn next_sequence<C: ConnectionTrait>(
        txn: &C,
        tenant_id: TenantId,
        voucher_type: VoucherType,
    ) -> Result<i64, VoucherRepoError> {
        let db_type = sea_orm_active_enums::VoucherType::from(voucher_type);
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "INSERT INTO voucher_sequences (tenant_id, voucher_type, last_number) \
             VALUES ($1, $2::voucher_type, 1) \
             ON CONFLICT (tenant_id, voucher_type) \
             DO UPDATE SET last_number = voucher_sequences.last_number + 1 \
             RETURNING last_number",
            [tenant_id.into_inner().into(), db_type.into()],
        );
        let row = txn
            .query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::Custom("voucher sequence upsert returned no row".to_string()))?;
        Ok(row.try_get("", "last_number")?)
    }

    /// Inserts entry rows with 1-based line numbers.
    async fn insert_entries<C: ConnectionTrait>(
        txn: &C,
        voucher_id: VoucherId,
        entries: &[EntryInput],
    ) -> Result<(), VoucherRepoError> {
        if entries.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models: Vec<voucher_entries::ActiveModel> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| voucher_entries::ActiveModel {
                id: Set(EntryId::new().into_inner()),
                voucher_id: Set(voucher_id.into_inner()),
                line_number: Set(i32::try_from(index + 1).unwrap_or(i32::MAX)),
                account_code: Set(entry.account_code.clone()),
                third_party_id: Set(entry.third_party_id.map(ThirdPartyId::into_inner)),
                cost_center_id: Set(entry.cost_center_id.map(CostCenterId::into_inner)),
                description: Set(entry.description.clone()),
                debit_amount: Set(entry.debit),
                credit_amount: Set(entry.credit),
                base_value: Set(entry.base_value),
                tax_value: Set(entry.tax_value),
                created_at: Set(now.into()),
            })
            .collect();

        voucher_entries::Entity::insert_many(models).exec(txn).await?;
        Ok(())
    }

    /// Loads the account data entry validation needs, keyed by code.
    async fn load_account_refs<C: ConnectionTrait>(
        txn: &C,
        tenant_id: TenantId,
        entries: &[EntryInput],
    ) -> Result<HashMap<String, AccountRef>, VoucherRepoError> {
        let codes: Vec<String> = entries.iter().map(|e| e.account_code.clone()).collect();
        if codes.is_empty() {
            return Ok(HashMap::new());
        }

        let models = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(chart_of_accounts::Column::Code.is_in(codes))
            .all(txn)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                (
                    m.code.clone(),
                    AccountRef {
                        code: m.code,
                        level: m.level,
                        is_active: m.is_active,
                        nature: AccountNature::from(m.nature),
                    },
                )
            })
            .collect())
    }
}

/// Converts entity models into the domain voucher.
fn to_domain(model: vouchers::Model, entries: Vec<Entry>) -> Voucher {
    Voucher {
        id: VoucherId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        voucher_type: model.voucher_type.into(),
        voucher_number: model.voucher_number,
        date: model.date,
        description: model.description,
        reference: model.reference,
        status: model.status.into(),
        fiscal_year: model.fiscal_year,
        fiscal_period: model.fiscal_period.unsigned_abs(),
        total_debit: model.total_debit,
        total_credit: model.total_credit,
        created_at: model.created_at.with_timezone(&Utc),
        posted_at: model.posted_at.map(|ts| ts.with_timezone(&Utc)),
        entries,
    }
}

/// Converts an entry model into the domain entry.
fn entry_to_domain(model: &voucher_entries::Model) -> Entry {
    Entry {
        id: EntryId::from_uuid(model.id),
        voucher_id: VoucherId::from_uuid(model.voucher_id),
        line_number: model.line_number,
        account_code: model.account_code.clone(),
        third_party_id: model.third_party_id.map(ThirdPartyId::from_uuid),
        cost_center_id: model.cost_center_id.map(CostCenterId::from_uuid),
        description: model.description.clone(),
        debit: model.debit_amount,
        credit: model.credit_amount,
        base_value: model.base_value,
        tax_value: model.tax_value,
    }
}
