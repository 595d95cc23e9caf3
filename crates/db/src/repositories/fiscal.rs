//! Fiscal period repository.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use partida_core::fiscal::{FiscalPeriod, PeriodStatus};
use partida_shared::types::{FiscalPeriodId, TenantId};

use crate::entities::{fiscal_periods, sea_orm_active_enums};

/// Error type for fiscal period operations.
#[derive(Debug, thiserror::Error)]
pub enum PeriodRepoError {
    /// Period not found.
    #[error("Fiscal period {year}-{month:02} not found")]
    NotFound {
        /// Period year.
        year: i32,
        /// Period month.
        month: u32,
    },

    /// Locked periods cannot change state.
    #[error("Fiscal period {year}-{month:02} is locked")]
    Locked {
        /// Period year.
        year: i32,
        /// Period month.
        month: u32,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PeriodRepoError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "PERIOD_NOT_FOUND",
            Self::Locked { .. } => "PERIOD_LOCKED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Fiscal period repository.
#[derive(Debug, Clone)]
pub struct FiscalPeriodRepository {
    db: DatabaseConnection,
}

impl FiscalPeriodRepository {
    /// Creates a new fiscal period repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the period for (year, month), creating it open if absent.
    pub async fn ensure(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
    ) -> Result<FiscalPeriod, PeriodRepoError> {
        if let Some(model) = self.find_model(tenant_id, year, month).await? {
            return Ok(to_domain(model));
        }

        let now = Utc::now();
        let model = fiscal_periods::ActiveModel {
            id: Set(FiscalPeriodId::new().into_inner()),
            tenant_id: Set(tenant_id.into_inner()),
            year: Set(year),
            month: Set(i32::try_from(month).unwrap_or(1)),
            status: Set(sea_orm_active_enums::PeriodStatus::Open),
            closed_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = model.insert(&self.db).await?;
        info!(tenant = %tenant_id, year, month, "Fiscal period opened");
        Ok(to_domain(model))
    }

    /// Finds the period containing the given date, if one was created.
    pub async fn find_for_date(
        &self,
        tenant_id: TenantId,
        date: NaiveDate,
    ) -> Result<Option<FiscalPeriod>, PeriodRepoError> {
        let model = self.find_model(tenant_id, date.year(), date.month()).await?;
        Ok(model.map(to_domain))
    }

    /// Lists all periods of a tenant, newest first.
    pub async fn list(&self, tenant_id: TenantId) -> Result<Vec<FiscalPeriod>, PeriodRepoError> {
        let models = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_desc(fiscal_periods::Column::Year)
            .order_by_desc(fiscal_periods::Column::Month)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    /// Closes a period. Closing an already-closed period is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Locked` when the period is locked and `NotFound` when it was
    /// never created.
    pub async fn close(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
    ) -> Result<FiscalPeriod, PeriodRepoError> {
        self.transition(tenant_id, year, month, sea_orm_active_enums::PeriodStatus::Closed)
            .await
    }

    /// Reopens a closed period.
    ///
    /// # Errors
    ///
    /// Returns `Locked` when the period is locked; a locked close is final.
    pub async fn reopen(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
    ) -> Result<FiscalPeriod, PeriodRepoError> {
        self.transition(tenant_id, year, month, sea_orm_active_enums::PeriodStatus::Open)
            .await
    }

    /// Locks a period definitively.
    pub async fn lock(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
    ) -> Result<FiscalPeriod, PeriodRepoError> {
        self.transition(tenant_id, year, month, sea_orm_active_enums::PeriodStatus::Locked)
            .await
    }

    async fn transition(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
        target: sea_orm_active_enums::PeriodStatus,
    ) -> Result<FiscalPeriod, PeriodRepoError> {
        let model = self
            .find_model(tenant_id, year, month)
            .await?
            .ok_or(PeriodRepoError::NotFound { year, month })?;

        if model.status == sea_orm_active_enums::PeriodStatus::Locked {
            return Err(PeriodRepoError::Locked { year, month });
        }
        if model.status == target {
            return Ok(to_domain(model));
        }

        let closing = target != sea_orm_active_enums::PeriodStatus::Open;
        let mut active: fiscal_periods::ActiveModel = model.into();
        active.status = Set(target);
        active.closed_at = Set(closing.then(|| Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&self.db).await?;

        info!(tenant = %tenant_id, year, month, status = ?model.status, "Fiscal period transition");
        Ok(to_domain(model))
    }

    async fn find_model(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
    ) -> Result<Option<fiscal_periods::Model>, PeriodRepoError> {
        let model = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::Year.eq(year))
            .filter(fiscal_periods::Column::Month.eq(i32::try_from(month).unwrap_or(1)))
            .one(&self.db)
            .await?;
        Ok(model)
    }
}

/// Converts an entity model into the domain period.
pub(crate) fn to_domain(model: fiscal_periods::Model) -> FiscalPeriod {
    FiscalPeriod {
        id: FiscalPeriodId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        year: model.year,
        month: model.month.unsigned_abs(),
        status: PeriodStatus::from(model.status),
        closed_at: model.closed_at.map(|ts| ts.with_timezone(&Utc)),
    }
}
