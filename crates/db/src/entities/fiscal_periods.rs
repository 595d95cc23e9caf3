//! `SeaORM` Entity for the fiscal_periods table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PeriodStatus;

/// A fiscal period, unique per (tenant_id, year, month).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fiscal_periods")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: i32,
    /// Status.
    pub status: PeriodStatus,
    /// When the period was closed.
    pub closed_at: Option<DateTimeWithTimeZone>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
